//! Points and non-zero direction vectors.
//!
//! Both wrap a [`DVec3`]. A [`Vector`] can never hold the zero vector: every
//! operation that could produce one returns [`MathError::InvalidVector`]
//! instead. Equality on both types is tolerant to [`EPSILON`](crate::EPSILON)
//! per component.

use std::ops::{Add, Neg};

use glam::DVec3;
use thiserror::Error;

use crate::is_zero;

/// Errors raised by the vector kernel.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("Invalid vector: the zero vector has no direction")]
    InvalidVector,
}

/// Result type for vector operations.
pub type MathResult<T> = Result<T, MathError>;

fn approx_eq(a: DVec3, b: DVec3) -> bool {
    is_zero(a.x - b.x) && is_zero(a.y - b.y) && is_zero(a.z - b.z)
}

/// A location in 3D space.
#[derive(Debug, Copy, Clone, Default)]
pub struct Point(DVec3);

impl Point {
    /// The origin.
    pub const ZERO: Point = Point(DVec3::ZERO);

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    /// Wrap raw coordinates.
    #[inline]
    pub const fn from_dvec3(xyz: DVec3) -> Self {
        Self(xyz)
    }

    /// Raw coordinates.
    #[inline]
    pub fn to_dvec3(self) -> DVec3 {
        self.0
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Vector from `tail` to `self`.
    ///
    /// Fails when the two points coincide.
    pub fn subtract(self, tail: Point) -> MathResult<Vector> {
        Vector::try_from_dvec3(self.0 - tail.0)
    }

    pub fn distance_squared(self, other: Point) -> f64 {
        self.0.distance_squared(other.0)
    }

    pub fn distance(self, other: Point) -> f64 {
        self.0.distance(other.0)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.0, other.0)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    #[inline]
    fn add(self, v: Vector) -> Point {
        Point(self.0 + v.0)
    }
}

impl From<DVec3> for Point {
    fn from(xyz: DVec3) -> Self {
        Self(xyz)
    }
}

/// A non-zero direction in 3D space.
#[derive(Debug, Copy, Clone)]
pub struct Vector(DVec3);

impl Vector {
    pub const X: Vector = Vector(DVec3::X);
    pub const Y: Vector = Vector(DVec3::Y);
    pub const Z: Vector = Vector(DVec3::Z);
    pub const NEG_X: Vector = Vector(DVec3::NEG_X);
    pub const NEG_Y: Vector = Vector(DVec3::NEG_Y);
    pub const NEG_Z: Vector = Vector(DVec3::NEG_Z);

    /// Create a new vector, rejecting the zero vector.
    pub fn new(x: f64, y: f64, z: f64) -> MathResult<Self> {
        Self::try_from_dvec3(DVec3::new(x, y, z))
    }

    /// Wrap raw components, rejecting the zero vector.
    pub fn try_from_dvec3(xyz: DVec3) -> MathResult<Self> {
        if is_zero(xyz.x) && is_zero(xyz.y) && is_zero(xyz.z) {
            Err(MathError::InvalidVector)
        } else {
            Ok(Self(xyz))
        }
    }

    /// Raw components.
    #[inline]
    pub fn to_dvec3(self) -> DVec3 {
        self.0
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn add(self, other: Vector) -> MathResult<Vector> {
        Self::try_from_dvec3(self.0 + other.0)
    }

    pub fn subtract(self, other: Vector) -> MathResult<Vector> {
        Self::try_from_dvec3(self.0 - other.0)
    }

    /// Scale by `t`. Scaling by (epsilon-)zero fails.
    pub fn scale(self, t: f64) -> MathResult<Vector> {
        Self::try_from_dvec3(self.0 * t)
    }

    #[inline]
    pub fn dot(self, other: Vector) -> f64 {
        self.0.dot(other.0)
    }

    /// Cross product. Parallel vectors have no cross product and fail.
    pub fn cross(self, other: Vector) -> MathResult<Vector> {
        Self::try_from_dvec3(self.0.cross(other.0))
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.0.length_squared()
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.0.length()
    }

    /// Unit vector with the same direction.
    ///
    /// Always succeeds: a `Vector` is never zero.
    #[inline]
    pub fn normalize(self) -> Vector {
        Vector(self.0 / self.length())
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.0, other.0)
    }
}

impl Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}

impl TryFrom<DVec3> for Vector {
    type Error = MathError;

    fn try_from(xyz: DVec3) -> MathResult<Self> {
        Self::try_from_dvec3(xyz)
    }
}
