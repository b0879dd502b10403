//! Sample placement inside a pixel.
//!
//! Offsets are in view-plane units relative to the pixel center: `x` grows to
//! the right, `y` grows upward.

use std::collections::HashMap;

use lumen_core::material::colors_match;
use lumen_core::Color;
use lumen_math::EPSILON;
use rand::RngCore;

use crate::gen_f64;

/// One random sample per cell of a `root × root` grid over a
/// `width × height` pixel.
///
/// A root of 0 or 1 gives the pixel center alone.
pub fn jittered_grid(root: usize, width: f64, height: f64, rng: &mut dyn RngCore) -> Vec<(f64, f64)> {
    if root <= 1 {
        return vec![(0.0, 0.0)];
    }

    let cell_w = width / root as f64;
    let cell_h = height / root as f64;
    let half = (root as f64 - 1.0) / 2.0;

    let mut offsets = Vec::with_capacity(root * root);
    for i in 0..root {
        for j in 0..root {
            let y = -(i as f64 - half) * cell_h - cell_h / 2.0 + gen_f64(rng) * cell_h;
            let x = (j as f64 - half) * cell_w - cell_w / 2.0 + gen_f64(rng) * cell_w;
            offsets.push((x, y));
        }
    }
    offsets
}

/// Offset of lattice point (`row`, `col`) on a `side × side` lattice whose
/// corners are the pixel corners.
pub fn lattice_offset(row: usize, col: usize, side: usize, width: f64, height: f64) -> (f64, f64) {
    let steps = (side.max(2) - 1) as f64;
    let x = -width / 2.0 + col as f64 * width / steps;
    let y = height / 2.0 - row as f64 * height / steps;
    (x, y)
}

/// Recursive corner-refinement over a square lattice of sample points.
///
/// A square whose four corners agree takes that color. Otherwise it is split
/// into four overlapping quadrants that share the middle lattice line, down to
/// single cells, which average their corners. Every lattice point is traced
/// at most once.
pub struct AdaptiveSampler<F> {
    side: usize,
    trace: F,
    cache: HashMap<(usize, usize), Color>,
}

impl<F> AdaptiveSampler<F>
where
    F: FnMut(usize, usize) -> Color,
{
    /// Create a sampler over a `side × side` lattice (at least 2).
    ///
    /// `trace` is called with the lattice row and column of each point that
    /// needs a color.
    pub fn new(side: usize, trace: F) -> Self {
        Self {
            side: side.max(2),
            trace,
            cache: HashMap::new(),
        }
    }

    /// Color of the whole pixel.
    pub fn sample(&mut self) -> Color {
        self.square(0, 0, self.side)
    }

    /// Number of distinct lattice points traced so far.
    pub fn traced(&self) -> usize {
        self.cache.len()
    }

    fn color_at(&mut self, row: usize, col: usize) -> Color {
        if let Some(color) = self.cache.get(&(row, col)) {
            return *color;
        }
        let color = (self.trace)(row, col);
        self.cache.insert((row, col), color);
        color
    }

    fn square(&mut self, row: usize, col: usize, side: usize) -> Color {
        let far = side - 1;
        let corners = [
            self.color_at(row, col),
            self.color_at(row, col + far),
            self.color_at(row + far, col),
            self.color_at(row + far, col + far),
        ];

        if corners.iter().all(|c| colors_match(*c, corners[0], EPSILON)) {
            return corners[0];
        }
        if side <= 2 {
            return corners.iter().sum::<Color>() / 4.0;
        }

        // Quadrants span ceil(far / 2) cells and overlap when far is odd
        let sub = (far + 1) / 2 + 1;
        let shift = side - sub;
        let sum = self.square(row, col, sub)
            + self.square(row, col + shift, sub)
            + self.square(row + shift, col, sub)
            + self.square(row + shift, col + shift, sub);
        sum / 4.0
    }
}
