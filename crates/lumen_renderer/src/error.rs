use thiserror::Error;

/// Camera settings rejected by [`Camera::build`](crate::Camera::build).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing camera setting: {0}")]
    Missing(&'static str),

    #[error("Invalid camera setting: {0}")]
    InvalidArgument(String),
}

impl ConfigError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ConfigError::InvalidArgument(reason.into())
    }
}

/// Errors that can end a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Rendering pixel (col {col}, row {row}) failed: {message}")]
    PixelFailed {
        row: u32,
        col: u32,
        message: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Image output failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
