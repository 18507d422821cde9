//! Error type shared by the scene model, marcher and camera.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("cannot normalize a zero-length vector")]
    DivideByZero,

    #[error("invalid primitive: {0}")]
    InvalidPrimitive(String),

    #[error("scene must contain at least one shape")]
    EmptyScene,

    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("framebuffer must be at least 3x3, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}
