use thiserror::Error;

/// Everything that can go wrong outside the noise math itself.
#[derive(Error, Debug)]
pub enum NoiseError {
    #[error("grid dimensions must be positive values (got {width}x{height})")]
    InvalidDimension { width: i64, height: i64 },
    #[error("scale must be a positive value (got {0})")]
    InvalidScale(i64),
    #[error("target position ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        x: f32,
        y: f32,
        width: u32,
        height: u32,
    },
    #[error("lattice needs {expected} gradients, got {got}")]
    LatticeSize { expected: usize, got: usize },
    #[error("display backend error: {0}")]
    Backend(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, NoiseError>;
