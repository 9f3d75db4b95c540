// --- MODULES ---
pub mod console;
pub mod error;
pub mod grid;
pub mod render;
pub mod sampler;

// --- CRATE-LEVEL PUBLIC EXPORTS ---
pub use error::{NoiseError, Result};
pub use grid::{Dimensions, GradientGrid, GradientVector};
pub use render::Scale;
pub use sampler::sample;
