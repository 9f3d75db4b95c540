//! Colour mapping and rasterisation of a noise field.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use itertools::Itertools;

use crate::error::{NoiseError, Result};
use crate::grid::GradientGrid;

pub const DEFAULT_SCALE: u32 = 32;

/// Pixels per grid cell along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale(u32);

impl Scale {
    pub fn new(scale: i64) -> Result<Self> {
        match u32::try_from(scale) {
            Ok(s) if s >= 1 => Ok(Self(s)),
            _ => Err(NoiseError::InvalidScale(scale)),
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self(DEFAULT_SCALE)
    }
}

/// White at zero, fading to cyan for positive noise and to yellow for
/// negative noise.
pub fn noise_color(noise: f32) -> Rgb<u8> {
    if noise >= 0.0 {
        Rgb([255u8.saturating_sub((255.0 * noise) as u8), 255, 255])
    } else {
        Rgb([255, 255, 255u8.saturating_sub((-255.0 * noise) as u8)])
    }
}

/// Pixel size of the rendered field, `(width·scale, height·scale)`. A scale
/// that pushes either side past `u32::MAX` is rejected.
pub fn surface_size(grid: &GradientGrid, scale: Scale) -> Result<(u32, u32)> {
    let dims = grid.dimensions();
    let too_large = || NoiseError::InvalidScale(i64::from(scale.get()));
    let width = dims.width().checked_mul(scale.get()).ok_or_else(too_large)?;
    let height = dims.height().checked_mul(scale.get()).ok_or_else(too_large)?;
    Ok((width, height))
}

/// Calls `plot(i, j, colour)` for every pixel of the field. Pixel `(i, j)`
/// shows the noise at `(i / scale, j / scale)`.
pub fn for_each_pixel(
    grid: &GradientGrid,
    scale: Scale,
    mut plot: impl FnMut(u32, u32, Rgb<u8>),
) -> Result<()> {
    let (width, height) = surface_size(grid, scale)?;
    let s = scale.get() as f32;
    for (i, j) in (0..width).cartesian_product(0..height) {
        let noise = grid.sample(i as f32 / s, j as f32 / s);
        plot(i, j, noise_color(noise));
    }
    Ok(())
}

pub fn render_field(grid: &GradientGrid, scale: Scale) -> Result<RgbImage> {
    let (width, height) = surface_size(grid, scale)?;
    log::debug!("rendering {width}x{height} noise image");
    let mut image = RgbImage::new(width, height);
    for_each_pixel(grid, scale, |i, j, colour| image.put_pixel(i, j, colour))?;
    Ok(image)
}

pub fn export_png(grid: &GradientGrid, scale: Scale, path: &Path) -> Result<()> {
    let image = render_field(grid, scale)?;
    image.save_with_format(path, ImageFormat::Png)?;
    log::info!("wrote {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(())
}
