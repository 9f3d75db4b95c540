use vek::Vec2;

use crate::grid::GradientGrid;

/// Quintic ease curve `6t⁵ − 15t⁴ + 10t³`.
///
/// Zero first and second derivatives at both ends keep the noise C²
/// across cell boundaries.
pub fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Gradient at lattice corner `(cx, cy)` dotted with the offset from that
/// corner to `(x, y)`.
pub fn dot_grid_gradient(grid: &GradientGrid, cx: usize, cy: usize, x: f32, y: f32) -> f32 {
    let offset = Vec2::new(x - cx as f32, y - cy as f32);
    grid.gradient(cx, cy).dot(offset)
}

/// Smoothed noise value at `(x, y)`, in `[-1, 1]`.
///
/// The point must lie in `[0, width] × [0, height]`. On the far edges the
/// last cell is used with a fractional offset of 1.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sample(grid: &GradientGrid, x: f32, y: f32) -> f32 {
    let dims = grid.dimensions();
    debug_assert!(
        dims.contains(x, y),
        "sample point ({x}, {y}) outside {dims:?}"
    );

    let x0 = (x as usize).min(dims.width() as usize - 1);
    let x1 = x0 + 1;
    let y0 = (y as usize).min(dims.height() as usize - 1);
    let y1 = y0 + 1;

    let sx = fade(x - x0 as f32);
    let sy = fade(y - y0 as f32);

    let top_left = dot_grid_gradient(grid, x0, y0, x, y);
    let top_right = dot_grid_gradient(grid, x1, y0, x, y);
    let bottom_left = dot_grid_gradient(grid, x0, y1, x, y);
    let bottom_right = dot_grid_gradient(grid, x1, y1, x, y);

    let top = lerp(top_left, top_right, sx);
    let bottom = lerp(bottom_left, bottom_right, sx);
    lerp(top, bottom, sy)
}
