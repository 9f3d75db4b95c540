use std::f32::consts::TAU;
use std::mem::size_of;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vek::Vec2;

use crate::error::{NoiseError, Result};

/// Unit-length direction anchored at one lattice point.
pub type GradientVector = Vec2<f32>;

/// Logical size of a noise grid, in cells. Both sides are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    /// Validates raw user input. Besides rejecting sides below 1, the
    /// `(width + 1) × (height + 1)` lattice must fit in one allocation.
    pub fn new(width: i64, height: i64) -> Result<Self> {
        let invalid = || NoiseError::InvalidDimension { width, height };
        let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) if w >= 1 && h >= 1 => (w, h),
            _ => return Err(invalid()),
        };
        let bytes = checked_lattice_len(w, h)
            .and_then(|len| len.checked_mul(size_of::<GradientVector>()))
            .ok_or_else(invalid)?;
        if isize::try_from(bytes).is_err() {
            return Err(invalid());
        }
        Ok(Self {
            width: w,
            height: h,
        })
    }

    pub const fn width(self) -> u32 {
        self.width
    }

    pub const fn height(self) -> u32 {
        self.height
    }

    /// Whether `(x, y)` lies in `[0, width] × [0, height]`. Both edges are
    /// inclusive and NaN is never contained.
    pub fn contains(self, x: f32, y: f32) -> bool {
        (0.0..=self.width as f32).contains(&x) && (0.0..=self.height as f32).contains(&y)
    }

    pub fn check_point(self, x: f32, y: f32) -> Result<()> {
        if self.contains(x, y) {
            Ok(())
        } else {
            log::warn!("rejected sample point ({x}, {y}) for {self:?}");
            Err(NoiseError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Seed derived from the wall clock. Runs are not reproducible with it.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn unit_vector(angle: f32) -> GradientVector {
    Vec2::new(angle.cos(), angle.sin())
}

/// Dense lattice of `(width + 1) × (height + 1)` random unit gradients,
/// stored row-major in one buffer. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientGrid {
    dimensions: Dimensions,
    seed: Option<u64>,
    gradients: Vec<GradientVector>,
}

impl GradientGrid {
    pub fn build(dimensions: Dimensions) -> Self {
        Self::with_seed(dimensions, time_seed())
    }

    pub fn with_seed(dimensions: Dimensions, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let len = lattice_len(dimensions);
        let gradients = (0..len)
            .map(|_| unit_vector(rng.gen_range(0.0..TAU)))
            .collect();
        log::debug!(
            "built {}x{} gradient lattice from seed {seed}",
            dimensions.width as usize + 1,
            dimensions.height as usize + 1
        );
        Self {
            dimensions,
            seed: Some(seed),
            gradients,
        }
    }

    /// Wraps explicit gradients, given row-major. Lengths are not normalised.
    pub fn from_gradients(dimensions: Dimensions, gradients: Vec<GradientVector>) -> Result<Self> {
        let expected = lattice_len(dimensions);
        if gradients.len() != expected {
            return Err(NoiseError::LatticeSize {
                expected,
                got: gradients.len(),
            });
        }
        Ok(Self {
            dimensions,
            seed: None,
            gradients,
        })
    }

    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// `None` when the grid came from [`GradientGrid::from_gradients`].
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub const fn lattice_width(&self) -> usize {
        self.dimensions.width as usize + 1
    }

    pub const fn lattice_height(&self) -> usize {
        self.dimensions.height as usize + 1
    }

    /// Gradient at lattice column `i`, row `j`.
    ///
    /// # Panics
    /// If `(i, j)` is outside the lattice.
    pub fn gradient(&self, i: usize, j: usize) -> GradientVector {
        assert!(
            i < self.lattice_width() && j < self.lattice_height(),
            "lattice index ({i}, {j}) out of bounds"
        );
        self.gradients[j * self.lattice_width() + i]
    }

    pub fn gradients(&self) -> impl Iterator<Item = GradientVector> + '_ {
        self.gradients.iter().copied()
    }

    /// Noise value at `(x, y)`; see [`crate::sampler::sample`].
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        crate::sampler::sample(self, x, y)
    }
}

fn checked_lattice_len(width: u32, height: u32) -> Option<usize> {
    let columns = usize::try_from(width).ok()?.checked_add(1)?;
    let rows = usize::try_from(height).ok()?.checked_add(1)?;
    columns.checked_mul(rows)
}

// `Dimensions::new` has already proven this product fits.
fn lattice_len(dimensions: Dimensions) -> usize {
    (dimensions.width as usize + 1) * (dimensions.height as usize + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: i64, height: i64) -> Dimensions {
        Dimensions::new(width, height).unwrap()
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        for (w, h) in [(0, 3), (3, 0), (-1, 5), (5, -7), (0, 0)] {
            assert!(matches!(
                Dimensions::new(w, h),
                Err(NoiseError::InvalidDimension { width, height }) if width == w && height == h
            ));
        }
        assert!(Dimensions::new(i64::from(u32::MAX) + 1, 1).is_err());
        assert_eq!(dims(1, 1).width(), 1);
    }

    #[test]
    fn test_rejects_unaddressable_lattice() {
        let max = i64::from(u32::MAX);
        assert!(matches!(
            Dimensions::new(max, max),
            Err(NoiseError::InvalidDimension { width, height }) if width == max && height == max
        ));
        // 2^32 · 2^31 gradients of 8 bytes each do not fit in isize::MAX
        assert!(Dimensions::new(max, max / 2).is_err());
        assert_eq!(checked_lattice_len(u32::MAX, u32::MAX), None);
        assert_eq!(checked_lattice_len(2, 2), Some(9));
    }

    #[test]
    fn test_lattice_is_one_larger_than_grid() {
        let grid = GradientGrid::with_seed(dims(2, 2), 7);
        assert_eq!(grid.lattice_width(), 3);
        assert_eq!(grid.lattice_height(), 3);
        assert_eq!(grid.gradients().count(), 9);

        let grid = GradientGrid::with_seed(dims(4, 1), 7);
        assert_eq!(grid.lattice_width(), 5);
        assert_eq!(grid.lattice_height(), 2);
        assert_eq!(grid.gradients().count(), 10);
    }

    #[test]
    fn test_gradients_are_unit_length() {
        let grid = GradientGrid::with_seed(dims(16, 9), 99);
        for g in grid.gradients() {
            assert!((g.magnitude_squared() - 1.0).abs() < 1e-5, "{g:?}");
        }
    }

    #[test]
    fn test_same_seed_same_lattice() {
        let a = GradientGrid::with_seed(dims(6, 4), 12345);
        let b = GradientGrid::with_seed(dims(6, 4), 12345);
        assert_eq!(a, b);
        assert_eq!(a.seed(), Some(12345));

        let c = GradientGrid::with_seed(dims(6, 4), 54321);
        assert_ne!(a, c, "different seeds should give different lattices");
    }

    #[test]
    fn test_build_records_a_seed() {
        let grid = GradientGrid::build(dims(3, 3));
        assert!(grid.seed().is_some());
        assert_eq!(grid.gradients().count(), 16);
    }

    #[test]
    fn test_gradient_indexing_is_row_major() {
        let d = dims(2, 1);
        let gradients: Vec<_> = (0..6).map(|k| Vec2::new(k as f32, 0.0)).collect();
        let grid = GradientGrid::from_gradients(d, gradients).unwrap();
        assert_eq!(grid.gradient(0, 0).x, 0.0);
        assert_eq!(grid.gradient(2, 0).x, 2.0);
        assert_eq!(grid.gradient(0, 1).x, 3.0);
        assert_eq!(grid.gradient(2, 1).x, 5.0);
        assert_eq!(grid.seed(), None);
    }

    #[test]
    fn test_from_gradients_rejects_wrong_length() {
        let err = GradientGrid::from_gradients(dims(2, 2), vec![Vec2::unit_x(); 4]).unwrap_err();
        assert!(matches!(
            err,
            NoiseError::LatticeSize {
                expected: 9,
                got: 4
            }
        ));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_gradient_out_of_bounds_panics() {
        let grid = GradientGrid::with_seed(dims(2, 2), 1);
        let _ = grid.gradient(3, 0);
    }

    #[test]
    fn test_point_bounds_are_inclusive() {
        let d = dims(5, 5);
        assert!(d.contains(0.0, 0.0));
        assert!(d.contains(5.0, 5.0));
        assert!(d.contains(2.5, 4.99));
        assert!(!d.contains(5.01, 3.0));
        assert!(!d.contains(-0.01, 1.0));
        assert!(!d.contains(1.0, f32::NAN));
        assert!(d.check_point(5.0, 5.0).is_ok());
        assert!(matches!(
            d.check_point(5.01, 3.0),
            Err(NoiseError::OutOfRange { width: 5, height: 5, .. })
        ));
    }
}
