use crate::color::{Rgb, SENTINEL};
use crate::error::CoreError;

/// Grille de pixels encodée. RGBA row-major, 4 bytes par pixel, alpha toujours 255.
///
/// # Example
/// ```
/// use cc_core::grid::PixelGrid;
/// use cc_core::color::SENTINEL;
/// let grid = PixelGrid::new(10, 10);
/// assert_eq!(grid.data.len(), 400);
/// assert_eq!(grid.pixel(9, 9), SENTINEL);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelGrid {
    /// Crée une grille remplie de la couleur sentinelle.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            data: SENTINEL.to_rgba().repeat(len),
            width,
            height,
        }
    }

    /// Wrap an existing RGBA buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if `data` is not exactly
    /// `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        let grid = Self {
            data,
            width,
            height,
        };
        if !grid.is_consistent() {
            return Err(CoreError::InvalidDimensions {
                width: u64::from(width),
                height: u64::from(height),
            });
        }
        Ok(grid)
    }

    /// Number of pixels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len() / 4
    }

    /// True for a grid without pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True when `data` holds exactly `width * height` RGBA pixels.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.data.len() == self.width as usize * self.height as usize * 4
    }

    /// Couleur du pixel (x, y), alpha ignoré.
    ///
    /// # Panics
    /// Panics if `(x, y)` lies outside the grid.
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Rgb::new(self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    /// Écrit un pixel opaque en (x, y).
    ///
    /// # Panics
    /// Panics if `(x, y)` lies outside the grid.
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, color: Rgb) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&color.to_rgba());
    }

    /// Row-major iterator over pixel colors.
    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data
            .chunks_exact(4)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
    }
}
