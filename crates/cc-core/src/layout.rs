use rayon::prelude::*;

use crate::color::Rgb;
use crate::error::CoreError;
use crate::grid::PixelGrid;

/// Dimensions of the near-square grid holding `symbol_count` pixels.
///
/// `width = ceil(sqrt(n))`, `height = ceil(n / width)`. An empty payload
/// gets a 1×1 grid holding one sentinel pixel.
///
/// # Errors
/// Returns [`CoreError::InvalidDimensions`] if a side does not fit in `u32`.
///
/// # Example
/// ```
/// use cc_core::layout::layout;
/// assert_eq!(layout(0).unwrap(), (1, 1));
/// assert_eq!(layout(100).unwrap(), (10, 10));
/// assert_eq!(layout(101).unwrap(), (11, 10));
/// ```
pub fn layout(symbol_count: usize) -> Result<(u32, u32), CoreError> {
    if symbol_count == 0 {
        return Ok((1, 1));
    }
    let mut width = symbol_count.isqrt();
    if width * width < symbol_count {
        width += 1;
    }
    let height = symbol_count.div_ceil(width);

    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(CoreError::InvalidDimensions {
            width: width as u64,
            height: height as u64,
        }),
    }
}

/// Write `colors` row-major into a `width`×`height` grid, sentinel elsewhere.
///
/// Pixel `i` lands at `(i % width, i / width)`. Colors past the grid's
/// capacity are dropped.
///
/// # Example
/// ```
/// use cc_core::color::{Rgb, SENTINEL};
/// use cc_core::layout::place;
/// let red = Rgb::new(255, 0, 0);
/// let grid = place(&[red, red, red], 2, 2);
/// assert_eq!(grid.pixel(0, 1), red);
/// assert_eq!(grid.pixel(1, 1), SENTINEL);
/// ```
#[must_use]
pub fn place(colors: &[Rgb], width: u32, height: u32) -> PixelGrid {
    let mut grid = PixelGrid::new(width, height);
    let row_px = width as usize;
    if row_px == 0 {
        return grid;
    }

    // Rows are independent; each band only reads its own slice of `colors`.
    grid.data
        .par_chunks_exact_mut(row_px * 4)
        .enumerate()
        .for_each(|(y, row)| {
            let start = (y * row_px).min(colors.len());
            let end = (start + row_px).min(colors.len());
            for (px, color) in row.chunks_exact_mut(4).zip(&colors[start..end]) {
                px.copy_from_slice(&color.to_rgba());
            }
        });

    grid
}

/// Read the grid back in the row-major order used by [`place`].
#[must_use]
pub fn extract(grid: &PixelGrid) -> Vec<Rgb> {
    grid.colors().collect()
}
