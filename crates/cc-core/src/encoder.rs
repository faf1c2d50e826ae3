use crate::alphabet::{Mode, bytes_to_symbols};
use crate::color::Rgb;
use crate::error::CoreError;
use crate::grid::PixelGrid;
use crate::layout::{layout, place};
use crate::scheme::ColorTable;

/// Encode `bytes` into a pixel grid.
///
/// bytes → symbols → colors → near-square grid padded with the sentinel.
/// Symbols missing from `table` are painted black.
///
/// # Errors
/// Returns [`CoreError::InvalidDimensions`] if the payload is too large for a
/// `u32`-sized grid.
///
/// # Example
/// ```
/// use cc_core::alphabet::Mode;
/// use cc_core::encoder::encode;
/// use cc_core::scheme::ColorTable;
///
/// let table = ColorTable::default();
/// let grid = encode(b"A", Mode::Hex, &table).unwrap();
/// assert_eq!((grid.width, grid.height), (2, 1));
/// assert_eq!(grid.pixel(0, 0), table.color_for(b'4', Mode::Hex));
/// assert_eq!(grid.pixel(1, 0), table.color_for(b'1', Mode::Hex));
/// ```
pub fn encode(bytes: &[u8], mode: Mode, table: &ColorTable) -> Result<PixelGrid, CoreError> {
    let symbols = bytes_to_symbols(bytes, mode);

    let mut misses = 0usize;
    let colors: Vec<Rgb> = symbols
        .iter()
        .map(|&s| {
            if table.get(s, mode).is_none() {
                misses += 1;
            }
            table.color_for(s, mode)
        })
        .collect();
    if misses > 0 {
        log::warn!("{misses} symbole(s) absents du schéma {mode}, remplacés par du noir");
    }

    let (width, height) = layout(symbols.len())?;
    log::debug!(
        "encode: {} octets → {} symboles {mode} → {width}×{height}",
        bytes.len(),
        symbols.len()
    );
    Ok(place(&colors, width, height))
}
