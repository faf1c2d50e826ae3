use crate::alphabet::{Mode, symbols_to_bytes};
use crate::color::SENTINEL;
use crate::error::CoreError;
use crate::grid::PixelGrid;
use crate::layout::extract;
use crate::scheme::ColorTable;

/// Tuning of the mode-detection heuristic.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DecodeOptions {
    /// Minimum share [0.0, 1.0] of non-sentinel pixels the winning mode must
    /// recognize. 0.0 accepts any majority.
    pub min_hit_ratio: f32,
}

/// Per-pixel classification counts of one decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Pixels found in the hex inverse table.
    pub hex_hits: usize,
    /// Pixels found in the octal inverse table.
    pub octal_hits: usize,
    /// Padding pixels.
    pub sentinel_pixels: usize,
    /// Non-sentinel pixels known to neither table.
    pub unmatched_pixels: usize,
    /// Pixels that carry data (everything but the sentinel).
    pub data_pixels: usize,
}

impl DecodeStats {
    /// Hit count of `mode`.
    #[must_use]
    pub fn hits(&self, mode: Mode) -> usize {
        match mode {
            Mode::Hex => self.hex_hits,
            Mode::Octal => self.octal_hits,
        }
    }
}

/// Bytes recovered from a grid, with the mode that was detected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// Recovered payload.
    pub bytes: Vec<u8>,
    /// Detected mode.
    pub mode: Mode,
    /// Classification counts.
    pub stats: DecodeStats,
}

/// Decode a grid with the plain majority heuristic.
///
/// # Errors
/// Returns [`CoreError::Format`] if the winning symbol sequence does not
/// parse back into bytes.
///
/// # Example
/// ```
/// use cc_core::alphabet::Mode;
/// use cc_core::decoder::decode;
/// use cc_core::grid::PixelGrid;
/// use cc_core::scheme::ColorTable;
///
/// let table = ColorTable::default();
/// let mut grid = PixelGrid::new(2, 1);
/// grid.set(0, 0, table.color_for(b'4', Mode::Hex));
/// grid.set(1, 0, table.color_for(b'1', Mode::Hex));
/// let decoded = decode(&grid, &table).unwrap();
/// assert_eq!(decoded.bytes, b"A");
/// assert_eq!(decoded.mode, Mode::Hex);
/// ```
pub fn decode(grid: &PixelGrid, table: &ColorTable) -> Result<Decoded, CoreError> {
    decode_with(grid, table, &DecodeOptions::default())
}

/// Decode a grid, rejecting weak mode detections per `options`.
///
/// Every non-sentinel pixel is looked up in both inverse tables and feeds
/// whichever candidate sequence knows it. The candidate with more hits wins;
/// hex wins ties.
///
/// # Errors
/// Returns [`CoreError::Format`] if the winner's hit ratio is below
/// `options.min_hit_ratio`, or if its symbols do not parse back into bytes.
pub fn decode_with(
    grid: &PixelGrid,
    table: &ColorTable,
    options: &DecodeOptions,
) -> Result<Decoded, CoreError> {
    let pixels = extract(grid);

    let mut stats = DecodeStats::default();
    let mut hex = Vec::with_capacity(pixels.len());
    let mut octal = Vec::with_capacity(pixels.len());

    for color in pixels {
        if color == SENTINEL {
            stats.sentinel_pixels += 1;
            continue;
        }
        stats.data_pixels += 1;
        let h = table.symbol_for(color, Mode::Hex);
        let o = table.symbol_for(color, Mode::Octal);
        if let Some(s) = h {
            hex.push(s);
            stats.hex_hits += 1;
        }
        if let Some(s) = o {
            octal.push(s);
            stats.octal_hits += 1;
        }
        if h.is_none() && o.is_none() {
            stats.unmatched_pixels += 1;
        }
    }

    let (mode, symbols) = if stats.hex_hits >= stats.octal_hits {
        (Mode::Hex, hex)
    } else {
        (Mode::Octal, octal)
    };
    log::info!(
        "Mode {mode} détecté ({} hex / {} octal, {} inconnus, {} padding)",
        stats.hex_hits,
        stats.octal_hits,
        stats.unmatched_pixels,
        stats.sentinel_pixels
    );

    if options.min_hit_ratio > 0.0 && stats.data_pixels > 0 {
        let ratio = stats.hits(mode) as f32 / stats.data_pixels as f32;
        if ratio < options.min_hit_ratio {
            return Err(CoreError::format(format!(
                "seulement {:.0}% des pixels reconnus en {mode} (minimum {:.0}%)",
                ratio * 100.0,
                options.min_hit_ratio * 100.0
            )));
        }
    }

    let bytes = symbols_to_bytes(&symbols, mode)?;
    Ok(Decoded { bytes, mode, stats })
}
