use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use crate::alphabet::Mode;
use crate::color::{BLACK, Rgb, SENTINEL};
use crate::error::CoreError;

/// Palette 16 couleurs par défaut (mode hex).
pub const DEFAULT_HEX: [(u8, Rgb); 16] = [
    (b'0', Rgb::new(0, 0, 0)),
    (b'1', Rgb::new(255, 128, 0)),
    (b'2', Rgb::new(255, 0, 0)),
    (b'3', Rgb::new(0, 255, 0)),
    (b'4', Rgb::new(0, 0, 255)),
    (b'5', Rgb::new(255, 255, 0)),
    (b'6', Rgb::new(255, 0, 255)),
    (b'7', Rgb::new(0, 255, 255)),
    (b'8', Rgb::new(128, 128, 128)),
    (b'9', Rgb::new(192, 192, 192)),
    (b'a', Rgb::new(128, 0, 0)),
    (b'b', Rgb::new(0, 128, 0)),
    (b'c', Rgb::new(0, 0, 128)),
    (b'd', Rgb::new(128, 128, 0)),
    (b'e', Rgb::new(128, 0, 128)),
    (b'f', Rgb::new(0, 128, 128)),
];

/// Palette 8 couleurs par défaut (mode octal).
///
/// Disjoint from [`DEFAULT_HEX`] so that mode detection never sees a tie
/// on an octal image.
pub const DEFAULT_OCTAL: [(u8, Rgb); 8] = [
    (b'0', Rgb::new(64, 64, 64)),
    (b'1', Rgb::new(255, 192, 203)),
    (b'2', Rgb::new(192, 64, 64)),
    (b'3', Rgb::new(64, 192, 64)),
    (b'4', Rgb::new(64, 64, 192)),
    (b'5', Rgb::new(192, 192, 64)),
    (b'6', Rgb::new(192, 64, 192)),
    (b'7', Rgb::new(64, 192, 192)),
];

/// One mode's symbol → color map and its inverse.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Palette {
    forward: BTreeMap<u8, Rgb>,
    inverse: HashMap<Rgb, u8>,
}

impl Palette {
    fn new(forward: BTreeMap<u8, Rgb>) -> Self {
        let mut inverse = HashMap::with_capacity(forward.len());
        // BTreeMap iterates by ascending symbol: on a color collision the
        // lowest symbol keeps the slot.
        for (&symbol, &color) in &forward {
            inverse.entry(color).or_insert(symbol);
        }
        Self { forward, inverse }
    }

    fn from_entries(entries: &[(u8, Rgb)]) -> Self {
        Self::new(entries.iter().copied().collect())
    }
}

/// Bidirectional symbol ↔ color mapping for both modes.
///
/// Immutable once built; loading a scheme produces a new table.
///
/// # Example
/// ```
/// use cc_core::alphabet::Mode;
/// use cc_core::color::Rgb;
/// use cc_core::scheme::ColorTable;
///
/// let table = ColorTable::default();
/// let c = table.color_for(b'4', Mode::Hex);
/// assert_eq!(c, Rgb::new(0, 0, 255));
/// assert_eq!(table.symbol_for(c, Mode::Hex), Some(b'4'));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorTable {
    hex: Palette,
    octal: Palette,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            hex: Palette::from_entries(&DEFAULT_HEX),
            octal: Palette::from_entries(&DEFAULT_OCTAL),
        }
    }
}

impl ColorTable {
    /// Build a table from explicit maps, without validation.
    ///
    /// See [`ColorTable::validate`] for the bijectivity check.
    #[must_use]
    pub fn new(hex: BTreeMap<u8, Rgb>, octal: BTreeMap<u8, Rgb>) -> Self {
        Self {
            hex: Palette::new(hex),
            octal: Palette::new(octal),
        }
    }

    fn palette(&self, mode: Mode) -> &Palette {
        match mode {
            Mode::Hex => &self.hex,
            Mode::Octal => &self.octal,
        }
    }

    /// Color of `symbol`, or black if the table has no entry for it.
    #[inline]
    #[must_use]
    pub fn color_for(&self, symbol: u8, mode: Mode) -> Rgb {
        self.get(symbol, mode).unwrap_or(BLACK)
    }

    /// Color of `symbol`, `None` on a lookup miss.
    #[inline]
    #[must_use]
    pub fn get(&self, symbol: u8, mode: Mode) -> Option<Rgb> {
        self.palette(mode).forward.get(&symbol).copied()
    }

    /// Inverse lookup.
    #[inline]
    #[must_use]
    pub fn symbol_for(&self, color: Rgb, mode: Mode) -> Option<u8> {
        self.palette(mode).inverse.get(&color).copied()
    }

    /// Entries of one mode, ordered by symbol.
    pub fn entries(&self, mode: Mode) -> impl Iterator<Item = (u8, Rgb)> + '_ {
        self.palette(mode).forward.iter().map(|(&s, &c)| (s, c))
    }

    /// Number of symbols mapped for `mode`.
    #[must_use]
    pub fn len(&self, mode: Mode) -> usize {
        self.palette(mode).forward.len()
    }

    /// True if `mode` has no entry at all.
    #[must_use]
    pub fn is_empty(&self, mode: Mode) -> bool {
        self.palette(mode).forward.is_empty()
    }

    /// Check that each mode is a bijection and never uses the sentinel.
    ///
    /// # Errors
    /// Returns [`CoreError::Format`] naming the first offending entry.
    pub fn validate(&self) -> Result<(), CoreError> {
        for mode in Mode::ALL {
            let mut seen: HashMap<Rgb, u8> = HashMap::new();
            for (symbol, color) in self.entries(mode) {
                if color == SENTINEL {
                    return Err(CoreError::format(format!(
                        "[{mode}] '{}' utilise la couleur réservée {SENTINEL}",
                        char::from(symbol)
                    )));
                }
                if let Some(prev) = seen.insert(color, symbol) {
                    return Err(CoreError::format(format!(
                        "[{mode}] couleur {color} partagée par '{}' et '{}'",
                        char::from(prev),
                        char::from(symbol)
                    )));
                }
            }
        }
        Ok(())
    }

    /// Colors that appear in both the hex and octal maps.
    #[must_use]
    pub fn shared_colors(&self) -> Vec<Rgb> {
        let mut shared: Vec<Rgb> = self
            .hex
            .inverse
            .keys()
            .filter(|c| self.octal.inverse.contains_key(c))
            .copied()
            .collect();
        shared.sort_unstable();
        shared
    }

    /// Serialize back to the scheme text format.
    ///
    /// # Example
    /// ```
    /// use cc_core::scheme::{load_table, ColorTable};
    /// let table = ColorTable::default();
    /// let text = table.to_scheme_string();
    /// assert!(text.contains("[8bit]"));
    /// assert_eq!(load_table(&text).unwrap().table, table);
    /// ```
    #[must_use]
    pub fn to_scheme_string(&self) -> String {
        let mut out = String::from(
            "# Color Scheme Configuration\n\
             # Format: character=red,green,blue\n\
             # RGB values range from 0 to 255\n",
        );
        for mode in [Mode::Octal, Mode::Hex] {
            let _ = write!(out, "\n[{}]\n", mode.label());
            for (symbol, c) in self.entries(mode) {
                let _ = writeln!(out, "{}={},{},{}", char::from(symbol), c.r, c.g, c.b);
            }
        }
        out
    }
}

/// Diagnostics collected while parsing a scheme.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Non-blank, non-comment lines that were neither a section nor a valid entry.
    pub skipped_lines: usize,
    /// Valid entries found outside `[8bit]` / `[16bit]`.
    pub discarded_entries: usize,
    /// Distinct symbols read in `[16bit]`.
    pub hex_entries: usize,
    /// Distinct symbols read in `[8bit]`.
    pub octal_entries: usize,
}

impl LoadReport {
    /// True if the scheme replaced the default map of `mode`.
    #[must_use]
    pub fn overrides(&self, mode: Mode) -> bool {
        match mode {
            Mode::Hex => self.hex_entries > 0,
            Mode::Octal => self.octal_entries > 0,
        }
    }
}

/// Result of [`load_table`].
#[derive(Clone, Debug)]
pub struct LoadedScheme {
    /// The active table.
    pub table: ColorTable,
    /// What the parser kept and skipped.
    pub report: LoadReport,
}

enum Line<'a> {
    Ignored,
    Section(&'a str),
    Entry(u8, Rgb),
    Malformed,
}

fn classify(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Line::Ignored;
    }
    if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
        return Line::Section(&line[1..line.len() - 1]);
    }
    parse_entry(line).map_or(Line::Malformed, |(k, c)| Line::Entry(k, c))
}

fn parse_entry(line: &str) -> Option<(u8, Rgb)> {
    let mut parts = line.split('=');
    let (key, value) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let &[key] = key.as_bytes() else {
        return None;
    };

    let mut channels = value.split(',');
    let r = channels.next()?.parse::<u8>().ok()?;
    let g = channels.next()?.parse::<u8>().ok()?;
    let b = channels.next()?.parse::<u8>().ok()?;
    if channels.next().is_some() {
        return None;
    }
    Some((key, Rgb::new(r, g, b)))
}

/// Parse a scheme file over the built-in defaults.
///
/// Lenient: malformed lines are counted in [`LoadReport::skipped_lines`] and
/// otherwise ignored. A mode whose section yields no entry keeps its default
/// palette.
///
/// # Errors
/// Returns [`CoreError::Format`] if the resulting table maps two symbols of
/// one mode to the same color, or assigns the sentinel color.
///
/// # Example
/// ```
/// use cc_core::alphabet::Mode;
/// use cc_core::color::Rgb;
/// use cc_core::scheme::{load_table, ColorTable};
///
/// let loaded = load_table("[8bit]\n0=10,20,30\nxy=1,2,3\n").unwrap();
/// assert_eq!(loaded.table.color_for(b'0', Mode::Octal), Rgb::new(10, 20, 30));
/// assert_eq!(loaded.table.len(Mode::Octal), 1);
/// assert_eq!(loaded.report.skipped_lines, 1);
/// // [16bit] absent : palette par défaut conservée.
/// assert_eq!(
///     loaded.table.color_for(b'a', Mode::Hex),
///     ColorTable::default().color_for(b'a', Mode::Hex)
/// );
/// ```
pub fn load_table(source: &str) -> Result<LoadedScheme, CoreError> {
    let mut hex = BTreeMap::new();
    let mut octal = BTreeMap::new();
    let mut report = LoadReport::default();
    let mut section: Option<Mode> = None;

    for (lineno, raw) in source.lines().enumerate() {
        match classify(raw) {
            Line::Ignored => {}
            Line::Section(name) => {
                section = match name {
                    "8bit" => Some(Mode::Octal),
                    "16bit" => Some(Mode::Hex),
                    other => {
                        log::debug!("scheme: section inconnue [{other}] ligne {}", lineno + 1);
                        None
                    }
                };
            }
            Line::Entry(symbol, color) => match section {
                Some(Mode::Hex) => {
                    hex.insert(symbol, color);
                }
                Some(Mode::Octal) => {
                    octal.insert(symbol, color);
                }
                None => report.discarded_entries += 1,
            },
            Line::Malformed => {
                log::debug!("scheme: ligne {} ignorée : {raw:?}", lineno + 1);
                report.skipped_lines += 1;
            }
        }
    }

    report.hex_entries = hex.len();
    report.octal_entries = octal.len();

    let defaults = ColorTable::default();
    let table = ColorTable {
        hex: if hex.is_empty() { defaults.hex } else { Palette::new(hex) },
        octal: if octal.is_empty() {
            defaults.octal
        } else {
            Palette::new(octal)
        },
    };
    table.validate()?;

    for mode in Mode::ALL {
        for (symbol, _) in table.entries(mode) {
            if mode.digit_value(symbol).is_none() {
                log::warn!(
                    "scheme: '{}' n'appartient pas à l'alphabet {mode}, jamais utilisé",
                    char::from(symbol)
                );
            }
        }
    }
    let shared = table.shared_colors();
    if !shared.is_empty() {
        log::warn!(
            "scheme: {} couleur(s) communes à 8bit et 16bit, la détection du mode peut échouer",
            shared.len()
        );
    }
    if report.skipped_lines > 0 {
        log::info!("scheme: {} ligne(s) invalide(s) ignorée(s)", report.skipped_lines);
    }

    Ok(LoadedScheme { table, report })
}
