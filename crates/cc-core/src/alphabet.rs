use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Alphabet hexadécimal, dans l'ordre des valeurs.
pub const HEX_ALPHABET: &[u8; 16] = b"0123456789abcdef";

/// Alphabet octal, dans l'ordre des valeurs.
pub const OCTAL_ALPHABET: &[u8; 8] = b"01234567";

/// Textual base used to spell out each byte.
///
/// # Example
/// ```
/// use cc_core::alphabet::Mode;
/// assert_eq!(Mode::default(), Mode::Hex);
/// assert_eq!(Mode::Octal.group_len(), 3);
/// assert_eq!("8bit".parse::<Mode>().unwrap(), Mode::Octal);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Mode {
    /// Base 16, 2 symbols per byte.
    #[default]
    #[serde(rename = "16bit", alias = "hex")]
    Hex,
    /// Base 8, 3 symbols per byte.
    #[serde(rename = "8bit", alias = "octal")]
    Octal,
}

impl Mode {
    /// Both modes, hex first (tie-break order of the decoder).
    pub const ALL: [Mode; 2] = [Mode::Hex, Mode::Octal];

    /// Symbols needed to spell one byte.
    #[must_use]
    pub const fn group_len(self) -> usize {
        match self {
            Mode::Hex => 2,
            Mode::Octal => 3,
        }
    }

    /// Numeric base of the mode.
    #[must_use]
    pub const fn radix(self) -> u32 {
        match self {
            Mode::Hex => 16,
            Mode::Octal => 8,
        }
    }

    /// The symbols of this mode, ordered by value.
    #[must_use]
    pub fn alphabet(self) -> &'static [u8] {
        match self {
            Mode::Hex => HEX_ALPHABET,
            Mode::Octal => OCTAL_ALPHABET,
        }
    }

    /// Scheme-file section name (`16bit` / `8bit`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Mode::Hex => "16bit",
            Mode::Octal => "8bit",
        }
    }

    /// Value of `symbol` in this alphabet, `None` if it is not part of it.
    #[inline(always)]
    #[must_use]
    pub fn digit_value(self, symbol: u8) -> Option<u8> {
        let v = match symbol {
            b'0'..=b'9' => symbol - b'0',
            b'a'..=b'f' => symbol - b'a' + 10,
            _ => return None,
        };
        (u32::from(v) < self.radix()).then_some(v)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "16bit" | "16" | "hex" => Ok(Mode::Hex),
            "8bit" | "8" | "octal" => Ok(Mode::Octal),
            other => Err(CoreError::format(format!(
                "mode inconnu '{other}' (attendu 8bit ou 16bit)"
            ))),
        }
    }
}

/// Spell every byte as a fixed-width group of symbols.
///
/// Hex gives two lowercase digits per byte, high nibble first. Octal gives
/// three zero-padded digits per byte.
///
/// # Example
/// ```
/// use cc_core::alphabet::{bytes_to_symbols, Mode};
/// assert_eq!(bytes_to_symbols(b"A", Mode::Hex), b"41");
/// assert_eq!(bytes_to_symbols(&[8, 255], Mode::Octal), b"010377");
/// ```
#[must_use]
pub fn bytes_to_symbols(bytes: &[u8], mode: Mode) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() * mode.group_len());
    match mode {
        Mode::Hex => {
            for &b in bytes {
                out.push(HEX_ALPHABET[usize::from(b >> 4)]);
                out.push(HEX_ALPHABET[usize::from(b & 0x0f)]);
            }
        }
        Mode::Octal => {
            for &b in bytes {
                out.push(OCTAL_ALPHABET[usize::from(b >> 6)]);
                out.push(OCTAL_ALPHABET[usize::from((b >> 3) & 0o7)]);
                out.push(OCTAL_ALPHABET[usize::from(b & 0o7)]);
            }
        }
    }
    out
}

/// Parse fixed-width symbol groups back into bytes.
///
/// # Errors
/// Returns [`CoreError::Format`] if the length is not a multiple of the group
/// size, if a symbol is outside the alphabet, or if an octal group exceeds 255.
///
/// # Example
/// ```
/// use cc_core::alphabet::{symbols_to_bytes, Mode};
/// assert_eq!(symbols_to_bytes(b"41", Mode::Hex).unwrap(), b"A");
/// assert!(symbols_to_bytes(b"777", Mode::Octal).is_err());
/// ```
pub fn symbols_to_bytes(symbols: &[u8], mode: Mode) -> Result<Vec<u8>, CoreError> {
    let group = mode.group_len();
    if symbols.len() % group != 0 {
        return Err(CoreError::format(format!(
            "{} symboles ne forment pas des groupes de {group} ({mode})",
            symbols.len()
        )));
    }

    symbols
        .chunks_exact(group)
        .map(|chunk| {
            let mut value = 0u32;
            for &s in chunk {
                let digit = mode.digit_value(s).ok_or_else(|| {
                    CoreError::format(format!(
                        "symbole invalide {:?} dans le groupe {:?} ({mode})",
                        char::from(s),
                        String::from_utf8_lossy(chunk)
                    ))
                })?;
                value = value * mode.radix() + u32::from(digit);
            }
            u8::try_from(value).map_err(|_| {
                CoreError::format(format!(
                    "groupe {:?} hors de l'intervalle d'un octet",
                    String::from_utf8_lossy(chunk)
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_sizes() {
        let data: Vec<u8> = (0..=255).collect();
        assert_eq!(bytes_to_symbols(&data, Mode::Hex).len(), 2 * data.len());
        assert_eq!(bytes_to_symbols(&data, Mode::Octal).len(), 3 * data.len());
        assert!(bytes_to_symbols(&[], Mode::Octal).is_empty());
    }

    #[test]
    fn every_byte_roundtrips() {
        let data: Vec<u8> = (0..=255).collect();
        for mode in Mode::ALL {
            let symbols = bytes_to_symbols(&data, mode);
            assert!(symbols.iter().all(|s| mode.alphabet().contains(s)));
            assert_eq!(symbols_to_bytes(&symbols, mode).unwrap(), data);
        }
    }

    #[test]
    fn matches_standard_formatting() {
        for b in [0u8, 7, 8, 64, 100, 200, 255] {
            let hex = bytes_to_symbols(&[b], Mode::Hex);
            assert_eq!(hex, format!("{b:02x}").into_bytes());
            let oct = bytes_to_symbols(&[b], Mode::Octal);
            assert_eq!(oct, format!("{b:03o}").into_bytes());
        }
    }

    #[test]
    fn rejects_ragged_length() {
        assert!(matches!(
            symbols_to_bytes(b"414", Mode::Hex),
            Err(CoreError::Format(_))
        ));
        assert!(symbols_to_bytes(b"0101", Mode::Octal).is_err());
    }

    #[test]
    fn rejects_out_of_alphabet() {
        assert!(symbols_to_bytes(b"4g", Mode::Hex).is_err());
        assert!(symbols_to_bytes(b"4A", Mode::Hex).is_err());
        assert!(symbols_to_bytes(b"018", Mode::Octal).is_err());
        assert!(symbols_to_bytes(b"400", Mode::Octal).is_err());
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("16bit".parse::<Mode>().unwrap(), Mode::Hex);
        assert_eq!(" HEX ".parse::<Mode>().unwrap(), Mode::Hex);
        assert_eq!("octal".parse::<Mode>().unwrap(), Mode::Octal);
        assert!("32bit".parse::<Mode>().is_err());
        assert_eq!(Mode::Octal.to_string(), "8bit");
    }
}
