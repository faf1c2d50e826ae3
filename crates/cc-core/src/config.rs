use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::alphabet::Mode;
use crate::decoder::DecodeOptions;

/// Configuration de l'application, chargée depuis TOML.
///
/// Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use cc_core::config::AppConfig;
/// use cc_core::alphabet::Mode;
/// let config = AppConfig::default();
/// assert_eq!(config.mode, Mode::Hex);
/// assert!(config.scheme.is_none());
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct AppConfig {
    /// Mode d'encodage par défaut.
    pub mode: Mode,
    /// Scheme name or path used when `--scheme` is not given.
    pub scheme: Option<String>,
    /// Dossier des schemes nommés. None = `<exe_dir>/scheme`.
    pub scheme_dir: Option<PathBuf>,
    /// Part minimale [0.0, 1.0] de pixels reconnus pour accepter un décodage.
    pub min_hit_ratio: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Hex,
            scheme: None,
            scheme_dir: None,
            min_hit_ratio: 0.5,
        }
    }
}

impl AppConfig {
    /// Clamp numeric fields to their valid ranges.
    pub fn clamp_all(&mut self) {
        self.min_hit_ratio = self.min_hit_ratio.clamp(0.0, 1.0);
    }

    /// Decoder options derived from this config.
    #[must_use]
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            min_hit_ratio: self.min_hit_ratio,
        }
    }
}

/// Structure TOML intermédiaire, toutes les sections optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    codec: Option<CodecSection>,
}

/// Codec section, all fields optional for partial override.
#[derive(Deserialize)]
struct CodecSection {
    mode: Option<Mode>,
    scheme: Option<String>,
    scheme_dir: Option<PathBuf>,
    min_hit_ratio: Option<f32>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use cc_core::config::parse_config;
/// use cc_core::alphabet::Mode;
/// let config = parse_config("[codec]\nmode = \"8bit\"\n").unwrap();
/// assert_eq!(config.mode, Mode::Octal);
/// assert!((config.min_hit_ratio - 0.5).abs() < f32::EPSILON);
/// ```
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = AppConfig::default();
    if let Some(c) = file.codec {
        if let Some(v) = c.mode {
            config.mode = v;
        }
        if let Some(v) = c.scheme {
            config.scheme = Some(v);
        }
        if let Some(v) = c.scheme_dir {
            config.scheme_dir = Some(v);
        }
        if let Some(v) = c.min_hit_ratio {
            config.min_hit_ratio = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use cc_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/colorcode.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_fields() {
        let config = parse_config("[codec]\nscheme = \"monokai\"\nmin_hit_ratio = 0.9\n").unwrap();
        assert_eq!(config.scheme.as_deref(), Some("monokai"));
        assert!((config.min_hit_ratio - 0.9).abs() < f32::EPSILON);
        assert_eq!(config.mode, Mode::Hex);
        assert!(config.scheme_dir.is_none());
    }

    #[test]
    fn ratio_is_clamped() {
        let config = parse_config("[codec]\nmin_hit_ratio = 4.0\n").unwrap();
        assert!((config.min_hit_ratio - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn mode_aliases() {
        assert_eq!(parse_config("[codec]\nmode = \"octal\"\n").unwrap().mode, Mode::Octal);
        assert_eq!(parse_config("[codec]\nmode = \"16bit\"\n").unwrap().mode, Mode::Hex);
        assert!(parse_config("[codec]\nmode = \"32bit\"\n").is_err());
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colorcode.toml");
        std::fs::write(&path, "[codec]\nscheme_dir = \"/opt/schemes\"\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.scheme_dir, Some(PathBuf::from("/opt/schemes")));
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }
}
