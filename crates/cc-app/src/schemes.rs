use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use anyhow::{Context, Result};
use cc_core::scheme::{ColorTable, LoadedScheme, load_table};

/// Nom du scheme par défaut, à côté de l'exécutable.
pub const DEFAULT_SCHEME_FILE: &str = "scheme.ini";

/// Finds scheme files relative to a base directory (normally the executable's).
#[derive(Clone, Debug)]
pub struct SchemeLocator {
    base_dir: PathBuf,
    scheme_dir: PathBuf,
}

impl SchemeLocator {
    /// `scheme_dir` defaults to `<base_dir>/scheme`.
    #[must_use]
    pub fn new(base_dir: PathBuf, scheme_dir: Option<PathBuf>) -> Self {
        let scheme_dir = scheme_dir.unwrap_or_else(|| base_dir.join("scheme"));
        Self {
            base_dir,
            scheme_dir,
        }
    }

    /// Locator rooted at the running executable's directory.
    ///
    /// # Errors
    /// Returns an error if the executable path cannot be determined.
    pub fn from_exe(scheme_dir: Option<PathBuf>) -> Result<Self> {
        let exe = std::env::current_exe().context("Chemin de l'exécutable introuvable")?;
        let base = exe
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Ok(Self::new(base, scheme_dir))
    }

    /// Directory searched for named schemes.
    #[must_use]
    pub fn scheme_dir(&self) -> &Path {
        &self.scheme_dir
    }

    /// Path of the default `scheme.ini`.
    #[must_use]
    pub fn default_path(&self) -> PathBuf {
        self.base_dir.join(DEFAULT_SCHEME_FILE)
    }

    /// A name with a path separator or an `.ini` suffix is a path; anything
    /// else is looked up as `<scheme_dir>/<name>.ini`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> PathBuf {
        if name.contains(MAIN_SEPARATOR) || name.contains('/') || name.ends_with(".ini") {
            PathBuf::from(name)
        } else {
            self.scheme_dir.join(format!("{name}.ini"))
        }
    }

    /// Load a named scheme or scheme path.
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable, or invalid.
    pub fn load_named(&self, name: &str) -> Result<LoadedScheme> {
        let path = self.resolve(name);
        if !path.exists() {
            anyhow::bail!("Scheme introuvable : {}", path.display());
        }
        load_file(&path)
    }

    /// Load `scheme.ini`, creating it from the built-in palettes if absent.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written, read, or parsed.
    pub fn load_default(&self) -> Result<LoadedScheme> {
        let path = self.default_path();
        if path.exists() {
            return load_file(&path);
        }

        let table = ColorTable::default();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Impossible de créer {}", dir.display()))?;
        }
        fs::write(&path, table.to_scheme_string())
            .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
        log::info!("Scheme par défaut créé : {}", path.display());
        Ok(LoadedScheme {
            table,
            report: cc_core::LoadReport::default(),
        })
    }

    /// `*.ini` files of the scheme directory as (name, path), sorted by name.
    ///
    /// # Errors
    /// Returns an error if the scheme directory is missing or unreadable.
    pub fn list(&self) -> Result<Vec<(String, PathBuf)>> {
        let entries = fs::read_dir(&self.scheme_dir).with_context(|| {
            format!(
                "Dossier de schemes introuvable : {}",
                self.scheme_dir.display()
            )
        })?;

        let mut schemes: Vec<(String, PathBuf)> = entries
            .filter_map(std::result::Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "ini"))
            .filter_map(|p| {
                let name = p.file_stem()?.to_str()?.to_string();
                Some((name, p))
            })
            .collect();
        schemes.sort();
        Ok(schemes)
    }
}

/// Read and parse one scheme file.
///
/// # Errors
/// Returns an error if the file cannot be read or violates table invariants.
pub fn load_file(path: &Path) -> Result<LoadedScheme> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let loaded =
        load_table(&text).with_context(|| format!("Scheme invalide : {}", path.display()))?;
    log::info!(
        "Scheme chargé depuis {} ({} lignes ignorées)",
        path.display(),
        loaded.report.skipped_lines
    );
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_core::{Mode, Rgb};

    #[test]
    fn resolve_names_and_paths() {
        let loc = SchemeLocator::new(PathBuf::from("/opt/cc"), None);
        assert_eq!(loc.resolve("monokai"), PathBuf::from("/opt/cc/scheme/monokai.ini"));
        assert_eq!(loc.resolve("custom.ini"), PathBuf::from("custom.ini"));
        assert_eq!(loc.resolve("themes/x"), PathBuf::from("themes/x"));

        let other = SchemeLocator::new(PathBuf::from("/opt/cc"), Some(PathBuf::from("/s")));
        assert_eq!(other.resolve("a"), PathBuf::from("/s/a.ini"));
    }

    #[test]
    fn default_scheme_is_created_then_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let loc = SchemeLocator::new(dir.path().to_path_buf(), None);

        let first = loc.load_default().unwrap();
        assert!(loc.default_path().exists());
        assert_eq!(first.table, ColorTable::default());

        fs::write(loc.default_path(), "[16bit]\n0=9,9,9\n").unwrap();
        let second = loc.load_default().unwrap();
        assert_eq!(second.table.get(b'0', Mode::Hex), Some(Rgb::new(9, 9, 9)));
        assert_eq!(second.table.len(Mode::Octal), 8);
    }

    #[test]
    fn named_schemes_are_listed_and_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let loc = SchemeLocator::new(dir.path().to_path_buf(), None);
        assert!(loc.list().is_err());

        fs::create_dir_all(loc.scheme_dir()).unwrap();
        fs::write(loc.scheme_dir().join("zen.ini"), "[8bit]\n0=1,2,3\n").unwrap();
        fs::write(loc.scheme_dir().join("acid.ini"), "[16bit]\nf=4,5,6\n").unwrap();
        fs::write(loc.scheme_dir().join("notes.txt"), "ignored").unwrap();

        let names: Vec<String> = loc.list().unwrap().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["acid", "zen"]);

        let zen = loc.load_named("zen").unwrap();
        assert_eq!(zen.table.get(b'0', Mode::Octal), Some(Rgb::new(1, 2, 3)));
        assert!(loc.load_named("missing").is_err());
    }

    #[test]
    fn invalid_scheme_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ini");
        fs::write(&path, "[16bit]\n0=255,255,255\n").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("bad.ini"));
    }

    #[test]
    fn bundled_monokai_is_valid() {
        let loaded = load_table(include_str!("../../../scheme/monokai.ini")).unwrap();
        assert_eq!(loaded.report.skipped_lines, 0);
        assert_eq!(loaded.table.len(Mode::Hex), 16);
        assert_eq!(loaded.table.len(Mode::Octal), 8);
        assert!(loaded.table.shared_colors().is_empty());
    }
}
