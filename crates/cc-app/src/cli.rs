use std::path::{Path, PathBuf};

use clap::Parser;

/// colorcode — encode n'importe quel fichier en image, et inversement.
#[derive(Parser, Debug)]
#[command(name = "colorcode", version, about, long_about = None)]
pub struct Cli {
    /// Fichier à encoder, ou image à reconstruire avec --re.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Fichier de sortie. Défaut : <input>_encoded.png ou <input>_decoded.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Mode de couleur : 8bit ou 16bit. Défaut : valeur de la config.
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Reconstruire le fichier depuis une image.
    #[arg(long = "re", visible_alias = "reconstruct", default_value_t = false)]
    pub reconstruct: bool,

    /// Scheme de couleurs : nom (dossier scheme/) ou chemin vers un .ini.
    #[arg(long = "sch", visible_alias = "scheme")]
    pub scheme: Option<String>,

    /// Lister les schemes disponibles avec un aperçu.
    #[arg(long = "sch-list", visible_alias = "list-schemes", default_value_t = false)]
    pub list_schemes: bool,

    /// Fichier de configuration TOML.
    #[arg(short, long, default_value = "config/colorcode.toml")]
    pub config: PathBuf,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// The input path, required by both encode and reconstruct.
    ///
    /// # Errors
    /// Returns a usage error if `--input` is missing.
    pub fn require_input(&self) -> anyhow::Result<&Path> {
        self.input.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Aucun fichier d'entrée.\n  \
                 Encoder : colorcode -i <fichier> [-o <sortie.png>] [-m 8bit|16bit] [--sch <scheme>]\n  \
                 Décoder : colorcode --re -i <image.png> [-o <fichier>]\n  \
                 Schemes : colorcode --sch-list"
            )
        })
    }

    /// Output path, derived from the input when `--output` is absent.
    #[must_use]
    pub fn output_for(&self, input: &Path) -> PathBuf {
        if let Some(ref out) = self.output {
            return out.clone();
        }
        let mut name = input.as_os_str().to_owned();
        name.push(if self.reconstruct {
            "_decoded"
        } else {
            "_encoded.png"
        });
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_original_flag_names() {
        let cli = Cli::try_parse_from([
            "colorcode", "-i", "data.bin", "-m", "8bit", "--sch", "monokai",
        ])
        .unwrap();
        assert_eq!(cli.input.as_deref(), Some(Path::new("data.bin")));
        assert_eq!(cli.mode.as_deref(), Some("8bit"));
        assert_eq!(cli.scheme.as_deref(), Some("monokai"));
        assert!(!cli.reconstruct);
        assert_eq!(cli.config, PathBuf::from("config/colorcode.toml"));
    }

    #[test]
    fn default_outputs() {
        let enc = Cli::try_parse_from(["colorcode", "-i", "dir/a.txt"]).unwrap();
        assert_eq!(
            enc.output_for(Path::new("dir/a.txt")),
            PathBuf::from("dir/a.txt_encoded.png")
        );

        let dec = Cli::try_parse_from(["colorcode", "--re", "-i", "a.png"]).unwrap();
        assert!(dec.reconstruct);
        assert_eq!(dec.output_for(Path::new("a.png")), PathBuf::from("a.png_decoded"));

        let explicit = Cli::try_parse_from(["colorcode", "-i", "a", "-o", "b.png"]).unwrap();
        assert_eq!(explicit.output_for(Path::new("a")), PathBuf::from("b.png"));
    }

    #[test]
    fn missing_input_is_an_error() {
        let cli = Cli::try_parse_from(["colorcode", "--reconstruct"]).unwrap();
        assert!(cli.require_input().is_err());
        let list = Cli::try_parse_from(["colorcode", "--sch-list"]).unwrap();
        assert!(list.list_schemes);
    }
}
