use std::path::PathBuf;

use anyhow::Result;
use cc_core::{AppConfig, ColorTable, Mode};
use clap::Parser;

pub mod cli;
pub mod commands;
pub mod preview;
pub mod schemes;

use schemes::SchemeLocator;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config
    let config = resolve_config(&cli)?;
    let locator = SchemeLocator::from_exe(config.scheme_dir.clone())?;

    if cli.list_schemes {
        return preview::print_scheme_list(&locator);
    }

    // 4. Valider l'entrée et choisir le scheme
    let input = cli.require_input()?;
    let output = cli.output_for(input);
    let table = resolve_table(&cli, &config, &locator);

    // 5. Encoder ou reconstruire
    if cli.reconstruct {
        let decoded = commands::reconstruct_file(input, &output, &table, &config.decode_options())?;
        println!("Mode de couleur détecté : {}", decoded.mode);
        println!(
            "{} octets reconstruits dans {}",
            decoded.bytes.len(),
            output.display()
        );
    } else {
        let mode = resolve_mode(&cli, &config);
        let grid = commands::encode_file(input, &output, mode, &table)?;
        println!("Image créée : {}", output.display());
        println!("Dimensions : {} x {} pixels", grid.width, grid.height);
        println!("Mode de couleur : {mode}");
    }
    Ok(())
}

/// CLI `--mode` first, then the config. An unknown value falls back with a warning.
fn resolve_mode(cli: &cli::Cli, config: &AppConfig) -> Mode {
    match cli.mode.as_deref().map(str::parse::<Mode>) {
        Some(Ok(mode)) => mode,
        Some(Err(e)) => {
            log::warn!("{e}, utilisation de {}.", config.mode);
            config.mode
        }
        None => config.mode,
    }
}

/// `--sch`, then the config's scheme, then `scheme.ini`. A scheme that fails
/// to load is reported and replaced by the built-in palettes.
fn resolve_table(cli: &cli::Cli, config: &AppConfig, locator: &SchemeLocator) -> ColorTable {
    let loaded = match cli.scheme.as_deref().or(config.scheme.as_deref()) {
        Some(name) => {
            let res = locator.load_named(name);
            if res.is_ok() {
                println!("Scheme personnalisé chargé : {name}");
            }
            res
        }
        None => locator.load_default(),
    };

    match loaded {
        Ok(l) => l.table,
        Err(e) => {
            log::warn!("Scheme non chargé, palettes par défaut : {e:#}");
            ColorTable::default()
        }
    }
}

/// Resolve config: a missing file means defaults.
fn resolve_config(cli: &cli::Cli) -> Result<AppConfig> {
    if cli.config.exists() {
        cc_core::config::load_config(&cli.config)
    } else {
        let default_path = PathBuf::from("config/colorcode.toml");
        if cli.config != default_path {
            log::warn!(
                "Config introuvable : {}. Utilisation des défauts.",
                cli.config.display()
            );
        }
        Ok(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_core::Rgb;

    fn parse(args: &[&str]) -> cli::Cli {
        cli::Cli::try_parse_from(std::iter::once("colorcode").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn unknown_mode_falls_back_to_config() {
        let config = AppConfig {
            mode: Mode::Octal,
            ..AppConfig::default()
        };
        assert_eq!(resolve_mode(&parse(&["-m", "32bit"]), &config), Mode::Octal);
        assert_eq!(resolve_mode(&parse(&[]), &config), Mode::Octal);
    }

    #[test]
    fn cli_mode_beats_config() {
        let config = AppConfig {
            mode: Mode::Hex,
            ..AppConfig::default()
        };
        assert_eq!(resolve_mode(&parse(&["-m", "8bit"]), &config), Mode::Octal);
    }

    #[test]
    fn missing_scheme_uses_builtin_palettes() {
        let dir = tempfile::tempdir().unwrap();
        let locator = SchemeLocator::new(dir.path().to_path_buf(), None);
        let table = resolve_table(&parse(&["--sch", "absent"]), &AppConfig::default(), &locator);
        assert_eq!(table, ColorTable::default());
    }

    #[test]
    fn invalid_scheme_uses_builtin_palettes() {
        let dir = tempfile::tempdir().unwrap();
        let locator = SchemeLocator::new(dir.path().to_path_buf(), None);
        std::fs::create_dir_all(locator.scheme_dir()).unwrap();
        // Deux symboles hex sur la même couleur.
        std::fs::write(
            locator.scheme_dir().join("clash.ini"),
            "[16bit]\n0=1,1,1\n1=1,1,1\n",
        )
        .unwrap();

        let table = resolve_table(&parse(&["--sch", "clash"]), &AppConfig::default(), &locator);
        assert_eq!(table, ColorTable::default());
    }

    #[test]
    fn config_scheme_is_used_without_cli_flag() {
        let dir = tempfile::tempdir().unwrap();
        let locator = SchemeLocator::new(dir.path().to_path_buf(), None);
        std::fs::create_dir_all(locator.scheme_dir()).unwrap();
        std::fs::write(locator.scheme_dir().join("zen.ini"), "[8bit]\n0=1,2,3\n").unwrap();
        let config = AppConfig {
            scheme: Some("zen".into()),
            ..AppConfig::default()
        };

        let table = resolve_table(&parse(&[]), &config, &locator);
        assert_eq!(table.get(b'0', Mode::Octal), Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn missing_config_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let cli = parse(&["-c", path.to_str().unwrap()]);
        assert_eq!(resolve_config(&cli).unwrap(), AppConfig::default());
    }

    #[test]
    fn present_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colorcode.toml");
        std::fs::write(&path, "[codec]\nmode = \"8bit\"\n").unwrap();
        let cli = parse(&["-c", path.to_str().unwrap()]);
        assert_eq!(resolve_config(&cli).unwrap().mode, Mode::Octal);
    }
}
