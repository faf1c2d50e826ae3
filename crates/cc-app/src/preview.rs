use anyhow::Result;
use cc_core::color::Rgb;
use cc_core::{ColorTable, Mode};
use crossterm::style::{Color, Stylize};

use crate::schemes::{SchemeLocator, load_file};

/// Blocs par ligne d'aperçu.
const BLOCKS_PER_LINE: usize = 8;

fn term_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Truecolor blocks for one mode of `table`, 8 per line, symbol centred.
#[must_use]
pub fn render_palette(table: &ColorTable, mode: Mode) -> Vec<String> {
    let blocks: Vec<String> = table
        .entries(mode)
        .map(|(symbol, color)| {
            format!("{:^4}", char::from(symbol))
                .with(term_color(color.contrast()))
                .on(term_color(color))
                .bold()
                .to_string()
        })
        .collect();

    blocks
        .chunks(BLOCKS_PER_LINE)
        .map(|line| format!("   {}", line.concat()))
        .collect()
}

/// Aperçu complet d'un scheme (8bit puis 16bit).
#[must_use]
pub fn render_scheme(table: &ColorTable) -> String {
    let mut out = Vec::new();
    for mode in [Mode::Octal, Mode::Hex] {
        out.push(format!("   [{mode}]"));
        out.extend(render_palette(table, mode));
    }
    out.join("\n")
}

/// Print every scheme of the scheme directory with its preview.
///
/// # Errors
/// Never fails on a single bad scheme; a missing scheme directory is reported
/// to the user and is not an error either.
pub fn print_scheme_list(locator: &SchemeLocator) -> Result<()> {
    let schemes = match locator.list() {
        Ok(s) => s,
        Err(e) => {
            println!("{e:#}");
            println!("Aucun scheme pré-installé.");
            return Ok(());
        }
    };

    println!("Schemes disponibles");
    println!("===================");
    if schemes.is_empty() {
        println!("Aucun fichier .ini dans {}.", locator.scheme_dir().display());
        return Ok(());
    }

    for (i, (name, path)) in schemes.iter().enumerate() {
        println!("\n{:2}. {name}", i + 1);
        match load_file(path) {
            Ok(loaded) => println!("{}", render_scheme(&loaded.table)),
            Err(e) => println!("   Erreur de chargement : {e:#}"),
        }
    }

    println!("\nUsage : --sch <nom>");
    println!("   Exemple : colorcode -i fichier.txt --sch monokai");
    Ok(())
}
