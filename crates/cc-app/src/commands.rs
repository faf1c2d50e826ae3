use std::path::Path;

use anyhow::{Context, Result};
use cc_core::{ColorTable, DecodeOptions, Decoded, Mode, PixelGrid, decode_with, encode};

/// Encode un fichier en PNG.
///
/// # Errors
/// Returns an error if the input cannot be read or the image cannot be written.
pub fn encode_file(
    input: &Path,
    output: &Path,
    mode: Mode,
    table: &ColorTable,
) -> Result<PixelGrid> {
    let data = std::fs::read(input)
        .with_context(|| format!("Impossible de lire {}", input.display()))?;
    log::info!("{} octets lus depuis {}", data.len(), input.display());

    let grid = encode(&data, mode, table)
        .with_context(|| format!("Échec de l'encodage de {}", input.display()))?;
    cc_image::save_png(&grid, output)?;
    Ok(grid)
}

/// Reconstruit le fichier d'origine depuis une image.
///
/// # Errors
/// Returns an error if the image cannot be loaded, decoded, or the output written.
pub fn reconstruct_file(
    input: &Path,
    output: &Path,
    table: &ColorTable,
    options: &DecodeOptions,
) -> Result<Decoded> {
    let grid = cc_image::load_grid(input)?;
    log::info!(
        "Image {}×{} lue depuis {}",
        grid.width,
        grid.height,
        input.display()
    );

    let decoded = decode_with(&grid, table, options)
        .with_context(|| format!("Impossible de reconstruire {}", input.display()))?;
    std::fs::write(output, &decoded.bytes)
        .with_context(|| format!("Impossible d'écrire {}", output.display()))?;
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_roundtrip_both_modes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("payload.bin");
        let data: Vec<u8> = (0..3000u32).map(|i| (i ^ (i >> 3)) as u8).collect();
        std::fs::write(&input, &data).unwrap();
        let table = ColorTable::default();

        for mode in Mode::ALL {
            let png = dir.path().join(format!("payload_{mode}.png"));
            let out = dir.path().join(format!("payload_{mode}.out"));
            let grid = encode_file(&input, &png, mode, &table).unwrap();
            assert!(grid.width >= grid.height);

            let decoded =
                reconstruct_file(&png, &out, &table, &DecodeOptions { min_hit_ratio: 0.9 })
                    .unwrap();
            assert_eq!(decoded.mode, mode);
            assert_eq!(std::fs::read(&out).unwrap(), data);
        }
    }

    #[test]
    fn foreign_image_is_rejected_with_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("photo.png");
        let mut grid = PixelGrid::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                grid.set(x, y, cc_core::Rgb::new(x as u8 * 7 + 1, y as u8 * 9 + 2, 33));
            }
        }
        cc_image::save_png(&grid, &png).unwrap();

        let out = dir.path().join("photo.out");
        let strict = DecodeOptions { min_hit_ratio: 0.5 };
        assert!(reconstruct_file(&png, &out, &ColorTable::default(), &strict).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let res = encode_file(
            &dir.path().join("absent"),
            &dir.path().join("x.png"),
            Mode::Hex,
            &ColorTable::default(),
        );
        assert!(res.is_err());
    }
}
