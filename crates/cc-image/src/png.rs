use std::path::Path;

use anyhow::{Context, Result};
use cc_core::grid::PixelGrid;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat};

/// Écrit la grille dans un PNG RGBA, sans métadonnées.
///
/// # Errors
/// Returns an error if the grid's buffer does not match its dimensions, or if
/// the file cannot be created or encoded.
///
/// # Example
/// ```no_run
/// use cc_core::grid::PixelGrid;
/// use cc_image::save_png;
/// use std::path::Path;
/// save_png(&PixelGrid::new(4, 4), Path::new("out.png")).unwrap();
/// ```
pub fn save_png(grid: &PixelGrid, path: &Path) -> Result<()> {
    ensure_consistent(grid)?;
    image::save_buffer_with_format(
        path,
        &grid.data,
        grid.width,
        grid.height,
        ExtendedColorType::Rgba8,
        ImageFormat::Png,
    )
    .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::debug!(
        "PNG {}×{} écrit dans {}",
        grid.width,
        grid.height,
        path.display()
    );
    Ok(())
}

/// Encode la grille en PNG en mémoire.
///
/// # Errors
/// Returns an error if the grid's buffer does not match its dimensions, or if
/// PNG encoding fails.
pub fn encode_png(grid: &PixelGrid) -> Result<Vec<u8>> {
    ensure_consistent(grid)?;
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(
            &grid.data,
            grid.width,
            grid.height,
            ExtendedColorType::Rgba8,
        )
        .context("Échec de l'encodage PNG")?;
    Ok(buf)
}

/// Charge une image depuis le disque en grille RGBA.
///
/// # Errors
/// Returns an error if the image cannot be opened or decoded.
///
/// # Example
/// ```no_run
/// use cc_image::load_grid;
/// use std::path::Path;
/// let grid = load_grid(Path::new("file_encoded.png")).unwrap();
/// ```
pub fn load_grid(path: &Path) -> Result<PixelGrid> {
    let img =
        image::open(path).with_context(|| format!("Impossible de charger {}", path.display()))?;
    into_grid(img)
}

/// Décode une image en mémoire (format deviné) en grille RGBA.
///
/// # Errors
/// Returns an error if the bytes are not a supported image.
pub fn decode_png(bytes: &[u8]) -> Result<PixelGrid> {
    let img = image::load_from_memory(bytes).context("Image illisible")?;
    into_grid(img)
}

// Les encodeurs de `image` paniquent sur un buffer de mauvaise taille.
fn ensure_consistent(grid: &PixelGrid) -> Result<()> {
    anyhow::ensure!(
        grid.is_consistent(),
        "Buffer RGBA incohérent avec les dimensions de la grille ({} octets pour {}×{})",
        grid.data.len(),
        grid.width,
        grid.height
    );
    Ok(())
}

fn into_grid(img: DynamicImage) -> Result<PixelGrid> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PixelGrid::from_rgba(width, height, rgba.into_raw())?)
}
