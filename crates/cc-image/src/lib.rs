/// Persistence of encoded grids as raster images (PNG out, any lossless format in).

pub mod png;

pub use png::{decode_png, encode_png, load_grid, save_png};
