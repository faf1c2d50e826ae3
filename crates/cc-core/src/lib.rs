/// Codec core for colorcode.
///
/// Turns bytes into a grid of colored pixels (one pixel per hex or octal
/// digit) and recovers them, detecting the mode from the colors alone.

pub mod alphabet;
pub mod color;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod grid;
pub mod layout;
pub mod scheme;

pub use alphabet::Mode;
pub use color::{Rgb, SENTINEL};
pub use config::AppConfig;
pub use decoder::{DecodeOptions, DecodeStats, Decoded, decode, decode_with};
pub use encoder::encode;
pub use error::CoreError;
pub use grid::PixelGrid;
pub use scheme::{ColorTable, LoadReport, LoadedScheme, load_table};
