/// Configuration, types, and shared structures for pixcell.
///
/// This crate contains the pixel/grayscale grids, render modes, error type,
/// glyph ramps, configuration and dimension resolution shared across the
/// pixcell workspace. It performs no I/O beyond config file loading.

pub mod charset;
pub mod color;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod frame;

pub use charset::ShadeLut;
pub use color::Rgb;
pub use config::{CellMode, RenderConfig, RenderMode};
pub use dimensions::{Dimensions, resolve_dimensions};
pub use error::CoreError;
pub use frame::{GrayscaleGrid, PixelGrid};
