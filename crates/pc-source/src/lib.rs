/// Image sources for pixcell: file decoding and resampling.
///
/// Everything here sits outside the rendering engine: it hands `pc-cells` a
/// `PixelGrid` already at its target size.

pub mod image;
pub mod resize;

pub use crate::image::{grid_from_image, load_image};
pub use crate::resize::{Resizer, resize_grid};
