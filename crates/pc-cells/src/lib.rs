/// Cell rendering engine for pixcell.
///
/// Converts resized pixel grids to half-cell or full-cell terminal text.
pub mod compositor;
pub mod fullcell;
pub mod halfcell;
pub mod luminance;
pub mod normalize;

pub use compositor::{RenderOutput, render, render_with_config};
