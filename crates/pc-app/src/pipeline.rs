use std::path::Path;

use anyhow::Result;
use pc_cells::compositor::{RenderOutput, render};
use pc_core::config::RenderConfig;
use pc_core::dimensions::resolve_dimensions;
use pc_core::frame::PixelGrid;
use pc_source::image::load_image;
use pc_source::resize::Resizer;

/// Load an image file and render it.
///
/// The mode is checked before the file is opened.
///
/// # Errors
/// Returns an error for an unsupported mode, an unreadable or undecodable
/// file, or a zero-area image.
pub fn from_image_path(path: &Path, config: &RenderConfig) -> Result<RenderOutput> {
    config.render_mode()?;
    let grid = load_image(path)?;
    from_image(&grid, config)
}

/// Render an already decoded grid: resolve the target size, resample, render.
///
/// Numeric fields are clamped first, so callers may pass raw overrides.
///
/// # Errors
/// Returns an error for an unsupported mode, a derived size beyond
/// [`MAX_DIMENSION`](pc_core::config::MAX_DIMENSION), or if resampling fails.
pub fn from_image(grid: &PixelGrid, config: &RenderConfig) -> Result<RenderOutput> {
    let mode = config.render_mode()?;
    let mut config = config.clone();
    config.clamp_all();

    let dims = resolve_dimensions(
        config.width,
        config.height,
        grid.width(),
        grid.height(),
        config.viewport_width,
        config.viewport_height,
    )?
    .within_limit()?;
    log::info!(
        "Rendu {mode} : {}×{} → {}×{}",
        grid.width(),
        grid.height(),
        dims.width,
        dims.height
    );

    let resized = Resizer::new().resize(grid, dims.width, dims.height)?;
    Ok(render(&resized, mode, &config))
}
