use pc_core::charset::ShadeLut;
use pc_core::color::{self, Rgb, SGR_RESET};
use pc_core::frame::{GrayscaleGrid, PixelGrid};
use rayon::prelude::*;

use crate::normalize::paired_rows;

/// Lower half block, drawn in the lower pixel's color over the upper one.
pub const LOWER_HALF_BLOCK: &str = "▄";

/// Render in half-cell truecolor mode (▄ character).
///
/// Each terminal cell covers 2 vertical pixels. The upper pixel's color goes
/// to bg, the lower pixel's color goes to fg. A fully transparent pixel takes
/// `fallback` instead, or no escape at all. A transparent lower pixel draws a
/// space rather than the block. Every cell ends with a reset.
///
/// An odd last row has no partner and is skipped.
///
/// # Example
/// ```
/// use pc_core::frame::PixelGrid;
/// use pc_cells::halfcell::render_color;
///
/// let grid = PixelGrid::new(vec![255, 0, 0, 255, 0, 0, 255, 255], 1, 2).unwrap();
/// let lines = render_color(&grid, None);
/// assert_eq!(lines, ["\x1b[38;2;0;0;255m\x1b[48;2;255;0;0m▄\x1b[0m"]);
/// ```
#[must_use]
pub fn render_color(grid: &PixelGrid, fallback: Option<Rgb>) -> Vec<String> {
    (0..paired_rows(grid.height()))
        .into_par_iter()
        .map(|pair| {
            let upper = grid.row(pair * 2);
            let lower = grid.row(pair * 2 + 1);
            let mut line = String::with_capacity(grid.width() as usize * 40);

            for (up, low) in upper.chunks_exact(4).zip(lower.chunks_exact(4)) {
                let lower_opaque = low[3] > 0;

                if lower_opaque {
                    color::push_fg(&mut line, Rgb(low[0], low[1], low[2]));
                } else if let Some(c) = fallback {
                    color::push_fg(&mut line, c);
                }

                if up[3] > 0 {
                    color::push_bg(&mut line, Rgb(up[0], up[1], up[2]));
                } else if let Some(c) = fallback {
                    color::push_bg(&mut line, c);
                }

                line.push_str(if lower_opaque { LOWER_HALF_BLOCK } else { " " });
                line.push_str(SGR_RESET);
            }
            line
        })
        .collect()
}

/// Render in half-cell grayscale mode.
///
/// Only the lower row of each pair picks the glyph; the upper row is not
/// consulted.
///
/// # Example
/// ```
/// use pc_core::charset::{ShadeLut, HALFCELL_EMPTY, HALFCELL_RAMP};
/// use pc_core::frame::GrayscaleGrid;
/// use pc_cells::halfcell::render_grayscale;
///
/// let lut = ShadeLut::new(HALFCELL_RAMP, HALFCELL_EMPTY, 0.7);
/// let gray = GrayscaleGrid::new(vec![0, 0, 255, 0], 2, 2).unwrap();
/// assert_eq!(render_grayscale(&gray, &lut), ["█ "]);
/// ```
#[must_use]
pub fn render_grayscale(gray: &GrayscaleGrid, lut: &ShadeLut) -> Vec<String> {
    (0..paired_rows(gray.height()))
        .into_par_iter()
        .map(|pair| {
            gray.row(pair * 2 + 1)
                .iter()
                .map(|&intensity| lut.map(intensity))
                .collect::<String>()
        })
        .collect()
}
