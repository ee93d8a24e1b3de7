use pc_core::frame::{GrayscaleGrid, PixelGrid};
use rayon::prelude::*;

/// Poids BT.709 (R, G, B). Leur somme vaut 1.0.
pub const LUMA_WEIGHTS: (f64, f64, f64) = (0.2126, 0.7152, 0.0722);

/// Luminance pondérée puis rehaussée par une courbe de puissance.
///
/// `round(pow(weighted / 255, exponent) * 255)`, clamped to [0, 255].
/// Alpha is not an input: transparency is the color renderers' concern.
///
/// # Example
/// ```
/// use pc_cells::luminance::enhanced_luminance;
/// assert_eq!(enhanced_luminance(255, 255, 255, 0.8), 255);
/// assert_eq!(enhanced_luminance(0, 0, 0, 0.8), 0);
/// assert_eq!(enhanced_luminance(128, 128, 128, 0.8), 147);
/// ```
#[inline(always)]
#[must_use]
pub fn enhanced_luminance(r: u8, g: u8, b: u8, exponent: f64) -> u8 {
    let (wr, wg, wb) = LUMA_WEIGHTS;
    let weighted = wr * f64::from(r) + wg * f64::from(g) + wb * f64::from(b);
    let enhanced = (weighted / 255.0).clamp(0.0, 1.0).powf(exponent) * 255.0;
    enhanced.round().clamp(0.0, 255.0) as u8
}

/// Convert a pixel grid to enhanced grayscale, row by row in parallel.
///
/// # Example
/// ```
/// use pc_core::frame::PixelGrid;
/// use pc_cells::luminance::to_grayscale;
///
/// let grid = PixelGrid::new(vec![255, 255, 255, 0, 0, 0, 0, 255], 2, 1).unwrap();
/// let gray = to_grayscale(&grid, 0.8);
/// assert_eq!(gray.row(0), &[255, 0]);
/// ```
#[must_use]
pub fn to_grayscale(grid: &PixelGrid, exponent: f64) -> GrayscaleGrid {
    GrayscaleGrid::derive_from(grid, |src, out| {
        let width = src.width() as usize;
        src.as_raw()
            .par_chunks(width * 4)
            .zip(out.par_chunks_mut(width))
            .for_each(|(row, dst)| {
                for (px, o) in row.chunks_exact(4).zip(dst.iter_mut()) {
                    *o = enhanced_luminance(px[0], px[1], px[2], exponent);
                }
            });
    })
}
