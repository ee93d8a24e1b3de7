//! Résolution des dimensions de rendu à partir du ratio d'aspect source.

use crate::config::MAX_DIMENSION;
use crate::error::CoreError;

/// Taille de rendu en cellules terminal. Toujours strictement positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Columns.
    pub width: u32,
    /// Image rows fed to the renderer (HalfCell pairs them).
    pub height: u32,
}

impl Dimensions {
    /// Reject a size with either side above [`MAX_DIMENSION`].
    ///
    /// A capped request can still derive a huge opposite side from an
    /// extreme aspect ratio; this is checked before any buffer is allocated.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] naming the oversized dimensions.
    ///
    /// # Example
    /// ```
    /// use pc_core::dimensions::Dimensions;
    /// assert!(Dimensions { width: 80, height: 24 }.within_limit().is_ok());
    /// assert!(Dimensions { width: 4096, height: 5000 }.within_limit().is_err());
    /// ```
    pub fn within_limit(self) -> Result<Self, CoreError> {
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(CoreError::Config(format!(
                "dimensions de rendu {}×{} au-delà de {MAX_DIMENSION}",
                self.width, self.height
            )));
        }
        Ok(self)
    }
}

/// Compute the render size from optional overrides and the image aspect ratio.
///
/// `width` / `height` ≤ 0 mean "unspecified".
///
/// * both given: used as-is, aspect distortion accepted;
/// * both unset: fit the viewport width, and fall back to the viewport height
///   when the derived height overflows it;
/// * one given: the other follows the image aspect ratio.
///
/// A derived side that rounds to 0 is raised to 1.
///
/// # Errors
/// Returns [`CoreError::InvalidImage`] when the source has a zero side, since
/// its aspect ratio is undefined.
///
/// # Example
/// ```
/// use pc_core::dimensions::{resolve_dimensions, Dimensions};
/// let d = resolve_dimensions(0, 0, 100, 50, 80, 24).unwrap();
/// assert_eq!(d, Dimensions { width: 48, height: 24 });
/// ```
pub fn resolve_dimensions(
    width: i32,
    height: i32,
    img_width: u32,
    img_height: u32,
    viewport_width: u32,
    viewport_height: u32,
) -> Result<Dimensions, CoreError> {
    if width > 0 && height > 0 {
        return Ok(Dimensions {
            width: width as u32,
            height: height as u32,
        });
    }

    if img_width == 0 || img_height == 0 {
        return Err(CoreError::InvalidImage {
            reason: format!("ratio d'aspect indéfini pour {img_width}×{img_height}"),
        });
    }
    let aspect = f64::from(img_width) / f64::from(img_height);

    let (w, h) = match (width > 0, height > 0) {
        (false, false) => {
            let w = viewport_width;
            let h = round_cells(f64::from(w) / aspect);
            if h > viewport_height {
                let h = viewport_height;
                (round_cells(f64::from(h) * aspect), h)
            } else {
                (w, h)
            }
        }
        (true, _) => {
            let w = width as u32;
            (w, round_cells(f64::from(w) / aspect))
        }
        (false, true) => {
            let h = height as u32;
            (round_cells(f64::from(h) * aspect), h)
        }
    };

    let resolved = Dimensions {
        width: w.max(1),
        height: h.max(1),
    };
    log::debug!(
        "Dimensions résolues : {img_width}×{img_height} (aspect {aspect:.3}) → {}×{}",
        resolved.width,
        resolved.height
    );
    Ok(resolved)
}

#[inline]
fn round_cells(v: f64) -> u32 {
    v.round().clamp(0.0, f64::from(u32::MAX)) as u32
}
