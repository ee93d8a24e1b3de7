use anyhow::{Context, Result, ensure};
use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};
use pc_core::frame::PixelGrid;

/// Resizer réutilisable wrappant fast_image_resize, en plus proche voisin.
///
/// Nearest-neighbour keeps hard pixel edges and never invents alpha values,
/// so fully transparent pixels stay fully transparent after scaling.
///
/// # Example
/// ```
/// use pc_source::resize::Resizer;
/// let r = Resizer::new();
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch copy of the source (the fast_image_resize API wants `&mut`).
    src_buf: Vec<u8>,
}

impl Resizer {
    /// Create a new resizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Nearest),
            src_buf: Vec::new(),
        }
    }

    /// Resample `src` to `width` × `height`.
    ///
    /// # Errors
    /// Returns an error on a zero target size, a target whose buffer size
    /// overflows `usize`, or if the resize fails.
    ///
    /// # Example
    /// ```
    /// use pc_source::resize::Resizer;
    /// use pc_core::frame::PixelGrid;
    /// let mut r = Resizer::new();
    /// let src = PixelGrid::new(vec![0; 100 * 100 * 4], 100, 100).unwrap();
    /// let dst = r.resize(&src, 50, 20).unwrap();
    /// assert_eq!((dst.width(), dst.height()), (50, 20));
    /// ```
    pub fn resize(&mut self, src: &PixelGrid, width: u32, height: u32) -> Result<PixelGrid> {
        ensure!(
            width > 0 && height > 0,
            "Dimensions cibles invalides : {width}×{height}"
        );
        if src.width() == width && src.height() == height {
            return Ok(src.clone());
        }

        self.src_buf.clear();
        self.src_buf.extend_from_slice(src.as_raw());
        let src_image =
            Image::from_slice_u8(src.width(), src.height(), &mut self.src_buf, PixelType::U8x4)
                .context("Invalid source dimensions")?;

        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .with_context(|| format!("Tampon {width}×{height} trop grand"))?;
        let mut dst_buf = vec![0u8; len];
        {
            let mut dst_image = Image::from_slice_u8(width, height, &mut dst_buf, PixelType::U8x4)
                .context("Invalid destination dimensions")?;
            self.inner
                .resize(&src_image, &mut dst_image, Some(&self.options))
                .context("Resize failed")?;
        }

        log::debug!(
            "Redimensionné {}×{} → {width}×{height}",
            src.width(),
            src.height()
        );
        Ok(PixelGrid::new(dst_buf, width, height)?)
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience for one-shot usage.
///
/// # Errors
/// Returns an error if the resize operation fails.
///
/// # Example
/// ```
/// use pc_source::resize::resize_grid;
/// use pc_core::frame::PixelGrid;
/// let src = PixelGrid::new(vec![0; 100 * 100 * 4], 100, 100).unwrap();
/// let dst = resize_grid(&src, 50, 50).unwrap();
/// assert_eq!(dst.width(), 50);
/// ```
pub fn resize_grid(src: &PixelGrid, width: u32, height: u32) -> Result<PixelGrid> {
    Resizer::new().resize(src, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(size: u32) -> PixelGrid {
        let mut data = Vec::new();
        for y in 0..size {
            for x in 0..size {
                let px = if (x + y) % 2 == 0 {
                    [255, 255, 255, 255]
                } else {
                    [0, 0, 0, 0]
                };
                data.extend_from_slice(&px);
            }
        }
        PixelGrid::new(data, size, size).unwrap()
    }

    #[test]
    fn nearest_keeps_source_values() {
        let dst = resize_grid(&checker(8), 3, 5).unwrap();
        for chunk in dst.as_raw().chunks_exact(4) {
            assert!(
                chunk == [255, 255, 255, 255] || chunk == [0, 0, 0, 0],
                "valeur interpolée : {chunk:?}"
            );
        }
    }

    #[test]
    fn upscale_repeats_pixels() {
        let src = PixelGrid::new(vec![9, 8, 7, 255], 1, 1).unwrap();
        let dst = resize_grid(&src, 4, 2).unwrap();
        assert!(dst.as_raw().chunks_exact(4).all(|c| c == [9, 8, 7, 255]));
    }

    #[test]
    fn same_size_is_a_copy() {
        let src = checker(4);
        assert_eq!(resize_grid(&src, 4, 4).unwrap(), src);
    }

    #[test]
    fn zero_target_is_rejected() {
        assert!(resize_grid(&checker(2), 0, 3).is_err());
    }

    #[test]
    fn oversized_target_is_an_error() {
        let err = resize_grid(&checker(2), u32::MAX, u32::MAX).unwrap_err();
        assert!(err.to_string().contains("trop grand"), "{err}");
    }
}
