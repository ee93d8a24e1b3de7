use crate::error::CoreError;

/// Grille de pixels RGBA immuable, row-major, 4 bytes par pixel.
///
/// Invariant : `width > 0`, `height > 0` et `data.len() == width * height * 4`.
/// Construite une fois par rendu, jamais modifiée ensuite.
///
/// # Example
/// ```
/// use pc_core::frame::PixelGrid;
/// let grid = PixelGrid::new(vec![0u8; 10 * 10 * 4], 10, 10).unwrap();
/// assert_eq!(grid.as_raw().len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelGrid {
    /// Wrap an 8-bit RGBA buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidImage`] on a zero dimension or when the
    /// buffer length does not match `width * height * 4`.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, CoreError> {
        check_shape(data.len(), width, height, 4)?;
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Wrap a 16-bit RGBA buffer, keeping the high byte of each channel.
    ///
    /// # Errors
    /// Same shape checks as [`PixelGrid::new`].
    ///
    /// # Example
    /// ```
    /// use pc_core::frame::PixelGrid;
    /// let grid = PixelGrid::from_rgba16(&[0xFFFF, 0x80FF, 0x0100, 0x00FF], 1, 1).unwrap();
    /// assert_eq!(grid.pixel(0, 0), (255, 128, 1, 0));
    /// ```
    pub fn from_rgba16(data: &[u16], width: u32, height: u32) -> Result<Self, CoreError> {
        check_shape(data.len(), width, height, 4)?;
        let data = data.iter().map(|&c| (c >> 8) as u8).collect();
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    #[inline]
    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// RGBA bytes of row `y`.
    ///
    /// # Panics
    /// Panics if `y >= height`.
    #[inline]
    #[must_use]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * 4;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// # Example
    /// ```
    /// use pc_core::frame::PixelGrid;
    /// let grid = PixelGrid::new(vec![1, 2, 3, 4], 1, 1).unwrap();
    /// assert_eq!(grid.pixel(0, 0), (1, 2, 3, 4));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = ((y * self.width + x) * 4) as usize;
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }
}

/// Grille d'intensités (0–255), même forme qu'une [`PixelGrid`].
///
/// Artefact dérivé par le convertisseur de luminance, jeté après un rendu.
///
/// # Example
/// ```
/// use pc_core::frame::GrayscaleGrid;
/// let gray = GrayscaleGrid::new(vec![0, 64, 128, 255], 2, 2).unwrap();
/// assert_eq!(gray.row(1), &[128, 255]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayscaleGrid {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl GrayscaleGrid {
    /// Wrap one intensity byte per pixel.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidImage`] on a zero dimension or a length
    /// mismatch.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, CoreError> {
        check_shape(data.len(), width, height, 1)?;
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Allocate a grid shaped like `src` and let `fill` write its intensities.
    ///
    /// `fill` receives the source grid and a zeroed buffer of exactly
    /// `width * height` bytes, row-major. La forme est héritée de `src`,
    /// donc aucune vérification n'est nécessaire.
    ///
    /// # Example
    /// ```
    /// use pc_core::frame::{GrayscaleGrid, PixelGrid};
    /// let src = PixelGrid::new(vec![10, 0, 0, 255, 20, 0, 0, 255], 2, 1).unwrap();
    /// let gray = GrayscaleGrid::derive_from(&src, |src, out| {
    ///     for (px, o) in src.as_raw().chunks_exact(4).zip(out.iter_mut()) {
    ///         *o = px[0];
    ///     }
    /// });
    /// assert_eq!(gray.row(0), &[10, 20]);
    /// ```
    #[must_use]
    pub fn derive_from(src: &PixelGrid, fill: impl FnOnce(&PixelGrid, &mut [u8])) -> Self {
        let mut data = vec![0u8; src.width as usize * src.height as usize];
        fill(src, &mut data);
        Self {
            data,
            width: src.width,
            height: src.height,
        }
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Intensities of row `y`.
    ///
    /// # Panics
    /// Panics if `y >= height`.
    #[inline]
    #[must_use]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }
}

fn check_shape(len: usize, width: u32, height: u32, channels: usize) -> Result<(), CoreError> {
    if width == 0 || height == 0 {
        return Err(CoreError::invalid_image(format!(
            "dimensions nulles {width}×{height}"
        )));
    }
    let expected = width as usize * height as usize * channels;
    if len != expected {
        return Err(CoreError::invalid_image(format!(
            "{len} échantillons pour {width}×{height}×{channels} (attendu {expected})"
        )));
    }
    Ok(())
}
