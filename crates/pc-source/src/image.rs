use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use pc_core::frame::PixelGrid;

/// Decode an image file (PNG, JPEG, GIF, WebP, BMP) into a pixel grid.
///
/// Only the first frame of an animated file is kept.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded, or if it decodes
/// to a zero-area image.
///
/// # Example
/// ```no_run
/// use pc_source::image::load_image;
/// use std::path::Path;
/// let grid = load_image(Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<PixelGrid> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    log::info!(
        "Image chargée : {} ({}×{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    grid_from_image(&img).with_context(|| format!("Image inutilisable : {}", path.display()))
}

/// Convert an already decoded image into a pixel grid.
///
/// Images deeper than 8 bits per channel go through 16-bit RGBA and keep the
/// high byte of each channel.
///
/// # Errors
/// Returns an error for a zero-area image.
///
/// # Example
/// ```
/// use image::{DynamicImage, RgbaImage};
/// use pc_source::image::grid_from_image;
///
/// let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 4])));
/// let grid = grid_from_image(&img).unwrap();
/// assert_eq!((grid.width(), grid.height()), (3, 2));
/// assert_eq!(grid.pixel(2, 1), (1, 2, 3, 4));
/// ```
pub fn grid_from_image(img: &DynamicImage) -> Result<PixelGrid> {
    let color = img.color();
    let deep = color.bytes_per_pixel() / color.channel_count() > 1;

    let grid = if deep {
        let rgba = img.to_rgba16();
        let (w, h) = rgba.dimensions();
        PixelGrid::from_rgba16(rgba.as_raw(), w, h)?
    } else {
        let rgba = img.to_rgba8();
        let (w, h) = rgba.dimensions();
        PixelGrid::new(rgba.into_raw(), w, h)?
    };
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgb, Rgba, RgbaImage};

    use super::*;

    #[test]
    fn sixteen_bit_channels_are_shifted() {
        let buf: ImageBuffer<Rgba<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(1, 1, Rgba([0xFF00, 0x80FF, 0x00FF, 0xFFFF]));
        let grid = grid_from_image(&DynamicImage::ImageRgba16(buf)).unwrap();
        assert_eq!(grid.pixel(0, 0), (0xFF, 0x80, 0x00, 0xFF));
    }

    #[test]
    fn rgb_images_become_opaque() {
        let buf = ImageBuffer::from_pixel(2, 2, Rgb([10u8, 20, 30]));
        let grid = grid_from_image(&DynamicImage::ImageRgb8(buf)).unwrap();
        assert_eq!(grid.pixel(1, 1), (10, 20, 30, 255));
    }

    #[test]
    fn zero_area_image_is_rejected() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(0, 0));
        assert!(grid_from_image(&img).is_err());
    }

    #[test]
    fn load_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        RgbaImage::from_pixel(4, 3, Rgba([200, 100, 50, 128]))
            .save(&path)
            .unwrap();

        let grid = load_image(&path).unwrap();
        assert_eq!((grid.width(), grid.height()), (4, 3));
        assert_eq!(grid.pixel(3, 2), (200, 100, 50, 128));
    }

    #[test]
    fn missing_file_has_context() {
        let err = load_image(Path::new("/nonexistent/none.png")).unwrap_err();
        assert!(err.to_string().contains("Impossible de charger"), "{err}");
    }
}
