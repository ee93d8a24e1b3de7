use pc_core::charset::ShadeLut;
use pc_core::color::{self, Rgb, SGR_RESET};
use pc_core::frame::{GrayscaleGrid, PixelGrid};
use rayon::prelude::*;

/// Two columns per pixel so cells come out roughly square.
const CELL: &str = "  ";

/// Render in full-cell truecolor mode: one pixel → two spaces on a
/// background color.
///
/// A transparent pixel takes `fallback` as background, or no escape at all.
///
/// # Example
/// ```
/// use pc_core::frame::PixelGrid;
/// use pc_cells::fullcell::render_color;
///
/// let grid = PixelGrid::new(vec![0, 128, 255, 255], 1, 1).unwrap();
/// assert_eq!(render_color(&grid, None), ["\x1b[48;2;0;128;255m  \x1b[0m"]);
/// ```
#[must_use]
pub fn render_color(grid: &PixelGrid, fallback: Option<Rgb>) -> Vec<String> {
    grid.as_raw()
        .par_chunks(grid.width() as usize * 4)
        .map(|row| {
            let mut line = String::with_capacity(row.len() * 6);
            for px in row.chunks_exact(4) {
                if px[3] > 0 {
                    color::push_bg(&mut line, Rgb(px[0], px[1], px[2]));
                } else if let Some(c) = fallback {
                    color::push_bg(&mut line, c);
                }
                line.push_str(CELL);
                line.push_str(SGR_RESET);
            }
            line
        })
        .collect()
}

/// Render in full-cell grayscale mode with the doubled shade ramp.
#[must_use]
pub fn render_grayscale(gray: &GrayscaleGrid, lut: &ShadeLut) -> Vec<String> {
    (0..gray.height())
        .into_par_iter()
        .map(|y| {
            gray.row(y)
                .iter()
                .map(|&intensity| lut.map(intensity))
                .collect::<String>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pc_core::charset::{FULLCELL_EMPTY, FULLCELL_RAMP};

    use super::*;

    #[test]
    fn one_line_per_row_without_foreground() {
        let grid = PixelGrid::new(
            vec![
                255, 0, 0, 255, 0, 255, 0, 255, //
                0, 0, 255, 255, 255, 255, 0, 255,
            ],
            2,
            2,
        )
        .unwrap();
        let lines = render_color(&grid, None);
        assert_eq!(
            lines,
            [
                "\x1b[48;2;255;0;0m  \x1b[0m\x1b[48;2;0;255;0m  \x1b[0m",
                "\x1b[48;2;0;0;255m  \x1b[0m\x1b[48;2;255;255;0m  \x1b[0m",
            ]
        );
        assert!(lines.iter().all(|l| !l.contains("\x1b[38;")));
    }

    #[test]
    fn transparent_pixel_uses_fallback_or_nothing() {
        let grid = PixelGrid::new(vec![50, 60, 70, 0], 1, 1).unwrap();
        assert_eq!(render_color(&grid, None), ["  \x1b[0m"]);
        assert_eq!(
            render_color(&grid, Some(Rgb(9, 8, 7))),
            ["\x1b[48;2;9;8;7m  \x1b[0m"]
        );
    }

    #[test]
    fn grayscale_widths_follow_ramp() {
        let lut = ShadeLut::new(FULLCELL_RAMP, FULLCELL_EMPTY, 0.7);
        // 255 → ██, 147 → ▓▓, 74 → ░░ (0.42), 19 → " ", 0 → "  "
        let gray = GrayscaleGrid::new(vec![255, 147, 74, 19, 0], 5, 1).unwrap();
        assert_eq!(render_grayscale(&gray, &lut), ["██▓▓░░   "]);
    }

    #[test]
    fn grayscale_keeps_odd_last_row() {
        let lut = ShadeLut::new(FULLCELL_RAMP, FULLCELL_EMPTY, 0.7);
        let gray = GrayscaleGrid::new(vec![255, 0, 255], 1, 3).unwrap();
        assert_eq!(render_grayscale(&gray, &lut), ["██", "  ", "██"]);
    }
}
