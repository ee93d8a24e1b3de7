use std::fmt;

use pc_core::charset::{FULLCELL_EMPTY, FULLCELL_RAMP, HALFCELL_EMPTY, HALFCELL_RAMP, ShadeLut};
use pc_core::config::{RenderConfig, RenderMode};
use pc_core::error::CoreError;
use pc_core::frame::PixelGrid;

use crate::luminance::to_grayscale;
use crate::normalize::strip_blank_lines;
use crate::{fullcell, halfcell};

/// Texte rendu, une entrée par ligne terminal.
///
/// HalfCell lines are joined with `\n` without a trailing newline; FullCell
/// lines are each newline-terminated.
///
/// # Example
/// ```
/// use pc_core::frame::PixelGrid;
/// use pc_core::config::RenderMode;
/// use pc_core::RenderConfig;
/// use pc_cells::compositor::render;
///
/// let grid = PixelGrid::new(vec![255; 2 * 2 * 4], 2, 2).unwrap();
/// let out = render(&grid, RenderMode::FullCellGrayscale, &RenderConfig::default());
/// assert_eq!(out.to_string(), "████\n████\n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOutput {
    lines: Vec<String>,
    terminated: bool,
}

impl RenderOutput {
    /// Rendered lines, top to bottom.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True when nothing survived normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for RenderOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 && !self.terminated {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
            if self.terminated {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

/// Render a grid already resized to its target dimensions.
///
/// Grayscale modes run the luminance converter over the whole grid first.
/// HalfCell modes then drop blank lines; FullCell output is left as is.
#[must_use]
pub fn render(grid: &PixelGrid, mode: RenderMode, config: &RenderConfig) -> RenderOutput {
    log::debug!("Rendu {mode} de {}×{} pixels", grid.width(), grid.height());

    let lines = match mode {
        RenderMode::HalfCellColor => halfcell::render_color(grid, config.fallback_color),
        RenderMode::FullCellColor => fullcell::render_color(grid, config.fallback_color),
        RenderMode::HalfCellGrayscale => {
            let gray = to_grayscale(grid, config.conversion_exponent);
            let lut = ShadeLut::new(HALFCELL_RAMP, HALFCELL_EMPTY, config.glyph_exponent);
            halfcell::render_grayscale(&gray, &lut)
        }
        RenderMode::FullCellGrayscale => {
            let gray = to_grayscale(grid, config.conversion_exponent);
            let lut = ShadeLut::new(FULLCELL_RAMP, FULLCELL_EMPTY, config.glyph_exponent);
            fullcell::render_grayscale(&gray, &lut)
        }
    };

    let lines = if mode.strips_blank_lines() {
        strip_blank_lines(lines)
    } else {
        lines
    };

    RenderOutput {
        lines,
        terminated: !mode.strips_blank_lines(),
    }
}

/// Resolve the mode from `config`, then render.
///
/// # Errors
/// Returns [`CoreError::UnsupportedMode`] before any pixel is touched when
/// `config.mode` is not recognized.
///
/// # Example
/// ```
/// use pc_core::frame::PixelGrid;
/// use pc_core::{CoreError, RenderConfig};
/// use pc_cells::compositor::render_with_config;
///
/// let grid = PixelGrid::new(vec![0; 4], 1, 1).unwrap();
/// let config = RenderConfig { mode: "vector".into(), ..RenderConfig::default() };
/// assert!(matches!(
///     render_with_config(&grid, &config),
///     Err(CoreError::UnsupportedMode { .. })
/// ));
/// ```
pub fn render_with_config(
    grid: &PixelGrid,
    config: &RenderConfig,
) -> Result<RenderOutput, CoreError> {
    let mode = config.render_mode()?;
    Ok(render(grid, mode, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(width: u32, height: u32, rgb: [u8; 3]) -> PixelGrid {
        let px = [rgb[0], rgb[1], rgb[2], 255];
        PixelGrid::new(px.repeat((width * height) as usize), width, height).unwrap()
    }

    fn config() -> RenderConfig {
        RenderConfig::default()
    }

    #[test]
    fn fullcell_color_two_by_two() {
        let grid = PixelGrid::new(
            vec![
                255, 0, 0, 255, 0, 255, 0, 255, //
                0, 0, 255, 255, 255, 255, 0, 255,
            ],
            2,
            2,
        )
        .unwrap();
        let out = render(&grid, RenderMode::FullCellColor, &config());
        assert_eq!(out.lines().len(), 2);
        assert_eq!(
            out.to_string(),
            "\x1b[48;2;255;0;0m  \x1b[0m\x1b[48;2;0;255;0m  \x1b[0m\n\
             \x1b[48;2;0;0;255m  \x1b[0m\x1b[48;2;255;255;0m  \x1b[0m\n"
        );
        assert!(!out.to_string().contains("\x1b[38;"));
    }

    #[test]
    fn transparent_halfcell_grayscale_is_empty() {
        let grid = PixelGrid::new(vec![0; 2 * 2 * 4], 2, 2).unwrap();
        let out = render(&grid, RenderMode::HalfCellGrayscale, &config());
        assert!(out.is_empty());
        assert_eq!(out.to_string(), "");
    }

    #[test]
    fn line_counts_match_geometry() {
        let grid = opaque(3, 7, [200, 200, 200]);
        for (mode, expected) in [
            (RenderMode::HalfCellColor, 3),
            (RenderMode::HalfCellGrayscale, 3),
            (RenderMode::FullCellColor, 7),
            (RenderMode::FullCellGrayscale, 7),
        ] {
            assert_eq!(render(&grid, mode, &config()).lines().len(), expected, "{mode}");
        }
    }

    #[test]
    fn halfcell_joins_without_trailing_newline() {
        let grid = opaque(1, 4, [255, 255, 255]);
        let out = render(&grid, RenderMode::HalfCellGrayscale, &config());
        assert_eq!(out.to_string(), "█\n█");
    }

    #[test]
    fn fullcell_keeps_blank_lines() {
        let grid = opaque(2, 2, [0, 0, 0]);
        let out = render(&grid, RenderMode::FullCellGrayscale, &config());
        assert_eq!(out.to_string(), "    \n    \n");
    }

    #[test]
    fn halfcell_drops_blank_rows_in_the_middle() {
        // rows: white, white, black, black, white, white
        let mut data = Vec::new();
        for v in [255u8, 255, 0, 0, 255, 255] {
            data.extend_from_slice(&[v, v, v, 255]);
        }
        let grid = PixelGrid::new(data, 1, 6).unwrap();
        let out = render(&grid, RenderMode::HalfCellGrayscale, &config());
        assert_eq!(out.lines(), ["█", "█"]);
    }

    #[test]
    fn grayscale_composes_both_curves() {
        // (10,10,10) → 19 after the 0.8 curve → 0.162 after the 0.7 curve
        let grid = opaque(1, 2, [10, 10, 10]);
        assert_eq!(
            render(&grid, RenderMode::HalfCellGrayscale, &config()).lines(),
            ["▄"]
        );
        assert_eq!(
            render(&grid, RenderMode::FullCellGrayscale, &config()).lines(),
            [" ", " "]
        );
    }

    #[test]
    fn exponents_come_from_config() {
        let grid = opaque(1, 1, [128, 128, 128]);
        let flat = RenderConfig {
            conversion_exponent: 1.0,
            glyph_exponent: 1.0,
            ..config()
        };
        // 128/255 = 0.502 → ▒▒ without the curves, ▓▓ with them
        assert_eq!(render(&grid, RenderMode::FullCellGrayscale, &flat).lines(), ["▒▒"]);
        assert_eq!(render(&grid, RenderMode::FullCellGrayscale, &config()).lines(), ["▓▓"]);
    }

    #[test]
    fn rendering_is_repeatable() {
        let mut data = Vec::new();
        for i in 0..(16u32 * 9) {
            let v = (i * 37 % 256) as u8;
            data.extend_from_slice(&[v, v.wrapping_mul(3), 255 - v, (i % 3) as u8 * 100]);
        }
        let grid = PixelGrid::new(data, 16, 9).unwrap();
        for mode in [
            RenderMode::HalfCellColor,
            RenderMode::HalfCellGrayscale,
            RenderMode::FullCellColor,
            RenderMode::FullCellGrayscale,
        ] {
            let a = render(&grid, mode, &config()).to_string();
            let b = render(&grid, mode, &config()).to_string();
            assert_eq!(a, b, "{mode}");
        }
    }

    #[test]
    fn unsupported_mode_fails_without_output() {
        let grid = opaque(2, 2, [1, 2, 3]);
        let bad = RenderConfig {
            mode: "braille".into(),
            ..config()
        };
        assert_eq!(
            render_with_config(&grid, &bad),
            Err(CoreError::UnsupportedMode {
                mode: "braille".into()
            })
        );
    }
}
