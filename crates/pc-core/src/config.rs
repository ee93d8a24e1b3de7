use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::CoreError;

/// Largeur du viewport par défaut : le terminal VT100 classique (80 colonnes).
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 80;

/// Hauteur du viewport par défaut : le terminal VT100 classique (24 lignes).
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 24;

/// Exposant de la courbe de contraste appliquée à la luminance pondérée lors
/// de la conversion en niveaux de gris.
pub const CONVERSION_EXPONENT: f64 = 0.8;

/// Exposant de la seconde courbe de contraste, appliquée par les renderers
/// grayscale avant la classification en glyphes. Composée avec
/// [`CONVERSION_EXPONENT`], pas substituée.
pub const GLYPH_EXPONENT: f64 = 0.7;

/// Borne haute de chaque côté du rendu, en cellules.
pub const MAX_DIMENSION: u32 = 4096;

/// Mode string used when the caller passes an empty one.
pub const DEFAULT_MODE: &str = "halfcell";

/// Géométrie de cellule : deux lignes d'image par ligne terminal, ou une.
///
/// # Example
/// ```
/// use pc_core::config::CellMode;
/// assert_eq!("fullcell".parse::<CellMode>().unwrap(), CellMode::FullCell);
/// assert_eq!("".parse::<CellMode>().unwrap(), CellMode::HalfCell);
/// assert!("vector".parse::<CellMode>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellMode {
    /// Lower-half-block glyph, two image rows per terminal row.
    #[default]
    HalfCell,
    /// One image pixel per terminal cell.
    FullCell,
}

impl FromStr for CellMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "halfcell" => Ok(Self::HalfCell),
            "fullcell" => Ok(Self::FullCell),
            other => Err(CoreError::UnsupportedMode {
                mode: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CellMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::HalfCell => "halfcell",
            Self::FullCell => "fullcell",
        })
    }
}

/// Les quatre stratégies de rendu : géométrie × couleur.
///
/// # Example
/// ```
/// use pc_core::config::{CellMode, RenderMode};
/// let mode = RenderMode::new(CellMode::HalfCell, false);
/// assert_eq!(mode, RenderMode::HalfCellGrayscale);
/// assert!(mode.strips_blank_lines());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// `▄` with truecolor fg (lower pixel) and bg (upper pixel).
    HalfCellColor,
    /// Shade ramp driven by the lower pixel of each pair.
    HalfCellGrayscale,
    /// Two spaces on a truecolor background.
    FullCellColor,
    /// Doubled shade ramp, one pixel per cell.
    FullCellGrayscale,
}

impl RenderMode {
    /// Combine a cell geometry with the color flag.
    #[must_use]
    pub fn new(cell: CellMode, color: bool) -> Self {
        match (cell, color) {
            (CellMode::HalfCell, true) => Self::HalfCellColor,
            (CellMode::HalfCell, false) => Self::HalfCellGrayscale,
            (CellMode::FullCell, true) => Self::FullCellColor,
            (CellMode::FullCell, false) => Self::FullCellGrayscale,
        }
    }

    /// Parse a mode string and combine it with the color flag.
    ///
    /// # Errors
    /// Returns [`CoreError::UnsupportedMode`] for anything but `halfcell`,
    /// `fullcell` or the empty string.
    pub fn parse(mode: &str, color: bool) -> Result<Self, CoreError> {
        Ok(Self::new(mode.parse()?, color))
    }

    /// Cell geometry of this mode.
    #[must_use]
    pub fn cell_mode(self) -> CellMode {
        match self {
            Self::HalfCellColor | Self::HalfCellGrayscale => CellMode::HalfCell,
            Self::FullCellColor | Self::FullCellGrayscale => CellMode::FullCell,
        }
    }

    /// Whether this mode emits truecolor escapes.
    #[must_use]
    pub fn is_color(self) -> bool {
        matches!(self, Self::HalfCellColor | Self::FullCellColor)
    }

    /// Only HalfCell output drops empty and whitespace-only lines.
    #[must_use]
    pub fn strips_blank_lines(self) -> bool {
        self.cell_mode() == CellMode::HalfCell
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color = if self.is_color() { "color" } else { "grayscale" };
        write!(f, "{}/{color}", self.cell_mode())
    }
}

/// Configuration complète d'un rendu.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use pc_core::config::RenderConfig;
/// let config = RenderConfig::default();
/// assert_eq!(config.viewport_width, 80);
/// assert_eq!(config.mode, "halfcell");
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RenderConfig {
    // === Mode de rendu ===
    /// "halfcell" | "fullcell". Validé au moment du rendu.
    pub mode: String,
    /// Truecolor (true) ou glyphes en niveaux de gris (false).
    pub color: bool,
    /// Couleur substituée aux pixels totalement transparents.
    pub fallback_color: Option<Rgb>,

    // === Dimensions ===
    /// Largeur demandée en cellules. ≤ 0 = dérivée du ratio d'aspect.
    pub width: i32,
    /// Hauteur demandée en cellules. ≤ 0 = dérivée du ratio d'aspect.
    pub height: i32,
    /// Largeur du viewport utilisé quand aucune dimension n'est demandée.
    pub viewport_width: u32,
    /// Hauteur du viewport utilisé quand aucune dimension n'est demandée.
    pub viewport_height: u32,

    // === Contraste ===
    /// Exposant appliqué pendant la conversion en niveaux de gris.
    pub conversion_exponent: f64,
    /// Exposant appliqué avant la sélection du glyphe.
    pub glyph_exponent: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: DEFAULT_MODE.to_string(),
            color: true,
            fallback_color: None,
            width: 0,
            height: 0,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            conversion_exponent: CONVERSION_EXPONENT,
            glyph_exponent: GLYPH_EXPONENT,
        }
    }
}

impl RenderConfig {
    /// Resolve `mode` and `color` into a render strategy.
    ///
    /// # Errors
    /// Returns [`CoreError::UnsupportedMode`] for an unknown mode string.
    pub fn render_mode(&self) -> Result<RenderMode, CoreError> {
        RenderMode::parse(&self.mode, self.color)
    }

    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization and again after CLI overrides.
    pub fn clamp_all(&mut self) {
        let max_request = i32::try_from(MAX_DIMENSION).unwrap_or(i32::MAX);
        self.viewport_width = self.viewport_width.clamp(1, MAX_DIMENSION);
        self.viewport_height = self.viewport_height.clamp(1, MAX_DIMENSION);
        self.width = self.width.min(max_request);
        self.height = self.height.min(max_request);
        self.conversion_exponent = self.conversion_exponent.clamp(0.1, 4.0);
        self.glyph_exponent = self.glyph_exponent.clamp(0.1, 4.0);
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    render: Option<RenderSection>,
    viewport: Option<ViewportSection>,
    contrast: Option<ContrastSection>,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct RenderSection {
    mode: Option<String>,
    color: Option<bool>,
    fallback_color: Option<Rgb>,
    width: Option<i32>,
    height: Option<i32>,
}

#[derive(Deserialize)]
struct ViewportSection {
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Deserialize)]
struct ContrastSection {
    conversion_exponent: Option<f64>,
    glyph_exponent: Option<f64>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use pc_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Parse TOML text and overlay present fields onto the defaults.
///
/// # Errors
/// Returns an error on invalid TOML, unknown sections or a bad color value.
///
/// # Example
/// ```
/// use pc_core::config::parse_config;
/// let config = parse_config("[render]\nmode = \"fullcell\"\ncolor = false").unwrap();
/// assert_eq!(config.mode, "fullcell");
/// assert!(!config.color);
/// assert_eq!(config.viewport_height, 24);
/// ```
pub fn parse_config(content: &str) -> Result<RenderConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = RenderConfig::default();

    if let Some(r) = file.render {
        if let Some(v) = r.mode {
            config.mode = v;
        }
        if let Some(v) = r.color {
            config.color = v;
        }
        if r.fallback_color.is_some() {
            config.fallback_color = r.fallback_color;
        }
        if let Some(v) = r.width {
            config.width = v;
        }
        if let Some(v) = r.height {
            config.height = v;
        }
    }

    if let Some(v) = file.viewport {
        if let Some(w) = v.width {
            config.viewport_width = w;
        }
        if let Some(h) = v.height {
            config.viewport_height = h;
        }
    }

    if let Some(c) = file.contrast {
        if let Some(v) = c.conversion_exponent {
            config.conversion_exponent = v;
        }
        if let Some(v) = c.glyph_exponent {
            config.glyph_exponent = v;
        }
    }

    config.clamp_all();
    log::debug!("Config chargée : {config:?}");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn render_mode_table() {
        assert_eq!(
            RenderMode::parse("halfcell", true).unwrap(),
            RenderMode::HalfCellColor
        );
        assert_eq!(
            RenderMode::parse("fullcell", false).unwrap(),
            RenderMode::FullCellGrayscale
        );
        assert_eq!(
            RenderMode::parse("vector", true),
            Err(CoreError::UnsupportedMode {
                mode: "vector".into()
            })
        );
    }

    #[test]
    fn only_halfcell_strips_blank_lines() {
        assert_eq!(RenderMode::HalfCellColor.cell_mode(), CellMode::HalfCell);
        assert_eq!(RenderMode::FullCellGrayscale.cell_mode(), CellMode::FullCell);
        assert!(!RenderMode::FullCellGrayscale.strips_blank_lines());
        assert!(RenderMode::HalfCellColor.strips_blank_lines());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse_config("[viewport]\nwidth = 120").unwrap();
        assert_eq!(config.viewport_width, 120);
        assert_eq!(config.viewport_height, DEFAULT_VIEWPORT_HEIGHT);
        assert_eq!(config.mode, DEFAULT_MODE);
        assert!((config.glyph_exponent - GLYPH_EXPONENT).abs() < f64::EPSILON);
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let shipped = include_str!("../../../config/default.toml");
        assert_eq!(parse_config(shipped).unwrap(), RenderConfig::default());
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse_config("").unwrap(), RenderConfig::default());
    }

    #[test]
    fn fallback_color_is_parsed() {
        let config = parse_config("[render]\nfallback_color = \"#102030\"").unwrap();
        assert_eq!(config.fallback_color, Some(Rgb(0x10, 0x20, 0x30)));
        assert!(parse_config("[render]\nfallback_color = \"teal\"").is_err());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config =
            parse_config("[viewport]\nheight = 0\n[contrast]\nglyph_exponent = 99.0").unwrap();
        assert_eq!(config.viewport_height, 1);
        assert!((config.glyph_exponent - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn huge_requests_are_capped() {
        let mut config = RenderConfig {
            width: i32::MAX,
            height: -3,
            ..RenderConfig::default()
        };
        config.clamp_all();
        assert_eq!(config.width, 4096);
        assert_eq!(config.height, -3);
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nmode = \"fullcell\"\nwidth = 32").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.mode, "fullcell");
        assert_eq!(config.width, 32);
    }

    #[test]
    fn load_config_reports_missing_file() {
        let err = load_config(Path::new("/nonexistent/pixcell.toml")).unwrap_err();
        assert!(err.to_string().contains("Impossible de lire"), "{err}");
    }
}
