use std::path::PathBuf;

use clap::Parser;
use pc_core::color::Rgb;
use pc_core::config::RenderConfig;

/// pixcell — render an image as half-cell or full-cell terminal text.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image à afficher (PNG, JPEG, GIF, WebP, BMP).
    pub image: PathBuf,

    /// Largeur en cellules. ≤ 0 : dérivée du ratio d'aspect.
    #[arg(short = 'W', long, allow_negative_numbers = true)]
    pub width: Option<i32>,

    /// Hauteur en lignes d'image. ≤ 0 : dérivée du ratio d'aspect.
    #[arg(short = 'H', long, allow_negative_numbers = true)]
    pub height: Option<i32>,

    /// Mode de rendu : halfcell ou fullcell.
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Glyphes en niveaux de gris au lieu de la couleur truecolor.
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Couleur des pixels transparents : "R;G;B", "R,G,B" ou "#RRGGBB".
    #[arg(long)]
    pub fallback_color: Option<Rgb>,

    /// Fichier de configuration TOML.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Overlay the flags that were given onto `config`.
    ///
    /// The mode string is copied as-is; it is validated when rendering.
    pub fn apply_overrides(&self, config: &mut RenderConfig) {
        if let Some(w) = self.width {
            config.width = w;
        }
        if let Some(h) = self.height {
            config.height = h;
        }
        if let Some(ref mode) = self.mode {
            config.mode.clone_from(mode);
        }
        if self.no_color {
            config.color = false;
        }
        if self.fallback_color.is_some() {
            config.fallback_color = self.fallback_color;
        }
    }
}
