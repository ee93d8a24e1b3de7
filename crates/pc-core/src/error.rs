use thiserror::Error;

/// Errors originating from the rendering engine.
///
/// Every variant is deterministic: the same input always fails the same way,
/// so callers report and abort rather than retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Zero-area image or a pixel buffer that does not match its dimensions.
    #[error("Image invalide : {reason}")]
    InvalidImage {
        /// What is wrong with the image.
        reason: String,
    },

    /// Render mode string outside `halfcell` / `fullcell`.
    #[error("Mode non supporté : {mode} (utilisez 'halfcell' ou 'fullcell')")]
    UnsupportedMode {
        /// The mode string that was rejected.
        mode: String,
    },

    /// Fallback color string that is neither `R;G;B`, `R,G,B` nor `#RRGGBB`.
    #[error("Couleur invalide : {value}")]
    InvalidColor {
        /// The rejected color string.
        value: String,
    },

    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidImage`].
    pub(crate) fn invalid_image(reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            reason: reason.into(),
        }
    }
}
