use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// SGR reset, emitted after every styled cell.
pub const SGR_RESET: &str = "\x1b[0m";

/// Couleur truecolor 8 bits par canal.
///
/// # Example
/// ```
/// use pc_core::color::Rgb;
/// let c: Rgb = "#ff8000".parse().unwrap();
/// assert_eq!(c, Rgb(255, 128, 0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = CoreError;

    /// Accepts `R;G;B`, `R,G,B` (decimal) or `#RRGGBB` (hex).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidColor {
            value: s.to_string(),
        };
        let trimmed = s.trim();

        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Self(channel(0)?, channel(2)?, channel(4)?));
        }

        let mut parts = trimmed.split([';', ',']).map(|p| p.trim().parse::<u8>());
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) => Ok(Self(r, g, b)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        format!("{};{};{}", c.0, c.1, c.2)
    }
}

/// Append a truecolor foreground escape (`ESC[38;2;R;G;Bm`).
///
/// # Example
/// ```
/// use pc_core::color::{push_fg, Rgb};
/// let mut s = String::new();
/// push_fg(&mut s, Rgb(1, 2, 3));
/// assert_eq!(s, "\x1b[38;2;1;2;3m");
/// ```
#[inline]
pub fn push_fg(out: &mut String, c: Rgb) {
    // Writing into a String cannot fail.
    let _ = write!(out, "\x1b[38;2;{};{};{}m", c.0, c.1, c.2);
}

/// Append a truecolor background escape (`ESC[48;2;R;G;Bm`).
#[inline]
pub fn push_bg(out: &mut String, c: Rgb) {
    let _ = write!(out, "\x1b[48;2;{};{};{}m", c.0, c.1, c.2);
}
