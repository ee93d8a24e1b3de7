/// Rampe HalfCell : seuil d'intensité (après courbe de contraste) → glyphe.
///
/// Ordered by descending threshold; the first strictly exceeded entry wins.
pub const HALFCELL_RAMP: &[(f64, &str)] = &[
    (0.80, "█"),
    (0.65, "▓"),
    (0.45, "▒"),
    (0.25, "░"),
    (0.05, "▄"),
];

/// Glyph for HalfCell intensities at or below the last threshold.
pub const HALFCELL_EMPTY: &str = " ";

/// Rampe FullCell. Les glyphes sont doublés pour garder des cellules carrées.
///
/// The 0.05 band is a single space on purpose: faint detail renders
/// narrower than an empty cell.
pub const FULLCELL_RAMP: &[(f64, &str)] = &[
    (0.80, "██"),
    (0.65, "▓▓"),
    (0.45, "▒▒"),
    (0.25, "░░"),
    (0.05, " "),
];

/// Glyph for FullCell intensities at or below the last threshold.
pub const FULLCELL_EMPTY: &str = "  ";

/// Lookup table mapping a grayscale byte [0..255] → glyph.
///
/// Pré-calculée une fois par rendu : la courbe de contraste et la
/// classification par seuils sont évaluées pour les 256 intensités possibles.
///
/// # Example
/// ```
/// use pc_core::charset::{ShadeLut, HALFCELL_EMPTY, HALFCELL_RAMP};
/// let lut = ShadeLut::new(HALFCELL_RAMP, HALFCELL_EMPTY, 0.7);
/// assert_eq!(lut.map(0), " ");
/// assert_eq!(lut.map(255), "█");
/// ```
pub struct ShadeLut {
    lut: [&'static str; 256],
}

impl ShadeLut {
    /// Build the table from a descending `(threshold, glyph)` ramp.
    ///
    /// Each byte `i` is normalized to `i / 255`, raised to `exponent`, then
    /// classified with strict `>` against the ramp thresholds.
    #[must_use]
    pub fn new(ramp: &[(f64, &'static str)], empty: &'static str, exponent: f64) -> Self {
        let mut lut = [empty; 256];
        for (i, slot) in lut.iter_mut().enumerate() {
            let enhanced = (i as f64 / 255.0).powf(exponent);
            *slot = ramp
                .iter()
                .find(|(threshold, _)| enhanced > *threshold)
                .map_or(empty, |(_, glyph)| *glyph);
        }
        Self { lut }
    }

    /// Map an intensity to its glyph.
    #[inline(always)]
    #[must_use]
    pub fn map(&self, intensity: u8) -> &'static str {
        self.lut[intensity as usize]
    }
}
