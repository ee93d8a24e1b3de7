/// Number of complete (upper, lower) row pairs; an odd last row is dropped.
///
/// # Example
/// ```
/// use pc_cells::normalize::paired_rows;
/// assert_eq!(paired_rows(5), 2);
/// assert_eq!(paired_rows(1), 0);
/// ```
#[inline]
#[must_use]
pub fn paired_rows(height: u32) -> u32 {
    height / 2
}

/// Drop empty and whitespace-only lines, keeping the others in order.
///
/// Escape sequences are not whitespace, so a line carrying any SGR code
/// survives even if it draws only spaces.
///
/// # Example
/// ```
/// use pc_cells::normalize::strip_blank_lines;
/// let lines = vec!["▓▓".to_string(), "   ".to_string(), String::new()];
/// assert_eq!(strip_blank_lines(lines), ["▓▓"]);
/// ```
#[must_use]
pub fn strip_blank_lines(mut lines: Vec<String>) -> Vec<String> {
    lines.retain(|line| !line.trim().is_empty());
    lines
}
