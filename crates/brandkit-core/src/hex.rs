//! `#rrggbb` color parsing shared by config validation and the color resolver.

/// An 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats as uppercase `#RRGGBB`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Mean of the three channels.
    #[must_use]
    pub fn channel_mean(self) -> f64 {
        (f64::from(self.r) + f64::from(self.g) + f64::from(self.b)) / 3.0
    }

    /// Perceptual luminance on a 0..=255 scale (`0.299R + 0.587G + 0.114B`).
    #[must_use]
    pub fn luminance(self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }

    /// Channel-wise complement (`255 - c`).
    #[must_use]
    pub const fn complement(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }
}

/// Validates a 3- or 6-digit hex color, with or without a leading `#`, and
/// returns it as `#rrggbb`.
///
/// Three-digit shorthand is expanded (`#abc` → `#aabbcc`). Letter case of the
/// input is preserved.
///
/// ```
/// assert_eq!(brandkit_core::normalize_hex("123456").as_deref(), Some("#123456"));
/// assert_eq!(brandkit_core::normalize_hex(" #fA0 ").as_deref(), Some("#ffAA00"));
/// assert_eq!(brandkit_core::normalize_hex("#12345"), None);
/// ```
#[must_use]
pub fn normalize_hex(raw: &str) -> Option<String> {
    let digits = raw.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match digits.len() {
        6 => Some(format!("#{digits}")),
        3 => {
            let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
            Some(format!("#{expanded}"))
        }
        _ => None,
    }
}

/// Parses a `#rrggbb` (or 3-digit) string into channels.
#[must_use]
pub fn parse_rgb(hex: &str) -> Option<Rgb> {
    let normalized = normalize_hex(hex)?;
    let channel = |i: usize| u8::from_str_radix(&normalized[i..i + 2], 16).ok();
    Some(Rgb::new(channel(1)?, channel(3)?, channel(5)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_hex_accepts_six_digits_with_and_without_hash() {
        assert_eq!(normalize_hex("#1F2937").as_deref(), Some("#1F2937"));
        assert_eq!(normalize_hex("1f2937").as_deref(), Some("#1f2937"));
    }

    #[test]
    fn normalize_hex_expands_shorthand() {
        assert_eq!(normalize_hex("#abc").as_deref(), Some("#aabbcc"));
    }

    #[test]
    fn normalize_hex_rejects_other_lengths_and_non_hex() {
        assert_eq!(normalize_hex("#abcd"), None);
        assert_eq!(normalize_hex("#12345"), None);
        assert_eq!(normalize_hex("#GGGGGG"), None);
        assert_eq!(normalize_hex("rgb(0,0,0)"), None);
        assert_eq!(normalize_hex(""), None);
    }

    #[test]
    fn parse_rgb_reads_channels() {
        assert_eq!(parse_rgb("#102030"), Some(Rgb::new(0x10, 0x20, 0x30)));
        assert_eq!(parse_rgb("fff"), Some(Rgb::new(255, 255, 255)));
    }

    #[test]
    fn rgb_helpers() {
        let c = Rgb::new(10, 20, 30);
        assert_eq!(c.to_hex(), "#0A141E");
        assert!((c.channel_mean() - 20.0).abs() < f64::EPSILON);
        assert_eq!(c.complement(), Rgb::new(245, 235, 225));
        assert!(Rgb::new(255, 255, 255).luminance() > 254.0);
    }
}
