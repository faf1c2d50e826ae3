use std::fmt;

/// Une couleur RGB 8 bits par canal.
///
/// # Example
/// ```
/// use cc_core::color::Rgb;
/// let c = Rgb::new(255, 128, 0);
/// assert_eq!(c.to_string(), "#ff8000");
/// assert_eq!(c.to_rgba(), [255, 128, 0, 255]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

/// Padding / end-of-data marker. Never assigned to a symbol.
pub const SENTINEL: Rgb = Rgb::new(255, 255, 255);

/// Color written for a symbol the active table does not know.
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque RGBA quadruplet, as stored in the pixel grid.
    #[inline(always)]
    #[must_use]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// Drops alpha.
    #[inline(always)]
    #[must_use]
    pub const fn from_rgba(px: [u8; 4]) -> Self {
        Self::new(px[0], px[1], px[2])
    }

    /// Luminance relative simplifiée (BT.601) dans [0.0, 1.0].
    #[must_use]
    pub fn luminance(self) -> f32 {
        (0.299 * f32::from(self.r) + 0.587 * f32::from(self.g) + 0.114 * f32::from(self.b))
            / 255.0
    }

    /// Black on light colors, white on dark ones.
    ///
    /// # Example
    /// ```
    /// use cc_core::color::{Rgb, BLACK, SENTINEL};
    /// assert_eq!(Rgb::new(255, 255, 0).contrast(), BLACK);
    /// assert_eq!(Rgb::new(0, 0, 128).contrast(), SENTINEL);
    /// ```
    #[must_use]
    pub fn contrast(self) -> Rgb {
        if self.luminance() > 0.5 { BLACK } else { SENTINEL }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_conversion_drops_alpha() {
        let c = Rgb::new(1, 2, 3);
        let mut px = c.to_rgba();
        px[3] = 17;
        assert_eq!(Rgb::from_rgba(px), c);
    }

    #[test]
    fn luminance_extremes() {
        assert!(BLACK.luminance().abs() < f32::EPSILON);
        assert!((SENTINEL.luminance() - 1.0).abs() < 0.001);
    }
}
