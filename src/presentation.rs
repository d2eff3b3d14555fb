//! Variant and theme to color/icon lookup.

use std::fmt;

use crate::types::{Theme, Variant};

/// RGBA color with an 8-bit channel per component and a unit alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parses `#RRGGBB`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (self.a - 1.0).abs() < f32::EPSILON {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

const SUCCESS: Color = Color::rgb(0x3A, 0xDA, 0x81);
const FAILURE: Color = Color::rgb(0xFB, 0x71, 0x81);
const WARNING: Color = Color::rgb(0xFF, 0xC8, 0x33);
const LIGHT_BACKGROUND_ALPHA: f32 = 0.1;

/// Icon shown at the leading edge of the toast body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    /// Caller-supplied icon, identified by an opaque name.
    Custom(String),
}

impl Icon {
    #[must_use]
    pub const fn default_for(variant: Variant) -> Self {
        match variant {
            Variant::Success => Self::Success,
            Variant::Failure => Self::Error,
            Variant::Warning => Self::Warning,
        }
    }
}

/// Resolved colors and icon for one toast body.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub icon: Icon,
}

#[must_use]
pub const fn accent(variant: Variant) -> Color {
    match variant {
        Variant::Success => SUCCESS,
        Variant::Failure => FAILURE,
        Variant::Warning => WARNING,
    }
}

/// Picks colors and icon for `variant` under `theme`. An `icon_override`
/// always replaces the variant's default icon.
#[must_use]
pub fn select(variant: Variant, theme: Theme, icon_override: Option<&Icon>) -> Palette {
    let accent = accent(variant);
    let (background, foreground) = match theme {
        Theme::Default => (accent, Color::WHITE),
        Theme::Light => (accent.with_alpha(LIGHT_BACKGROUND_ALPHA), accent),
    };
    Palette {
        background,
        foreground,
        icon: icon_override
            .cloned()
            .unwrap_or_else(|| Icon::default_for(variant)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_uses_solid_accent_and_white_text() {
        let palette = select(Variant::Success, Theme::Default, None);
        assert_eq!(palette.background.to_string(), "#3ADA81");
        assert_eq!(palette.foreground, Color::WHITE);
        assert_eq!(palette.icon, Icon::Success);
    }

    #[test]
    fn light_theme_tints_background_and_colors_text() {
        let palette = select(Variant::Failure, Theme::Light, None);
        assert_eq!(palette.background.to_string(), "rgba(251, 113, 129, 0.1)");
        assert_eq!(palette.foreground.to_string(), "#FB7181");
        assert_eq!(palette.icon, Icon::Error);
    }

    #[test]
    fn override_icon_wins_for_every_variant() {
        let custom = Icon::Custom("bell".into());
        for variant in [Variant::Success, Variant::Failure, Variant::Warning] {
            assert_eq!(select(variant, Theme::Default, Some(&custom)).icon, custom);
        }
    }

    #[test]
    fn warning_accent_matches_brand_yellow() {
        assert_eq!(accent(Variant::Warning), Color::from_hex("#FFC833").unwrap_or(Color::BLACK));
    }

    #[test]
    fn from_hex_rejects_malformed_input() {
        assert_eq!(Color::from_hex("#000"), None);
        assert_eq!(Color::from_hex("FFFFFF"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
        assert_eq!(Color::from_hex("#00ff7f"), Some(Color::rgb(0x00, 0xFF, 0x7F)));
    }
}
