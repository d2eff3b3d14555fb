//! Frame description handed to the host's drawing layer.

use crate::presentation::{self, Color, Icon, Palette};
use crate::types::{Theme, Variant};

/// Drop shadow under the toast body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub offset_x: f32,
    pub offset_y: f32,
    pub opacity: f32,
    pub radius: f32,
    pub elevation: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            offset_x: 4.0,
            offset_y: 4.0,
            opacity: 0.8,
            radius: 6.0,
            elevation: 10.0,
        }
    }
}

/// Content and styling options. Pure pass-through for the state machine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Appearance {
    pub variant: Option<Variant>,
    pub theme: Theme,
    pub icon: Option<Icon>,
    pub shadow: bool,
    pub shadow_color: Option<Color>,
    pub message: String,
}

impl Appearance {
    #[must_use]
    pub fn new(variant: Option<Variant>, message: impl Into<String>) -> Self {
        Self {
            variant,
            message: message.into(),
            shadow: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn shadow(&self) -> Option<Shadow> {
        self.shadow.then(|| Shadow {
            color: self.shadow_color.unwrap_or(Color::BLACK),
            ..Shadow::default()
        })
    }

    #[must_use]
    pub fn body(&self) -> Option<Body> {
        let variant = self.variant?;
        Some(Body {
            palette: presentation::select(variant, self.theme, self.icon.as_ref()),
            message: self.message.clone(),
        })
    }
}

/// Colored toast body with its message.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub palette: Palette,
    pub message: String,
}

/// Everything needed to paint one frame of the overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    /// Offset of the overlay from the bottom edge.
    pub bottom: f32,
    pub margin_horizontal: f32,
    pub opacity: f32,
    /// Whether the overlay catches touches. The root always passes touches
    /// outside the body through.
    pub interactable: bool,
    pub keyboard_height: f32,
    pub shadow: Option<Shadow>,
    /// `None` when no variant is selected.
    pub body: Option<Body>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadow_color_override_keeps_geometry() {
        let appearance = Appearance {
            shadow_color: Color::from_hex("#123456"),
            ..Appearance::new(Some(Variant::Success), "saved")
        };
        let shadow = appearance.shadow();
        assert_eq!(shadow.map(|s| s.color), Color::from_hex("#123456"));
        assert_eq!(shadow.map(|s| s.radius), Some(6.0));
    }

    #[test]
    fn disabled_shadow_is_absent() {
        let appearance = Appearance {
            shadow: false,
            ..Appearance::new(None, "")
        };
        assert!(appearance.shadow().is_none());
    }

    #[test]
    fn body_requires_a_variant() {
        assert!(Appearance::new(None, "hello").body().is_none());
        let body = Appearance::new(Some(Variant::Warning), "careful").body();
        assert_eq!(body.map(|b| b.message), Some("careful".to_string()));
    }
}
