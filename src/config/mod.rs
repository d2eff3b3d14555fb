use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::Result;
use crate::container::ToastProps;
use crate::controller::Intent;
use crate::error::Error as ToastError;
use crate::geometry::{DeviceProfile, GeometrySnapshot, Platform, Positions};
use crate::presentation::{Color, Icon};
use crate::render::Appearance;
use crate::types::{Theme, Variant};

mod defaults;
mod env;
mod raw;
mod serde;

pub(crate) use serde::{AutoHideSetting, HumantimeDuration};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub toast: ToastSettings,
    pub device: DeviceSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastSettings {
    pub delay: Duration,
    /// `None` disables auto-hide.
    pub auto_hide: Option<Duration>,
    pub animation: bool,
    pub position: PositionSetting,
    pub opacity: f32,
    pub hide_on_press: bool,
    pub shadow: bool,
    pub shadow_color: Option<Color>,
    pub variant: Option<Variant>,
    pub theme: Theme,
    pub icon: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceSettings {
    pub platform: Platform,
    pub is_pad: bool,
    pub is_tv: bool,
    pub window: GeometrySnapshot,
}

/// Vertical anchor, either a named preset or a raw pixel offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionSetting {
    Top,
    Bottom,
    Center,
    Offset(f32),
}

impl PositionSetting {
    #[must_use]
    pub const fn resolve(self, positions: Positions) -> f32 {
        match self {
            Self::Top => positions.top,
            Self::Bottom => positions.bottom,
            Self::Center => positions.center,
            Self::Offset(px) => px,
        }
    }
}

impl FromStr for PositionSetting {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "center" => Ok(Self::Center),
            other => other
                .parse::<f32>()
                .ok()
                .filter(|px| px.is_finite())
                .map(Self::Offset)
                .ok_or_else(|| format!("expected top, bottom, center or a number, got {other}")),
        }
    }
}

impl fmt::Display for PositionSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Bottom => f.write_str("bottom"),
            Self::Center => f.write_str("center"),
            Self::Offset(px) => write!(f, "{px}"),
        }
    }
}

impl Config {
    /// Load configuration from an optional TOML file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be parsed, when environment
    /// overrides are invalid, or when the resulting values fail validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path, None).map_err(ToastError::from)?;
        raw.apply_env_overrides(&env::process_env)
            .map_err(ToastError::from)?;
        raw.validate_and_build()
    }

    #[must_use]
    pub const fn device_profile(&self) -> DeviceProfile {
        DeviceProfile {
            platform: self.device.platform,
            is_pad: self.device.is_pad,
            is_tv: self.device.is_tv,
        }
    }

    /// Builds the props for one toast, resolving the position preset against
    /// the device's anchors.
    #[must_use]
    pub fn props(&self, positions: Positions, visible: bool) -> ToastProps {
        let toast = &self.toast;
        ToastProps {
            intent: Intent {
                visible,
                delay: toast.delay,
                auto_hide: toast.auto_hide,
                animation: toast.animation,
                opacity: toast.opacity,
                position: toast.position.resolve(positions),
                hide_on_press: toast.hide_on_press,
            },
            appearance: Appearance {
                variant: toast.variant,
                theme: toast.theme,
                icon: toast.icon.clone().map(Icon::Custom),
                shadow: toast.shadow,
                shadow_color: toast.shadow_color,
                message: toast.message.clone(),
            },
        }
    }
}
