use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;

use crate::Result;
use crate::error::ConfigError;
use crate::geometry::{GeometrySnapshot, Platform};
use crate::presentation::Color;
use crate::types::{Theme, Variant};

use super::defaults::{
    default_auto_hide, default_message, default_opacity, default_position, default_true,
    default_variant, default_window_height, default_window_width,
};
use super::env::{Lookup, env_auto_hide, env_bool, env_duration, env_parse, env_string};
use super::{
    AutoHideSetting, Config, DeviceSettings, HumantimeDuration, PositionSetting, ToastSettings,
};

/// Longest delay or auto-hide accepted from configuration.
const MAX_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Reads the file and `TOAST__SECTION__KEY` variables. `env` replaces the
/// process environment when set.
pub(super) fn load(
    path: impl AsRef<Path>,
    env: Option<::config::Map<String, String>>,
) -> std::result::Result<RawConfig, ConfigError> {
    let mut builder = ::config::Config::builder();
    let path = path.as_ref();
    builder = builder.add_source(::config::File::from(path).required(false));
    builder = builder.add_source(
        ::config::Environment::with_prefix("TOAST")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(env),
    );

    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) toast: RawToast,
    #[serde(default)]
    pub(super) device: RawDevice,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawToast {
    #[serde(default)]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) delay: Duration,
    #[serde(default = "default_auto_hide")]
    #[serde_as(as = "AutoHideSetting")]
    pub(super) duration: Option<Duration>,
    #[serde(default = "default_true")]
    pub(super) animation: bool,
    #[serde(default = "default_position")]
    pub(super) position: String,
    #[serde(default = "default_opacity")]
    pub(super) opacity: f32,
    #[serde(default = "default_true")]
    pub(super) hide_on_press: bool,
    #[serde(default = "default_true")]
    pub(super) shadow: bool,
    #[serde(default)]
    pub(super) shadow_color: Option<String>,
    #[serde(default = "default_variant")]
    pub(super) variant: Option<String>,
    #[serde(default, rename = "type")]
    pub(super) theme: Option<String>,
    #[serde(default)]
    pub(super) icon: Option<String>,
    #[serde(default = "default_message")]
    pub(super) message: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawDevice {
    #[serde(default)]
    pub(super) platform: Option<String>,
    #[serde(default)]
    pub(super) is_pad: bool,
    #[serde(default)]
    pub(super) is_tv: bool,
    #[serde(default = "default_window_width")]
    pub(super) width: f32,
    #[serde(default = "default_window_height")]
    pub(super) height: f32,
}

impl RawConfig {
    pub(super) fn apply_env_overrides(
        &mut self,
        lookup: Lookup<'_>,
    ) -> std::result::Result<(), ConfigError> {
        if let Some(delay) = env_duration(lookup, "TOAST_DELAY")? {
            self.toast.delay = delay;
        }
        if let Some(duration) = env_auto_hide(lookup, "TOAST_DURATION")? {
            self.toast.duration = duration;
        }
        if let Some(animation) = env_bool(lookup, "TOAST_ANIMATION")? {
            self.toast.animation = animation;
        }
        if let Some(position) = env_string(lookup, "TOAST_POSITION")? {
            self.toast.position = position;
        }
        if let Some(opacity) = env_parse::<f32>(lookup, "TOAST_OPACITY")? {
            self.toast.opacity = opacity;
        }
        if let Some(hide_on_press) = env_bool(lookup, "TOAST_HIDE_ON_PRESS")? {
            self.toast.hide_on_press = hide_on_press;
        }
        if let Some(variant) = env_string(lookup, "TOAST_VARIANT")? {
            self.toast.variant = Some(variant);
        }
        if let Some(theme) = env_string(lookup, "TOAST_THEME")? {
            self.toast.theme = Some(theme);
        }
        if let Some(message) = env_string(lookup, "TOAST_MESSAGE")? {
            self.toast.message = message;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        let toast = self.toast;
        let device = self.device;

        let position =
            PositionSetting::from_str(&toast.position).map_err(|message| ConfigError::InvalidField {
                field: "toast.position",
                message,
            })?;

        for (field, value) in [("toast.delay", Some(toast.delay)), ("toast.duration", toast.duration)] {
            if value.is_some_and(|d| d > MAX_DURATION) {
                return Err(ConfigError::invalid(
                    field,
                    format!("must not exceed {}", humantime::format_duration(MAX_DURATION)),
                )
                .into());
            }
        }

        if !(toast.opacity > 0.0 && toast.opacity <= 1.0) {
            return Err(ConfigError::invalid(
                "toast.opacity",
                format!("expected a value in (0, 1], got {}", toast.opacity),
            )
            .into());
        }

        let shadow_color = toast
            .shadow_color
            .as_deref()
            .map(|hex| {
                Color::from_hex(hex).ok_or_else(|| {
                    ConfigError::invalid("toast.shadow_color", format!("expected #RRGGBB, got {hex}"))
                })
            })
            .transpose()?;

        let variant = toast
            .variant
            .as_deref()
            .filter(|v| !v.trim().is_empty() && !v.eq_ignore_ascii_case("none"))
            .map(Variant::from_str)
            .transpose()
            .map_err(|message| ConfigError::InvalidField {
                field: "toast.variant",
                message,
            })?;

        let theme = toast
            .theme
            .as_deref()
            .map(Theme::from_str)
            .transpose()
            .map_err(|message| ConfigError::InvalidField {
                field: "toast.type",
                message,
            })?
            .unwrap_or_default();

        let platform = device
            .platform
            .as_deref()
            .map(Platform::from_str)
            .transpose()
            .map_err(|message| ConfigError::InvalidField {
                field: "device.platform",
                message,
            })?
            .unwrap_or_default();

        for (field, value) in [("device.width", device.width), ("device.height", device.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::invalid(
                    field,
                    format!("window dimension must be positive, got {value}"),
                )
                .into());
            }
        }

        Ok(Config {
            toast: ToastSettings {
                delay: toast.delay,
                auto_hide: toast.duration,
                animation: toast.animation,
                position,
                opacity: toast.opacity,
                hide_on_press: toast.hide_on_press,
                shadow: toast.shadow,
                shadow_color,
                variant,
                theme,
                icon: toast.icon.filter(|icon| !icon.trim().is_empty()),
                message: toast.message,
            },
            device: DeviceSettings {
                platform,
                is_pad: device.is_pad,
                is_tv: device.is_tv,
                window: GeometrySnapshot::new(device.width, device.height),
            },
        })
    }
}

impl Default for RawToast {
    fn default() -> Self {
        Self {
            delay: Duration::ZERO,
            duration: default_auto_hide(),
            animation: true,
            position: default_position(),
            opacity: default_opacity(),
            hide_on_press: true,
            shadow: true,
            shadow_color: None,
            variant: default_variant(),
            theme: None,
            icon: None,
            message: default_message(),
        }
    }
}

impl Default for RawDevice {
    fn default() -> Self {
        Self {
            platform: None,
            is_pad: false,
            is_tv: false,
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}
