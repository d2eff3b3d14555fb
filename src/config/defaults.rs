use std::time::Duration;

use crate::controller::DEFAULT_OPACITY;
use crate::types::Durations;

pub(super) const fn default_true() -> bool {
    true
}

pub(super) const fn default_auto_hide() -> Option<Duration> {
    Some(Durations::SHORT)
}

pub(super) const fn default_opacity() -> f32 {
    DEFAULT_OPACITY
}

pub(super) fn default_position() -> String {
    "top".to_string()
}

pub(super) fn default_message() -> String {
    "Saved".to_string()
}

pub(super) fn default_variant() -> Option<String> {
    Some("success".to_string())
}

pub(super) const fn default_window_width() -> f32 {
    375.0
}

pub(super) const fn default_window_height() -> f32 {
    667.0
}
