use std::fmt::{self, Display};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Content variant of the toast body.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Success,
    Failure,
    Warning,
}

impl Variant {
    /// Resolves the legacy boolean selectors. When several flags are set the
    /// first of success, failed, warning wins.
    #[must_use]
    pub const fn from_flags(success: bool, failed: bool, warning: bool) -> Option<Self> {
        if success {
            Some(Self::Success)
        } else if failed {
            Some(Self::Failure)
        } else if warning {
            Some(Self::Warning)
        } else {
            None
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Warning => "warning",
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "success" | "ok" => Ok(Self::Success),
            "failure" | "failed" | "error" => Ok(Self::Failure),
            "warning" | "warn" => Ok(Self::Warning),
            other => Err(format!("unknown variant: {other}")),
        }
    }
}

/// Theme mode selected by the `type` option.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Light,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Light => "light",
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "default" => Ok(Self::Default),
            "light" => Ok(Self::Light),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Named auto-hide presets.
pub struct Durations;

impl Durations {
    pub const SHORT: Duration = Duration::from_millis(2_000);
    pub const LONG: Duration = Duration::from_millis(3_500);
}

/// Converts a signed millisecond count into an auto-hide duration.
///
/// Zero or negative values mean the toast never hides on its own.
#[must_use]
pub fn auto_hide_from_millis(ms: i64) -> Option<Duration> {
    u64::try_from(ms)
        .ok()
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}

/// Converts a signed millisecond count into a show delay, clamping negative
/// values to zero.
#[must_use]
pub fn delay_from_millis(ms: i64) -> Duration {
    u64::try_from(ms).map_or(Duration::ZERO, Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::{Durations, Theme, Variant, auto_hide_from_millis, delay_from_millis};
    use std::str::FromStr;
    use std::time::Duration;

    #[test]
    fn variant_flags_prefer_success_then_failed() {
        assert_eq!(Variant::from_flags(true, true, true), Some(Variant::Success));
        assert_eq!(Variant::from_flags(false, true, true), Some(Variant::Failure));
        assert_eq!(Variant::from_flags(false, false, true), Some(Variant::Warning));
        assert_eq!(Variant::from_flags(false, false, false), None);
    }

    #[test]
    fn variant_and_theme_parse_aliases() {
        assert_eq!(Variant::from_str("FAILED"), Ok(Variant::Failure));
        assert_eq!(Variant::from_str("warn"), Ok(Variant::Warning));
        assert!(Variant::from_str("info").is_err());
        assert_eq!(Theme::from_str("Light"), Ok(Theme::Light));
        assert_eq!(Theme::from_str(""), Ok(Theme::Default));
        assert!(Theme::from_str("dark").is_err());
    }

    #[test]
    fn non_positive_durations_disable_auto_hide() {
        assert_eq!(auto_hide_from_millis(0), None);
        assert_eq!(auto_hide_from_millis(-5), None);
        assert_eq!(auto_hide_from_millis(2_000), Some(Durations::SHORT));
    }

    #[test]
    fn negative_delay_clamps_to_zero() {
        assert_eq!(delay_from_millis(-100), Duration::ZERO);
        assert_eq!(delay_from_millis(250), Duration::from_millis(250));
    }

    #[test]
    fn long_preset_outlasts_short() {
        assert!(Durations::LONG > Durations::SHORT);
    }
}
