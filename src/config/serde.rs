use std::time::Duration;

use humantime::parse_duration;
use serde::Deserialize;
use serde_with::DeserializeAs;

use crate::types::Durations;

pub(crate) struct HumantimeDuration;

impl<'de> DeserializeAs<'de, Duration> for HumantimeDuration {
    fn deserialize_as<D>(deserializer: D) -> std::result::Result<Duration, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}

/// Auto-hide duration: `never`, `short`, `long` or a humantime string.
/// A zero duration also means never.
pub(crate) struct AutoHideSetting;

impl<'de> DeserializeAs<'de, Option<Duration>> for AutoHideSetting {
    fn deserialize_as<D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_auto_hide(&raw).map_err(serde::de::Error::custom)
    }
}

pub(super) fn parse_auto_hide(raw: &str) -> std::result::Result<Option<Duration>, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "never" | "sticky" => Ok(None),
        "short" => Ok(Some(Durations::SHORT)),
        "long" => Ok(Some(Durations::LONG)),
        other => parse_duration(other)
            .map(|d| (!d.is_zero()).then_some(d))
            .map_err(|err| err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{AutoHideSetting, HumantimeDuration, parse_auto_hide};
    use crate::types::Durations;
    use serde::Deserialize;
    use serde_with::serde_as;
    use std::time::Duration;

    #[test]
    fn humantime_duration_parses_strings() {
        #[serde_as]
        #[derive(Deserialize)]
        struct Sample {
            #[serde_as(as = "Option<HumantimeDuration>")]
            delay: Option<Duration>,
        }

        let sample: Sample = match serde_json::from_str(r#"{"delay":"350ms"}"#) {
            Ok(value) => value,
            Err(err) => panic!("failed to parse sample json: {err}"),
        };
        assert_eq!(sample.delay, Some(Duration::from_millis(350)));
    }

    #[test]
    fn auto_hide_accepts_presets() {
        #[serde_as]
        #[derive(Deserialize)]
        struct Sample {
            #[serde_as(as = "AutoHideSetting")]
            duration: Option<Duration>,
        }

        let sample: Sample = match serde_json::from_str(r#"{"duration":"LONG"}"#) {
            Ok(value) => value,
            Err(err) => panic!("failed to parse sample json: {err}"),
        };
        assert_eq!(sample.duration, Some(Durations::LONG));
    }

    #[test]
    fn zero_and_never_disable_auto_hide() {
        assert_eq!(parse_auto_hide("never"), Ok(None));
        assert_eq!(parse_auto_hide("0s"), Ok(None));
        assert_eq!(parse_auto_hide("short"), Ok(Some(Durations::SHORT)));
        assert_eq!(parse_auto_hide("1500ms"), Ok(Some(Duration::from_millis(1_500))));
        assert!(parse_auto_hide("soon").is_err());
    }
}
