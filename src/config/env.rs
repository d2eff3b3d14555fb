use std::env::VarError;
use std::time::Duration;

use humantime::parse_duration;

use crate::error::ConfigError;

use super::serde::parse_auto_hide;

/// Reads one environment variable. Swapped out in tests.
pub(super) type Lookup<'a> = &'a dyn Fn(&str) -> std::result::Result<String, VarError>;

pub(super) fn process_env(key: &str) -> std::result::Result<String, VarError> {
    std::env::var(key)
}

pub(super) fn env_string(
    lookup: Lookup<'_>,
    key: &'static str,
) -> std::result::Result<Option<String>, ConfigError> {
    match lookup(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(ConfigError::Other(format!("{key}: {err}"))),
    }
}

pub(super) fn env_parse<T>(
    lookup: Lookup<'_>,
    key: &'static str,
) -> std::result::Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env_string(lookup, key)?
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|err| ConfigError::invalid(key, err.to_string()))
        })
        .transpose()
}

pub(super) fn env_bool(
    lookup: Lookup<'_>,
    key: &'static str,
) -> std::result::Result<Option<bool>, ConfigError> {
    env_string(lookup, key)?
        .map(|value| match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::invalid(key, format!("expected a boolean, got {other}"))),
        })
        .transpose()
}

pub(super) fn env_duration(
    lookup: Lookup<'_>,
    key: &'static str,
) -> std::result::Result<Option<Duration>, ConfigError> {
    env_string(lookup, key)?
        .map(|value| parse_duration(&value).map_err(|err| ConfigError::invalid(key, err.to_string())))
        .transpose()
}

/// Reads an auto-hide setting. The outer `Option` is presence, the inner one
/// is `None` for "never hide".
pub(super) fn env_auto_hide(
    lookup: Lookup<'_>,
    key: &'static str,
) -> std::result::Result<Option<Option<Duration>>, ConfigError> {
    env_string(lookup, key)?
        .map(|value| parse_auto_hide(&value).map_err(|message| ConfigError::invalid(key, message)))
        .transpose()
}
