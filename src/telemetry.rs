//! Log output for the demo host.

use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt};

use crate::Result;
use crate::error::Error;

const FALLBACK_FILTER: &str = "info";

type OutputLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// How events are written to stderr.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    #[must_use]
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails when no filter parses, when JSON is asked for without the
/// `json-logs` feature, or when a subscriber is already set.
pub fn init_tracing(explicit_filter: Option<&str>, use_json: bool) -> Result<()> {
    let filter = resolve_filter(explicit_filter, std::env::var("RUST_LOG").ok())?;
    let output = output_layer(LogFormat::from_json_flag(use_json))?;
    tracing::subscriber::set_global_default(Registry::default().with(output).with(filter))
        .map_err(|err| Error::Telemetry(err.to_string()))
}

fn output_layer(format: LogFormat) -> Result<OutputLayer> {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);
    match format {
        LogFormat::Text => Ok(Box::new(layer)),
        #[cfg(feature = "json-logs")]
        LogFormat::Json => Ok(Box::new(layer.json().flatten_event(true))),
        #[cfg(not(feature = "json-logs"))]
        LogFormat::Json => Err(Error::Telemetry(
            "JSON logs need the `json-logs` feature".to_string(),
        )),
    }
}

/// First candidate that parses wins: explicit, then `RUST_LOG`, then `info`.
fn resolve_filter(explicit: Option<&str>, from_env: Option<String>) -> Result<EnvFilter> {
    explicit
        .map(str::to_owned)
        .into_iter()
        .chain(from_env)
        .chain(std::iter::once(FALLBACK_FILTER.to_owned()))
        .find_map(|candidate| EnvFilter::try_new(candidate).ok())
        .ok_or_else(|| Error::Telemetry("invalid log filter".to_string()))
}

#[cfg(test)]
mod tests {
    use super::{LogFormat, resolve_filter};

    #[test]
    fn explicit_filter_takes_precedence() {
        let filter = match resolve_filter(Some("toast_overlay=trace"), Some("warn".into())) {
            Ok(filter) => filter,
            Err(err) => panic!("filter should resolve: {err}"),
        };
        assert_eq!(filter.to_string(), "toast_overlay=trace");
    }

    #[test]
    fn invalid_candidates_fall_through_to_info() {
        let filter = match resolve_filter(
            Some("toast_overlay=loud"),
            Some("toast_overlay=noisy".into()),
        ) {
            Ok(filter) => filter,
            Err(err) => panic!("filter should resolve: {err}"),
        };
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn json_flag_selects_format() {
        assert_eq!(LogFormat::from_json_flag(true), LogFormat::Json);
        assert_eq!(LogFormat::from_json_flag(false), LogFormat::Text);
    }

    #[cfg(not(feature = "json-logs"))]
    #[test]
    fn json_without_feature_is_a_telemetry_error() {
        let Err(err) = super::output_layer(LogFormat::Json) else {
            panic!("json output should need the feature");
        };
        assert!(err.to_string().contains("json-logs"), "{err}");
    }
}
