use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use humantime::parse_duration;

#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(author, version, about = "Drive a transient toast overlay from the terminal", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Auto-hide duration (e.g. "2s"); "0s" keeps the toast up.
    #[arg(long, value_parser = parse_duration)]
    pub duration: Option<Duration>,

    /// Delay before the toast starts fading in.
    #[arg(long, value_parser = parse_duration)]
    pub delay: Option<Duration>,

    /// Snap between opacities instead of fading.
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_animation: bool,

    /// Show the failure variant.
    #[arg(long, action = ArgAction::SetTrue)]
    pub failed: bool,

    /// Show the warning variant.
    #[arg(long, action = ArgAction::SetTrue)]
    pub warning: bool,

    /// Overrides the configured message.
    #[arg(long, value_name = "TEXT")]
    pub message: Option<String>,

    /// Simulate a tap this long after the show request.
    #[arg(long, value_parser = parse_duration, value_name = "DURATION")]
    pub tap_after: Option<Duration>,

    /// Withdraw the visible intent this long after the show request.
    #[arg(long, value_parser = parse_duration, value_name = "DURATION")]
    pub hide_after: Option<Duration>,

    /// Emit JSON logs (requires `--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Explicit log filter (e.g. "toast_overlay=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use std::time::Duration;

    #[test]
    fn parses_script_timings() {
        let cli = match Cli::try_parse_from([
            "toast-demo",
            "--tap-after",
            "1s",
            "--duration",
            "3500ms",
            "--no-animation",
        ]) {
            Ok(cli) => cli,
            Err(err) => panic!("valid arguments rejected: {err}"),
        };
        assert_eq!(cli.tap_after, Some(Duration::from_secs(1)));
        assert_eq!(cli.duration, Some(Duration::from_millis(3_500)));
        assert!(cli.no_animation);
        assert!(cli.hide_after.is_none());
    }

    #[test]
    fn rejects_malformed_durations() {
        assert!(Cli::try_parse_from(["toast-demo", "--delay", "soon"]).is_err());
    }
}
