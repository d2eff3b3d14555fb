use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_channel::{Receiver, Sender, unbounded};
use tokio::signal;
use tokio::time::sleep;
use toast_overlay::Result;
use toast_overlay::config::Config;
use toast_overlay::container::{EventSource, HostChannel, ToastContainer};
use toast_overlay::controller::{Callbacks, Lifecycle};
use toast_overlay::driver::{self, FRAME_INTERVAL, FrameSink, HostEvent};
use toast_overlay::geometry::GeometryProvider;
use toast_overlay::render::RenderFrame;
use toast_overlay::telemetry::init_tracing;
use toast_overlay::types::Variant;
use tracing::{debug, info, warn};

use super::cli::Cli;

const DEFAULT_CONFIG: &str = "toast.toml";

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let mut config = Config::from_env_and_file(&config_path)?;
    apply_overrides(&mut config, &cli);

    let geometry = GeometryProvider::new(config.device_profile(), config.device.window);
    let props = config.props(geometry.positions(), false);
    info!(
        config = %config_path.display(),
        position = %config.toast.position,
        auto_hide = ?config.toast.auto_hide,
        animation = config.toast.animation,
        "starting toast demo"
    );

    let (tx, rx) = unbounded();
    let (hidden_tx, hidden_rx) = async_channel::bounded(1);
    let callbacks = Callbacks::observe(move |event| {
        info!(%event, "toast lifecycle");
        if event == Lifecycle::Hidden {
            let _ = hidden_tx.try_send(());
        }
    });

    let script = tokio::spawn(run_script(tx.clone(), hidden_rx, cli.tap_after, cli.hide_after));
    let interrupt = tokio::spawn(forward_interrupt(tx));

    let mut source = LoggingSource;
    let mut sink = LogSink::default();
    let toast =
        ToastContainer::mount_with_geometry(props, callbacks, geometry, &mut source, Instant::now());
    let exit = driver::run(toast, rx, &mut source, &mut sink, FRAME_INTERVAL).await;
    debug!(?exit, "driver returned");

    script.abort();
    interrupt.abort();
    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(duration) = cli.duration {
        config.toast.auto_hide = (!duration.is_zero()).then_some(duration);
    }
    if let Some(delay) = cli.delay {
        config.toast.delay = delay;
    }
    if cli.no_animation {
        config.toast.animation = false;
    }
    if let Some(variant) = Variant::from_flags(false, cli.failed, cli.warning) {
        config.toast.variant = Some(variant);
    }
    if let Some(message) = &cli.message {
        config.toast.message.clone_from(message);
    }
}

async fn run_script(
    tx: Sender<HostEvent>,
    hidden: Receiver<()>,
    tap_after: Option<Duration>,
    hide_after: Option<Duration>,
) {
    if tx.send(HostEvent::SetVisible(true)).await.is_err() {
        return;
    }
    if let Some(wait) = tap_after {
        sleep(wait).await;
        info!("simulating tap");
        if tx.send(HostEvent::Press).await.is_err() {
            return;
        }
    }
    if let Some(wait) = hide_after {
        sleep(wait).await;
        if tx.send(HostEvent::SetVisible(false)).await.is_err() {
            return;
        }
    }
    if hidden.recv().await.is_ok() {
        let _ = tx.send(HostEvent::Unmount).await;
    }
}

async fn forward_interrupt(tx: Sender<HostEvent>) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("shutdown signal received, unmounting toast");
            let _ = tx.send(HostEvent::Unmount).await;
        }
        Err(err) => warn!(error = %err, "failed to listen for ctrl-c"),
    }
}

struct LoggingSource;

impl EventSource for LoggingSource {
    fn attach(&mut self, channel: HostChannel) {
        debug!(?channel, "listener attached");
    }

    fn detach(&mut self, channel: HostChannel) {
        debug!(?channel, "listener detached");
    }
}

#[derive(Default)]
struct LogSink {
    mounted: bool,
}

impl FrameSink for LogSink {
    fn paint(&mut self, frame: Option<&RenderFrame>) {
        match frame {
            Some(frame) => {
                if !self.mounted {
                    info!(
                        bottom = frame.bottom,
                        margin = frame.margin_horizontal,
                        message = frame.body.as_ref().map_or("", |body| body.message.as_str()),
                        "overlay mounted"
                    );
                }
                debug!(
                    opacity = frame.opacity,
                    interactable = frame.interactable,
                    keyboard_height = frame.keyboard_height,
                    "paint"
                );
            }
            None if self.mounted => info!("overlay removed"),
            None => {}
        }
        self.mounted = frame.is_some();
    }
}
