//! Host loop that feeds a [`ToastContainer`] from a channel and wakes it on
//! its own deadlines.
//!
//! The container owns non-`Send` callbacks, so [`run`] is meant to be awaited
//! on the task that mounted it rather than spawned.

use std::time::Duration;

use async_channel::Receiver;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};

use crate::container::{EventSource, ToastContainer, ToastProps};
use crate::geometry::GeometrySnapshot;
use crate::render::RenderFrame;

/// Default repaint cadence while a fade is in flight.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Messages a host sends to the running toast.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// Replace every prop.
    Update(Box<ToastProps>),
    /// Flip only the visible intent.
    SetVisible(bool),
    Press,
    WindowChange(GeometrySnapshot),
    KeyboardFrame(f32),
    Unmount,
}

/// Receives each frame the loop paints; `None` means nothing is mounted.
pub trait FrameSink {
    fn paint(&mut self, frame: Option<&RenderFrame>);
}

/// Why [`run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    Unmounted,
    ChannelClosed,
}

/// Drives the toast until the host asks to unmount or drops its sender.
///
/// While a fade is running the loop wakes every `frame_interval` (capped at
/// the next deadline) so the sink sees intermediate opacities. Otherwise it
/// sleeps until the controller's next timer or the next host event.
pub async fn run(
    mut toast: ToastContainer,
    events: Receiver<HostEvent>,
    source: &mut dyn EventSource,
    sink: &mut dyn FrameSink,
    frame_interval: Duration,
) -> Exit {
    paint(&mut toast, sink);

    let exit = loop {
        let wake = next_wake(&toast, frame_interval);
        tokio::select! {
            biased;
            event = events.recv() => match event {
                Ok(HostEvent::Unmount) => break Exit::Unmounted,
                Ok(event) => apply(&mut toast, event),
                Err(_) => break Exit::ChannelClosed,
            },
            () = sleep_or_park(wake) => {
                toast.advance(now());
            }
        }
        paint(&mut toast, sink);
    };

    toast.unmount(source);
    sink.paint(None);
    info!(?exit, "toast driver stopped");
    exit
}

fn apply(toast: &mut ToastContainer, event: HostEvent) {
    debug!(?event, "host event");
    let now = now();
    match event {
        HostEvent::Update(props) => toast.update(*props, now),
        HostEvent::SetVisible(visible) => toast.set_visible(visible, now),
        HostEvent::Press => toast.press(now),
        HostEvent::WindowChange(window) => toast.on_window_change(window),
        HostEvent::KeyboardFrame(top_y) => toast.on_keyboard_frame(top_y),
        HostEvent::Unmount => {}
    }
}

fn paint(toast: &mut ToastContainer, sink: &mut dyn FrameSink) {
    let now = now();
    toast.advance(now);
    let frame = toast.render(now);
    sink.paint(frame.as_ref());
}

fn next_wake(toast: &ToastContainer, frame_interval: Duration) -> Option<Instant> {
    let deadline = toast.next_deadline().map(Instant::from_std);
    if !toast.controller().is_animating() || frame_interval.is_zero() {
        return deadline;
    }
    let frame = Instant::now() + frame_interval;
    Some(deadline.map_or(frame, |at| at.min(frame)))
}

async fn sleep_or_park(wake: Option<Instant>) {
    match wake {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

// Read through tokio so a paused test clock drives the controller too.
fn now() -> std::time::Instant {
    Instant::now().into_std()
}
