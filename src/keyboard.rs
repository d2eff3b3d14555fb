use tracing::trace;

/// Most recent on-screen keyboard frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyboardSnapshot {
    /// Screen Y of the keyboard's top edge. Equal to the window height when
    /// the keyboard is hidden.
    pub top_y: f32,
}

/// Tracks keyboard frame changes.
///
/// The height is derived on demand from the latest window height, never
/// cached, so a paint always sees both snapshots as of just before it.
#[derive(Debug, Clone)]
pub struct KeyboardTracker {
    snapshot: KeyboardSnapshot,
}

impl KeyboardTracker {
    #[must_use]
    pub const fn new(window_height: f32) -> Self {
        Self {
            snapshot: KeyboardSnapshot {
                top_y: window_height,
            },
        }
    }

    #[must_use]
    pub const fn snapshot(&self) -> KeyboardSnapshot {
        self.snapshot
    }

    pub fn on_frame_change(&mut self, top_y: f32) {
        if !top_y.is_finite() {
            return;
        }
        trace!(top_y, "keyboard frame changed");
        self.snapshot.top_y = top_y;
    }

    #[must_use]
    pub fn height(&self, window_height: f32) -> f32 {
        (window_height - self.snapshot.top_y).max(0.0)
    }
}
