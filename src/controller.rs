//! Visibility and fade state machine for a single toast.
//!
//! The controller turns a declarative [`Intent`] plus timer expiries and
//! taps into lifecycle callbacks and an opacity signal:
//!
//! ```text
//! Hidden -> ScheduledToShow -> Showing -> Visible -> Hiding -> Hidden
//! ```
//!
//! Time never advances on its own. Every entry point takes the host's current
//! instant and first fires whatever became due before it, each at its own
//! deadline, so the outcome is the same whether the host wakes exactly on a
//! deadline or late. [`ToastController::next_deadline`] tells the host when to
//! wake next.
//!
//! While a fade is in flight it is never interrupted. A show or hide request
//! arriving meanwhile is recorded (latest wins) and applied once the fade
//! lands, after that fade's own callback has fired.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::geometry::Positions;
use crate::types::Durations;

/// Fade duration when animation is enabled.
pub const FADE_DURATION: Duration = Duration::from_millis(200);

/// Opacity reached when fully shown, unless the intent says otherwise.
pub const DEFAULT_OPACITY: f32 = 0.8;

/// Owner-supplied description of how the toast should behave.
///
/// Replaced wholesale on every change; only a flip of `visible` triggers a
/// show or hide; the other fields apply to the next transition that reads
/// them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intent {
    pub visible: bool,
    /// Wait before honoring a show.
    pub delay: Duration,
    /// Auto-hide delay once visible. `None` keeps the toast up until it is
    /// hidden explicitly.
    pub auto_hide: Option<Duration>,
    pub animation: bool,
    /// Target opacity in (0, 1].
    pub opacity: f32,
    /// Vertical anchor offset in pixels.
    pub position: f32,
    pub hide_on_press: bool,
}

impl Default for Intent {
    fn default() -> Self {
        Self {
            visible: false,
            delay: Duration::ZERO,
            auto_hide: Some(Durations::SHORT),
            animation: true,
            opacity: DEFAULT_OPACITY,
            position: Positions::TOP,
            hide_on_press: true,
        }
    }
}

impl Intent {
    #[must_use]
    pub const fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub const fn auto_hide(mut self, auto_hide: Option<Duration>) -> Self {
        self.auto_hide = auto_hide;
        self
    }

    #[must_use]
    pub const fn animation(mut self, animation: bool) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub const fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub const fn position(mut self, position: f32) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub const fn hide_on_press(mut self, hide_on_press: bool) -> Self {
        self.hide_on_press = hide_on_press;
        self
    }

    #[must_use]
    pub const fn fade_duration(&self) -> Duration {
        if self.animation {
            FADE_DURATION
        } else {
            Duration::ZERO
        }
    }

    /// Opacity the fade-in lands on. Values outside (0, 1] that cannot be
    /// capped at 1 fall back to [`DEFAULT_OPACITY`].
    fn target_opacity(&self) -> f32 {
        if self.opacity > 0.0 {
            self.opacity.min(1.0)
        } else {
            DEFAULT_OPACITY
        }
    }

    /// Auto-hide delay with zero normalised to "never".
    fn effective_auto_hide(&self) -> Option<Duration> {
        self.auto_hide.filter(|after| !after.is_zero())
    }
}

/// Discrete state of the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Hidden,
    ScheduledToShow,
    Showing,
    Visible,
    Hiding,
}

impl Phase {
    #[must_use]
    pub const fn is_animating(self) -> bool {
        matches!(self, Self::Showing | Self::Hiding)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    EaseIn,
    EaseOut,
}

impl Easing {
    /// Maps linear progress in [0, 1] onto the curve.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// One opacity animation. Owned by the `Showing`/`Hiding` state it drives.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Fade {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
    easing: Easing,
}

impl Fade {
    fn ends_at(&self) -> Instant {
        self.started + self.duration
    }

    fn value_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Motion {
    Hidden,
    Showing(Fade),
    Visible,
    Hiding(Fade),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Request {
    Show,
    Hide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Due {
    Fade,
    ShowTimer,
    HideTimer,
}

/// Lifecycle notifications, in the order the controller can emit them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Press,
    Show,
    Shown,
    Hide,
    Hidden,
}

impl Lifecycle {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Press => "press",
            Self::Show => "show",
            Self::Shown => "shown",
            Self::Hide => "hide",
            Self::Hidden => "hidden",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Callback = Box<dyn FnMut()>;

/// Optional lifecycle callbacks. Unset callbacks are skipped.
#[derive(Default)]
pub struct Callbacks {
    on_press: Option<Callback>,
    on_show: Option<Callback>,
    on_shown: Option<Callback>,
    on_hide: Option<Callback>,
    on_hidden: Option<Callback>,
}

impl Callbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_press(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_press = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_show(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_show = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_shown(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_shown = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_hide(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_hide = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_hidden(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_hidden = Some(Box::new(f));
        self
    }

    /// Routes every lifecycle event to one observer.
    #[must_use]
    pub fn observe(observer: impl FnMut(Lifecycle) + Clone + 'static) -> Self {
        let mut press = observer.clone();
        let mut show = observer.clone();
        let mut shown = observer.clone();
        let mut hide = observer.clone();
        let mut hidden = observer;
        Self::new()
            .on_press(move || press(Lifecycle::Press))
            .on_show(move || show(Lifecycle::Show))
            .on_shown(move || shown(Lifecycle::Shown))
            .on_hide(move || hide(Lifecycle::Hide))
            .on_hidden(move || hidden(Lifecycle::Hidden))
    }

    fn slot(&mut self, event: Lifecycle) -> &mut Option<Callback> {
        match event {
            Lifecycle::Press => &mut self.on_press,
            Lifecycle::Show => &mut self.on_show,
            Lifecycle::Shown => &mut self.on_shown,
            Lifecycle::Hide => &mut self.on_hide,
            Lifecycle::Hidden => &mut self.on_hidden,
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_press", &self.on_press.is_some())
            .field("on_show", &self.on_show.is_some())
            .field("on_shown", &self.on_shown.is_some())
            .field("on_hide", &self.on_hide.is_some())
            .field("on_hidden", &self.on_hidden.is_some())
            .finish()
    }
}

/// Read-only view of the controller's runtime state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RuntimeState {
    pub phase: Phase,
    pub opacity: f32,
    pub pending_show: Option<Instant>,
    pub pending_hide: Option<Instant>,
}

/// Owns the phase, both timers and the opacity channel of one toast.
#[derive(Debug)]
pub struct ToastController {
    intent: Intent,
    motion: Motion,
    resting_opacity: f32,
    interactable: bool,
    show_timer: Option<Instant>,
    hide_timer: Option<Instant>,
    pending: Option<Request>,
    callbacks: Callbacks,
    torn_down: bool,
}

impl ToastController {
    /// Creates a hidden controller. An initially visible intent arms the show
    /// timer; the show itself happens on a later [`advance`](Self::advance).
    #[must_use]
    pub fn new(intent: Intent, now: Instant) -> Self {
        let mut controller = Self {
            intent,
            motion: Motion::Hidden,
            resting_opacity: 0.0,
            interactable: false,
            show_timer: None,
            hide_timer: None,
            pending: None,
            callbacks: Callbacks::default(),
            torn_down: false,
        };
        if intent.visible {
            controller.schedule_show(now);
        }
        controller
    }

    #[must_use]
    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn set_callbacks(&mut self, callbacks: Callbacks) {
        self.callbacks = callbacks;
    }

    #[must_use]
    pub const fn intent(&self) -> &Intent {
        &self.intent
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self.motion {
            Motion::Hidden if self.show_timer.is_some() => Phase::ScheduledToShow,
            Motion::Hidden => Phase::Hidden,
            Motion::Showing(_) => Phase::Showing,
            Motion::Visible => Phase::Visible,
            Motion::Hiding(_) => Phase::Hiding,
        }
    }

    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.phase().is_animating()
    }

    /// Whether the overlay should catch touches. Off means pass-through.
    #[must_use]
    pub const fn is_interactable(&self) -> bool {
        self.interactable
    }

    /// Whether the host should mount the overlay at all.
    #[must_use]
    pub const fn should_render(&self) -> bool {
        !self.torn_down && (self.intent.visible || self.is_animating())
    }

    /// Opacity to paint at `now`.
    #[must_use]
    pub fn opacity(&self, now: Instant) -> f32 {
        match self.motion {
            Motion::Showing(fade) | Motion::Hiding(fade) => fade.value_at(now),
            Motion::Hidden | Motion::Visible => self.resting_opacity,
        }
    }

    #[must_use]
    pub fn runtime(&self, now: Instant) -> RuntimeState {
        RuntimeState {
            phase: self.phase(),
            opacity: self.opacity(now),
            pending_show: self.show_timer,
            pending_hide: self.hide_timer,
        }
    }

    /// Earliest instant at which [`advance`](Self::advance) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.due_items().map(|(at, _)| at).min()
    }

    /// Replaces the intent. A flip of `visible` schedules a show or requests a
    /// hide; a show never happens within this call, even with zero delay.
    pub fn set_intent(&mut self, intent: Intent, now: Instant) {
        if self.torn_down {
            return;
        }
        self.advance(now);
        let was_visible = self.intent.visible;
        self.intent = intent;
        if intent.visible == was_visible {
            return;
        }
        if intent.visible {
            self.schedule_show(now);
        } else {
            self.request_hide(now);
        }
    }

    /// Handles a tap on the overlay. Ignored while the overlay passes touches
    /// through.
    pub fn press(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }
        self.advance(now);
        if !self.interactable {
            trace!("tap passed through non-interactable toast");
            return;
        }
        self.fire(Lifecycle::Press);
        if self.intent.hide_on_press {
            self.request_hide(now);
        }
    }

    /// Fires everything due at or before `now`, in deadline order.
    pub fn advance(&mut self, now: Instant) {
        while let Some((at, due)) = self.next_due(now) {
            match due {
                Due::Fade => match self.motion {
                    Motion::Showing(_) => self.finish_showing(at),
                    Motion::Hiding(_) => self.finish_hiding(at),
                    Motion::Hidden | Motion::Visible => {}
                },
                Due::ShowTimer => self.request_show(at),
                Due::HideTimer => {
                    debug!("auto-hide timer elapsed");
                    self.request_hide(at);
                }
            }
        }
    }

    /// Cancels both timers and forces `Hidden` without waiting for a fade.
    /// Hide callbacks still fire if the toast was up. Further events are
    /// ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.show_timer = None;
        self.hide_timer = None;
        self.pending = None;
        self.interactable = false;
        match self.motion {
            Motion::Hidden => {}
            Motion::Showing(_) | Motion::Visible => {
                self.fire(Lifecycle::Hide);
                self.land_hidden();
            }
            Motion::Hiding(_) => self.land_hidden(),
        }
        self.torn_down = true;
        debug!("toast controller torn down");
    }

    fn next_due(&self, now: Instant) -> Option<(Instant, Due)> {
        self.due_items()
            .filter(|(at, _)| *at <= now)
            .min_by_key(|(at, _)| *at)
    }

    fn due_items(&self) -> impl Iterator<Item = (Instant, Due)> {
        let fade = match self.motion {
            Motion::Showing(fade) | Motion::Hiding(fade) => Some((fade.ends_at(), Due::Fade)),
            Motion::Hidden | Motion::Visible => None,
        };
        fade.into_iter()
            .chain(self.show_timer.map(|at| (at, Due::ShowTimer)))
            .chain(self.hide_timer.map(|at| (at, Due::HideTimer)))
    }

    fn schedule_show(&mut self, now: Instant) {
        self.show_timer = None;
        self.hide_timer = None;
        if self.pending == Some(Request::Hide) {
            self.pending = None;
        }
        self.show_timer = now.checked_add(self.intent.delay);
        if self.show_timer.is_some() {
            debug!(delay = ?self.intent.delay, "show scheduled");
        } else {
            warn!(delay = ?self.intent.delay, "show delay out of range, show parked");
        }
    }

    fn request_show(&mut self, at: Instant) {
        self.show_timer = None;
        match self.motion {
            Motion::Hidden => self.enter_showing(at),
            Motion::Showing(_) | Motion::Visible => self.pending = None,
            Motion::Hiding(_) => {
                trace!("show recorded until fade-out lands");
                self.pending = Some(Request::Show);
            }
        }
    }

    fn request_hide(&mut self, at: Instant) {
        if self.show_timer.take().is_some() {
            debug!("pending show cancelled");
        }
        self.hide_timer = None;
        match self.motion {
            Motion::Hidden => {}
            Motion::Showing(_) => {
                trace!("hide recorded until fade-in lands");
                self.pending = Some(Request::Hide);
            }
            Motion::Visible => self.enter_hiding(at),
            Motion::Hiding(_) => self.pending = None,
        }
    }

    fn enter_showing(&mut self, at: Instant) {
        let fade = Fade {
            from: self.resting_opacity,
            to: self.intent.target_opacity(),
            started: at,
            duration: self.intent.fade_duration(),
            easing: Easing::EaseOut,
        };
        self.interactable = true;
        self.set_motion(Motion::Showing(fade));
        self.fire(Lifecycle::Show);
        if fade.duration.is_zero() {
            self.finish_showing(at);
        }
    }

    fn finish_showing(&mut self, at: Instant) {
        let Motion::Showing(fade) = self.motion else {
            return;
        };
        self.resting_opacity = fade.to;
        self.set_motion(Motion::Visible);
        self.fire(Lifecycle::Shown);
        if let Some(after) = self.intent.effective_auto_hide() {
            self.hide_timer = at.checked_add(after);
            if self.hide_timer.is_none() {
                warn!(auto_hide = ?after, "auto-hide out of range, toast stays up");
            }
        }
        if self.pending.take() == Some(Request::Hide) {
            self.request_hide(at);
        }
    }

    fn enter_hiding(&mut self, at: Instant) {
        let fade = Fade {
            from: self.resting_opacity,
            to: 0.0,
            started: at,
            duration: self.intent.fade_duration(),
            easing: Easing::EaseIn,
        };
        self.hide_timer = None;
        self.interactable = false;
        self.set_motion(Motion::Hiding(fade));
        self.fire(Lifecycle::Hide);
        if fade.duration.is_zero() {
            self.finish_hiding(at);
        }
    }

    fn finish_hiding(&mut self, at: Instant) {
        if !matches!(self.motion, Motion::Hiding(_)) {
            return;
        }
        self.land_hidden();
        if self.pending.take() == Some(Request::Show) {
            self.enter_showing(at);
        }
    }

    fn land_hidden(&mut self) {
        self.resting_opacity = 0.0;
        self.set_motion(Motion::Hidden);
        self.fire(Lifecycle::Hidden);
    }

    fn set_motion(&mut self, motion: Motion) {
        let from = self.phase();
        self.motion = motion;
        debug!(from = ?from, to = ?self.phase(), "toast phase changed");
    }

    fn fire(&mut self, event: Lifecycle) {
        trace!(%event, "lifecycle callback");
        if let Some(callback) = self.callbacks.slot(event) {
            callback();
        }
    }
}
