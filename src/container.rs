//! The mounted toast: controller plus the leaf providers it lays out with.

use std::time::Instant;

use tracing::{debug, trace};

use crate::controller::{Callbacks, Intent, Phase, ToastController};
use crate::geometry::{DeviceProfile, GeometryProvider, GeometrySnapshot};
use crate::keyboard::KeyboardTracker;
use crate::render::{Appearance, RenderFrame};

/// Host event streams the container listens to while mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostChannel {
    WindowChange,
    KeyboardFrame,
}

impl HostChannel {
    pub const ALL: [Self; 2] = [Self::WindowChange, Self::KeyboardFrame];
}

/// Registration point for host listeners, injected so tests need no real
/// window system.
pub trait EventSource {
    fn attach(&mut self, channel: HostChannel);
    fn detach(&mut self, channel: HostChannel);
}

/// Everything the owner supplies on each render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastProps {
    pub intent: Intent,
    pub appearance: Appearance,
}

#[derive(Debug)]
pub struct ToastContainer {
    controller: ToastController,
    geometry: GeometryProvider,
    keyboard: KeyboardTracker,
    appearance: Appearance,
    keyboard_height: f32,
}

impl ToastContainer {
    /// Mounts the toast and attaches its host listeners.
    pub fn mount(
        props: ToastProps,
        callbacks: Callbacks,
        device: DeviceProfile,
        window: GeometrySnapshot,
        source: &mut dyn EventSource,
        now: Instant,
    ) -> Self {
        Self::mount_with_geometry(
            props,
            callbacks,
            GeometryProvider::new(device, window),
            source,
            now,
        )
    }

    /// Mounts against an existing provider, e.g. one whose
    /// [`GeometryProvider::positions`] already fed `props`.
    pub fn mount_with_geometry(
        props: ToastProps,
        callbacks: Callbacks,
        geometry: GeometryProvider,
        source: &mut dyn EventSource,
        now: Instant,
    ) -> Self {
        let keyboard = KeyboardTracker::new(geometry.snapshot().height);
        for channel in HostChannel::ALL {
            source.attach(channel);
        }
        debug!(window = %geometry.snapshot(), visible = props.intent.visible, "toast mounted");
        Self {
            controller: ToastController::new(props.intent, now).with_callbacks(callbacks),
            geometry,
            keyboard,
            appearance: props.appearance,
            keyboard_height: 0.0,
        }
    }

    /// Applies a new set of props.
    pub fn update(&mut self, props: ToastProps, now: Instant) {
        self.appearance = props.appearance;
        self.controller.set_intent(props.intent, now);
    }

    /// Flips only the `visible` intent, keeping every other prop.
    pub fn set_visible(&mut self, visible: bool, now: Instant) {
        let intent = self.controller.intent().visible(visible);
        self.controller.set_intent(intent, now);
    }

    pub fn set_callbacks(&mut self, callbacks: Callbacks) {
        self.controller.set_callbacks(callbacks);
    }

    pub fn on_window_change(&mut self, window: GeometrySnapshot) {
        self.geometry.on_window_change(window);
    }

    pub fn on_keyboard_frame(&mut self, top_y: f32) {
        self.keyboard.on_frame_change(top_y);
    }

    pub fn press(&mut self, now: Instant) {
        self.controller.press(now);
    }

    pub fn advance(&mut self, now: Instant) {
        self.controller.advance(now);
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.controller.next_deadline()
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.controller.phase()
    }

    #[must_use]
    pub const fn controller(&self) -> &ToastController {
        &self.controller
    }

    #[must_use]
    pub const fn geometry(&self) -> &GeometryProvider {
        &self.geometry
    }

    /// Keyboard height used by the most recent paint.
    #[must_use]
    pub const fn keyboard_height(&self) -> f32 {
        self.keyboard_height
    }

    /// Describes the frame to paint at `now`, or `None` when nothing should be
    /// mounted. Keyboard height is recomputed here, right before the paint.
    pub fn render(&mut self, now: Instant) -> Option<RenderFrame> {
        self.keyboard_height = self.keyboard.height(self.geometry.snapshot().height);
        if !self.controller.should_render() {
            return None;
        }
        let frame = RenderFrame {
            bottom: self.controller.intent().position,
            margin_horizontal: self.geometry.horizontal_margin(),
            opacity: self.controller.opacity(now),
            interactable: self.controller.is_interactable(),
            keyboard_height: self.keyboard_height,
            shadow: self.appearance.shadow(),
            body: self.appearance.body(),
        };
        trace!(opacity = frame.opacity, interactable = frame.interactable, "frame");
        Some(frame)
    }

    /// Detaches host listeners and tears the controller down.
    pub fn unmount(mut self, source: &mut dyn EventSource) {
        for channel in HostChannel::ALL {
            source.detach(channel);
        }
        self.controller.teardown();
        debug!("toast unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Platform;
    use crate::types::Variant;
    use std::time::Duration;

    #[derive(Default)]
    struct Listeners {
        attached: Vec<HostChannel>,
    }

    impl EventSource for Listeners {
        fn attach(&mut self, channel: HostChannel) {
            self.attached.push(channel);
        }

        fn detach(&mut self, channel: HostChannel) {
            self.attached.retain(|c| *c != channel);
        }
    }

    fn mount(intent: Intent, source: &mut Listeners, now: Instant) -> ToastContainer {
        ToastContainer::mount(
            ToastProps {
                intent,
                appearance: Appearance::new(Some(Variant::Success), "saved"),
            },
            Callbacks::new(),
            DeviceProfile::new(Platform::Android),
            GeometrySnapshot::new(400.0, 800.0),
            source,
            now,
        )
    }

    #[test]
    fn listeners_follow_mount_lifecycle() {
        let mut source = Listeners::default();
        let toast = mount(Intent::default(), &mut source, Instant::now());
        assert_eq!(source.attached, HostChannel::ALL.to_vec());
        toast.unmount(&mut source);
        assert!(source.attached.is_empty());
    }

    #[test]
    fn hidden_toast_renders_nothing() {
        let mut source = Listeners::default();
        let mut toast = mount(Intent::default(), &mut source, Instant::now());
        assert!(toast.render(Instant::now()).is_none());
    }

    #[test]
    fn frame_uses_latest_geometry_and_keyboard() {
        let t0 = Instant::now();
        let mut source = Listeners::default();
        let mut toast = mount(Intent::default().visible(true).position(70.0), &mut source, t0);
        toast.advance(t0 + Duration::from_millis(200));

        toast.on_keyboard_frame(500.0);
        toast.on_window_change(GeometrySnapshot::new(600.0, 700.0));
        let Some(frame) = toast.render(t0 + Duration::from_millis(200)) else {
            panic!("visible toast should render");
        };
        assert_eq!(frame.keyboard_height, 200.0);
        assert!((frame.margin_horizontal - 60.0).abs() < 1e-4);
        assert_eq!(frame.bottom, 70.0);
        assert!(frame.interactable);
        assert!((frame.opacity - 0.8).abs() < f32::EPSILON);
        assert!(frame.body.is_some());
    }

    #[test]
    fn scheduled_toast_mounts_transparent_and_pass_through() {
        let t0 = Instant::now();
        let mut source = Listeners::default();
        let mut toast = mount(
            Intent::default().visible(true).delay(Duration::from_millis(500)),
            &mut source,
            t0,
        );
        let Some(frame) = toast.render(t0) else {
            panic!("visible intent should mount the overlay");
        };
        assert_eq!(frame.opacity, 0.0);
        assert!(!frame.interactable);
    }

    #[test]
    fn notch_preset_from_shared_provider_reaches_the_frame() {
        let t0 = Instant::now();
        let mut source = Listeners::default();
        let geometry = GeometryProvider::new(
            DeviceProfile::new(Platform::Ios),
            GeometrySnapshot::new(375.0, 812.0),
        );
        let bottom = geometry.positions().bottom;
        let mut toast = ToastContainer::mount_with_geometry(
            ToastProps {
                intent: Intent::default().visible(true).position(bottom),
                appearance: Appearance::new(None, "copied"),
            },
            Callbacks::new(),
            geometry,
            &mut source,
            t0,
        );
        assert_eq!(source.attached, HostChannel::ALL.to_vec());
        assert_eq!(toast.geometry().positions().bottom, 110.0);

        toast.advance(t0 + Duration::from_millis(200));
        let Some(frame) = toast.render(t0 + Duration::from_millis(200)) else {
            panic!("visible toast should render");
        };
        assert_eq!(frame.bottom, 110.0);
    }
}
