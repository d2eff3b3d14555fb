//! Window geometry and device characteristics.
//!
//! Device traits (platform, notch) are fixed for the lifetime of the process,
//! so the anchor presets are computed once. Window width and height change on
//! rotation or resize and are tracked live.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fraction of the window width a toast may occupy.
pub const MAX_WIDTH_FRACTION: f32 = 0.8;

/// Window heights (or widths, in landscape) of phones with a home indicator.
const NOTCH_DIMENSIONS: [f32; 2] = [812.0, 896.0];

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    #[default]
    Other,
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            "other" | "" => Ok(Self::Other),
            other => Err(format!("unknown platform: {other}")),
        }
    }
}

/// Static description of the device the toast runs on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceProfile {
    pub platform: Platform,
    pub is_pad: bool,
    pub is_tv: bool,
}

impl DeviceProfile {
    #[must_use]
    pub const fn new(platform: Platform) -> Self {
        Self {
            platform,
            is_pad: false,
            is_tv: false,
        }
    }

    /// Whether the device reserves a bottom home-indicator area.
    #[must_use]
    pub fn has_notch(&self, window: GeometrySnapshot) -> bool {
        self.platform == Platform::Ios
            && !self.is_pad
            && !self.is_tv
            && NOTCH_DIMENSIONS
                .iter()
                .any(|d| *d == window.height || *d == window.width)
    }
}

/// Current window size in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometrySnapshot {
    pub width: f32,
    pub height: f32,
}

impl GeometrySnapshot {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn is_well_formed(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl fmt::Display for GeometrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Vertical anchor offsets, in pixels from the relevant edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Positions {
    pub top: f32,
    pub bottom: f32,
    pub center: f32,
}

impl Positions {
    pub const TOP: f32 = 20.0;
    pub const BOTTOM: f32 = 70.0;
    pub const BOTTOM_NOTCH: f32 = 110.0;
    pub const CENTER: f32 = 0.0;

    #[must_use]
    pub const fn for_notch(notch: bool) -> Self {
        Self {
            top: Self::TOP,
            bottom: if notch { Self::BOTTOM_NOTCH } else { Self::BOTTOM },
            center: Self::CENTER,
        }
    }
}

/// Tracks the live window size for layout.
#[derive(Debug, Clone)]
pub struct GeometryProvider {
    device: DeviceProfile,
    positions: Positions,
    snapshot: GeometrySnapshot,
}

impl GeometryProvider {
    /// Creates a provider from the startup window reading.
    ///
    /// A malformed initial reading is replaced by a 1x1 window so margins
    /// stay finite until the first valid resize event arrives.
    #[must_use]
    pub fn new(device: DeviceProfile, initial: GeometrySnapshot) -> Self {
        let snapshot = if initial.is_well_formed() {
            initial
        } else {
            warn!(window = %initial, "ignoring malformed startup geometry");
            GeometrySnapshot::new(1.0, 1.0)
        };
        Self {
            device,
            positions: Positions::for_notch(device.has_notch(snapshot)),
            snapshot,
        }
    }

    #[must_use]
    pub const fn device(&self) -> DeviceProfile {
        self.device
    }

    /// Anchor presets computed at startup.
    #[must_use]
    pub const fn positions(&self) -> Positions {
        self.positions
    }

    #[must_use]
    pub const fn snapshot(&self) -> GeometrySnapshot {
        self.snapshot
    }

    /// Applies a window change event. Returns `false` when the reading was
    /// rejected and the previous snapshot kept.
    pub fn on_window_change(&mut self, window: GeometrySnapshot) -> bool {
        if !window.is_well_formed() {
            warn!(window = %window, kept = %self.snapshot, "ignoring malformed window change");
            return false;
        }
        debug!(from = %self.snapshot, to = %window, "window changed");
        self.snapshot = window;
        true
    }

    /// Horizontal margin that keeps the toast within
    /// [`MAX_WIDTH_FRACTION`] of the window width.
    #[must_use]
    pub fn horizontal_margin(&self) -> f32 {
        self.snapshot.width * (1.0 - MAX_WIDTH_FRACTION) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iphone() -> DeviceProfile {
        DeviceProfile::new(Platform::Ios)
    }

    #[test]
    fn notch_detected_on_tall_iphones_in_either_orientation() {
        assert!(iphone().has_notch(GeometrySnapshot::new(375.0, 812.0)));
        assert!(iphone().has_notch(GeometrySnapshot::new(896.0, 414.0)));
        assert!(!iphone().has_notch(GeometrySnapshot::new(375.0, 667.0)));
    }

    #[test]
    fn notch_requires_ios_phone() {
        let window = GeometrySnapshot::new(375.0, 812.0);
        assert!(!DeviceProfile::new(Platform::Android).has_notch(window));
        let pad = DeviceProfile {
            is_pad: true,
            ..iphone()
        };
        assert!(!pad.has_notch(window));
        let tv = DeviceProfile {
            is_tv: true,
            ..iphone()
        };
        assert!(!tv.has_notch(window));
    }

    #[test]
    fn bottom_preset_depends_on_notch() {
        let notch = GeometryProvider::new(iphone(), GeometrySnapshot::new(375.0, 812.0));
        let plain = GeometryProvider::new(iphone(), GeometrySnapshot::new(375.0, 667.0));
        assert_eq!(notch.positions().bottom, 110.0);
        assert_eq!(plain.positions().bottom, 70.0);
        assert_eq!(plain.positions().top, 20.0);
        assert_eq!(plain.positions().center, 0.0);
    }

    #[test]
    fn presets_are_fixed_after_rotation() {
        let mut geometry = GeometryProvider::new(iphone(), GeometrySnapshot::new(375.0, 812.0));
        assert!(geometry.on_window_change(GeometrySnapshot::new(1024.0, 768.0)));
        assert_eq!(geometry.positions().bottom, 110.0);
    }

    #[test]
    fn margin_tracks_live_width() {
        let mut geometry = GeometryProvider::new(iphone(), GeometrySnapshot::new(400.0, 800.0));
        assert!((geometry.horizontal_margin() - 40.0).abs() < 1e-4);
        geometry.on_window_change(GeometrySnapshot::new(800.0, 400.0));
        assert!((geometry.horizontal_margin() - 80.0).abs() < 1e-4);
    }

    #[test]
    fn malformed_reading_keeps_last_snapshot() {
        let mut geometry = GeometryProvider::new(iphone(), GeometrySnapshot::new(400.0, 800.0));
        assert!(!geometry.on_window_change(GeometrySnapshot::new(f32::NAN, 800.0)));
        assert!(!geometry.on_window_change(GeometrySnapshot::new(400.0, 0.0)));
        assert_eq!(geometry.snapshot(), GeometrySnapshot::new(400.0, 800.0));
    }
}
