//! Camera View Types
//!
//! The camera pose over the map and the partial updates applied to it.
//!
//! # Example
//!
//! ```
//! use map_types::{ViewState, ViewStatePatch};
//!
//! let mut view = ViewState::default();
//! view.apply(&ViewStatePatch::default().with_zoom(18.0));
//! assert_eq!(view.zoom, 18.0);
//! assert_eq!(view.longitude, 139.7671);
//! ```

use serde::{Deserialize, Serialize};

/// Duration of an animated camera transition requested by `fly_to`.
pub const FLY_TO_DURATION_MS: u32 = 2000;

/// Camera pose over the map.
///
/// Missing fields deserialize to the default view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    /// Tilt in degrees, 0 looks straight down
    pub pitch: f64,
    /// Rotation in degrees from north
    pub bearing: f64,
}

impl Default for ViewState {
    /// Tokyo Station, tilted.
    fn default() -> Self {
        Self {
            longitude: 139.7671,
            latitude: 35.6812,
            zoom: 14.0,
            pitch: 45.0,
            bearing: -17.6,
        }
    }
}

impl ViewState {
    /// Creates a view state from its five components.
    pub fn new(longitude: f64, latitude: f64, zoom: f64, pitch: f64, bearing: f64) -> Self {
        Self {
            longitude,
            latitude,
            zoom,
            pitch,
            bearing,
        }
    }

    /// Overwrites the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &ViewStatePatch) {
        if let Some(longitude) = patch.longitude {
            self.longitude = longitude;
        }
        if let Some(latitude) = patch.latitude {
            self.latitude = latitude;
        }
        if let Some(zoom) = patch.zoom {
            self.zoom = zoom;
        }
        if let Some(pitch) = patch.pitch {
            self.pitch = pitch;
        }
        if let Some(bearing) = patch.bearing {
            self.bearing = bearing;
        }
    }

    /// Returns a copy of this view with `patch` applied.
    pub fn merged(&self, patch: &ViewStatePatch) -> Self {
        let mut view = *self;
        view.apply(patch);
        view
    }

    /// Short coordinate readout, as shown in the map corner overlay.
    pub fn readout(&self) -> String {
        format!(
            "Lng: {:.4} Lat: {:.4} Zoom: {:.2} Pitch: {:.1}°",
            self.longitude, self.latitude, self.zoom, self.pitch
        )
    }
}

/// Partial view update; omitted fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewStatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearing: Option<f64>,
}

impl ViewStatePatch {
    /// Sets the target center.
    pub fn with_center(mut self, longitude: f64, latitude: f64) -> Self {
        self.longitude = Some(longitude);
        self.latitude = Some(latitude);
        self
    }

    /// Sets the target zoom.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    /// Sets the target pitch.
    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = Some(pitch);
        self
    }

    /// Sets the target bearing.
    pub fn with_bearing(mut self, bearing: f64) -> Self {
        self.bearing = Some(bearing);
        self
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.longitude.is_none()
            && self.latitude.is_none()
            && self.zoom.is_none()
            && self.pitch.is_none()
            && self.bearing.is_none()
    }
}

/// Animated camera move handed to the external map renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTransition {
    /// `[longitude, latitude]`
    pub center: [f64; 2],
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    pub duration_ms: u32,
}

impl CameraTransition {
    /// Builds a transition ending at `target`.
    pub fn to_view(target: &ViewState, duration_ms: u32) -> Self {
        Self {
            center: [target.longitude, target.latitude],
            zoom: target.zoom,
            pitch: target.pitch,
            bearing: target.bearing,
            duration_ms,
        }
    }

    /// The view state the camera settles on once the transition completes.
    pub fn target(&self) -> ViewState {
        ViewState::new(self.center[0], self.center[1], self.zoom, self.pitch, self.bearing)
    }
}
