//! Drone fleet types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operational state of a drone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DroneStatus {
    #[default]
    Idle,
    Flying,
    Charging,
    Delivering,
}

impl DroneStatus {
    /// Returns true while the drone is in the air.
    pub fn is_airborne(self) -> bool {
        matches!(self, DroneStatus::Flying | DroneStatus::Delivering)
    }
}

impl fmt::Display for DroneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DroneStatus::Idle => write!(f, "idle"),
            DroneStatus::Flying => write!(f, "flying"),
            DroneStatus::Charging => write!(f, "charging"),
            DroneStatus::Delivering => write!(f, "delivering"),
        }
    }
}

/// A simulated drone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    pub id: String,
    /// `[longitude, latitude, altitude_m]`
    pub position: [f64; 3],
    /// Degrees clockwise from north
    #[serde(default)]
    pub heading: f64,
    /// m/s
    #[serde(default)]
    pub speed: f64,
    /// Charge fraction in percent
    #[serde(default)]
    pub battery: f64,
    /// kg
    #[serde(default)]
    pub payload: f64,
    #[serde(default)]
    pub status: DroneStatus,
}

impl Drone {
    /// Creates an idle drone at `position` with a full battery.
    pub fn new(id: impl Into<String>, position: [f64; 3]) -> Self {
        Self {
            id: id.into(),
            position,
            heading: 0.0,
            speed: 0.0,
            battery: 100.0,
            payload: 0.0,
            status: DroneStatus::Idle,
        }
    }

    pub fn with_status(mut self, status: DroneStatus) -> Self {
        self.status = status;
        self
    }

    /// Overwrites the fields present in `patch`. The id is never changed.
    pub fn apply(&mut self, patch: &DronePatch) {
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(heading) = patch.heading {
            self.heading = heading;
        }
        if let Some(speed) = patch.speed {
            self.speed = speed;
        }
        if let Some(battery) = patch.battery {
            self.battery = battery;
        }
        if let Some(payload) = patch.payload {
            self.payload = payload;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Partial drone update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DronePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DroneStatus>,
}

impl DronePatch {
    pub fn with_position(mut self, position: [f64; 3]) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_status(mut self, status: DroneStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_battery(mut self, battery: f64) -> Self {
        self.battery = Some(battery);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airborne_statuses() {
        assert!(DroneStatus::Flying.is_airborne());
        assert!(DroneStatus::Delivering.is_airborne());
        assert!(!DroneStatus::Idle.is_airborne());
        assert!(!DroneStatus::Charging.is_airborne());
    }

    #[test]
    fn test_apply_patch() {
        let mut drone = Drone::new("drone_01", [139.76, 35.68, 120.0]);
        drone.apply(&DronePatch::default().with_status(DroneStatus::Delivering).with_battery(64.0));

        assert_eq!(drone.id, "drone_01");
        assert_eq!(drone.status, DroneStatus::Delivering);
        assert_eq!(drone.battery, 64.0);
        assert_eq!(drone.position, [139.76, 35.68, 120.0]);
    }

    #[test]
    fn test_drone_requires_three_component_position() {
        let bad = serde_json::from_str::<Drone>(r#"{"id":"d","position":[1.0,2.0]}"#);
        assert!(bad.is_err());

        let good: Drone =
            serde_json::from_str(r#"{"id":"d","position":[1.0,2.0,3.0],"status":"charging"}"#)
                .unwrap();
        assert_eq!(good.status, DroneStatus::Charging);
        assert_eq!(good.speed, 0.0);
    }
}
