//! Sample data fixtures for testing.
//!
//! This module provides ready-made test data for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // map-types = { path = "../map-types", features = ["test-fixtures"] }
//!
//! use map_types::fixtures;
//!
//! let drones = fixtures::sample_drones();
//! let cursors = fixtures::sample_cursors();
//! ```

use crate::{Annotation, CursorPosition, Drone};

/// Returns the sample drone fleet.
///
/// Contains 4 drones, one per status: flying, delivering, charging, idle.
pub fn sample_drones() -> Vec<Drone> {
    let json = include_str!("../tests/fixtures/sample_drones.json");
    serde_json::from_str(json).expect("Failed to parse sample_drones.json")
}

/// Returns sample collaboration cursors.
///
/// Contains 3 cursors; the last one (`user_mei`) carries a malformed color
/// and the oldest timestamp.
pub fn sample_cursors() -> Vec<CursorPosition> {
    let json = include_str!("../tests/fixtures/sample_cursors.json");
    serde_json::from_str(json).expect("Failed to parse sample_cursors.json")
}

/// Returns one annotation of each kind.
pub fn sample_annotations() -> Vec<Annotation> {
    let json = include_str!("../tests/fixtures/sample_annotations.json");
    serde_json::from_str(json).expect("Failed to parse sample_annotations.json")
}

/// Returns a specific drone by ID from the samples.
pub fn get_drone(drone_id: &str) -> Option<Drone> {
    sample_drones().into_iter().find(|d| d.id == drone_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnnotationKind, DroneStatus};

    #[test]
    fn test_sample_drones_cover_every_status() {
        let drones = sample_drones();
        assert_eq!(drones.len(), 4);
        for status in [
            DroneStatus::Idle,
            DroneStatus::Flying,
            DroneStatus::Charging,
            DroneStatus::Delivering,
        ] {
            assert!(drones.iter().any(|d| d.status == status), "missing {}", status);
        }
    }

    #[test]
    fn test_sample_cursors_load() {
        let cursors = sample_cursors();
        assert_eq!(cursors.len(), 3);
        assert_eq!(cursors[0].color, "#00c864");
    }

    #[test]
    fn test_sample_annotations_cover_every_kind() {
        let kinds: Vec<_> = sample_annotations().iter().map(|a| a.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                AnnotationKind::Point,
                AnnotationKind::Line,
                AnnotationKind::Polygon,
                AnnotationKind::Text
            ]
        );
    }

    #[test]
    fn test_get_drone() {
        assert!(get_drone("drone_02").is_some());
        assert!(get_drone("drone_99").is_none());
    }
}
