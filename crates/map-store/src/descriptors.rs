//! Layer descriptors consumed by the GPU overlay renderer.
//!
//! Descriptors are declarative: each one names a drawable set of points or
//! paths with their colors and size bounds already resolved, so the overlay
//! needs no accessor callbacks.

use serde::{Deserialize, Serialize};

use map_types::{Rgb, Rgba};

/// Id of the drone position layer.
pub const DRONE_POSITIONS_LAYER: &str = "drone-positions";
/// Id of the airborne drone path layer.
pub const DRONE_PATHS_LAYER: &str = "drone-paths";
/// Id of the collaboration cursor layer.
pub const USER_CURSORS_LAYER: &str = "user-cursors";
/// Id of the wind particle layer.
pub const WIND_PARTICLES_LAYER: &str = "wind-particles";

/// A drawable layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum LayerDescriptor {
    Scatterplot(PointLayer),
    Path(PathLayer),
}

impl LayerDescriptor {
    pub fn id(&self) -> &str {
        match self {
            LayerDescriptor::Scatterplot(layer) => &layer.id,
            LayerDescriptor::Path(layer) => &layer.id,
        }
    }

    pub fn as_points(&self) -> Option<&PointLayer> {
        match self {
            LayerDescriptor::Scatterplot(layer) => Some(layer),
            LayerDescriptor::Path(_) => None,
        }
    }

    pub fn as_paths(&self) -> Option<&PathLayer> {
        match self {
            LayerDescriptor::Path(layer) => Some(layer),
            LayerDescriptor::Scatterplot(_) => None,
        }
    }

    /// Number of points or paths in the layer.
    pub fn len(&self) -> usize {
        match self {
            LayerDescriptor::Scatterplot(layer) => layer.points.len(),
            LayerDescriptor::Path(layer) => layer.paths.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Points drawn as filled circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLayer {
    pub id: String,
    pub points: Vec<PointFeature>,
    /// Radius in meters
    pub radius: f64,
    pub radius_min_pixels: f64,
    pub radius_max_pixels: f64,
    pub pickable: bool,
}

/// A single point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointFeature {
    /// Source entity id, when the point stands for one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `[longitude, latitude, altitude_m]`
    pub position: [f64; 3],
    pub fill_color: Rgba,
}

/// Polylines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathLayer {
    pub id: String,
    pub paths: Vec<PathFeature>,
    /// Width in meters
    pub width: f64,
    pub width_min_pixels: f64,
}

/// A single polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathFeature {
    pub id: String,
    pub path: Vec<[f64; 3]>,
    pub color: Rgb,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_layer() -> LayerDescriptor {
        LayerDescriptor::Scatterplot(PointLayer {
            id: USER_CURSORS_LAYER.to_string(),
            points: vec![PointFeature {
                id: Some("user_aiko".to_string()),
                position: [139.7, 35.6, 0.0],
                fill_color: Rgba(0, 200, 100, 200),
            }],
            radius: 20.0,
            radius_min_pixels: 10.0,
            radius_max_pixels: 20.0,
            pickable: true,
        })
    }

    #[test]
    fn test_descriptor_accessors() {
        let layer = point_layer();
        assert_eq!(layer.id(), "user-cursors");
        assert_eq!(layer.len(), 1);
        assert!(layer.as_points().is_some());
        assert!(layer.as_paths().is_none());
    }

    #[test]
    fn test_descriptor_json_is_tagged() {
        let json = serde_json::to_value(point_layer()).unwrap();
        assert_eq!(json["type"], "scatterplot");
        assert_eq!(json["id"], "user-cursors");
        assert_eq!(json["points"][0]["fill_color"], serde_json::json!([0, 200, 100, 200]));
    }
}
