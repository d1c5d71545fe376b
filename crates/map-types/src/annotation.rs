//! Annotation types.
//!
//! User-drawn markup on the map. The coordinate shape is carried by the
//! geometry variant, so a point can never hold a ring and a polygon can never
//! hold a single position.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a fresh annotation ID.
pub fn generate_annotation_id() -> String {
    format!("ann_{}", Uuid::new_v4().simple())
}

/// Kind of annotation, without its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    Point,
    Line,
    Polygon,
    Text,
}

/// Annotation shape and coordinates, as `[longitude, latitude]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "coordinates")]
pub enum AnnotationGeometry {
    Point([f64; 2]),
    Line(Vec<[f64; 2]>),
    /// Outer ring first, then holes
    Polygon(Vec<Vec<[f64; 2]>>),
    /// Anchor of a text label
    Text([f64; 2]),
}

impl AnnotationGeometry {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            AnnotationGeometry::Point(_) => AnnotationKind::Point,
            AnnotationGeometry::Line(_) => AnnotationKind::Line,
            AnnotationGeometry::Polygon(_) => AnnotationKind::Polygon,
            AnnotationGeometry::Text(_) => AnnotationKind::Text,
        }
    }
}

/// Presentation and provenance metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Milliseconds since the Unix epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<u64>,
}

/// A user-drawn annotation.
///
/// The geometry's `type` and `coordinates` sit beside `id` on the wire:
/// `{"id", "type", "coordinates", "properties"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: String,
    #[serde(flatten)]
    pub geometry: AnnotationGeometry,
    #[serde(default)]
    pub properties: AnnotationProperties,
}

impl Annotation {
    /// Creates an annotation with a generated ID and empty properties.
    pub fn new(geometry: AnnotationGeometry) -> Self {
        Self::with_id(generate_annotation_id(), geometry)
    }

    /// Creates an annotation with an explicit ID.
    pub fn with_id(id: impl Into<String>, geometry: AnnotationGeometry) -> Self {
        Self {
            id: id.into(),
            geometry,
            properties: AnnotationProperties::default(),
        }
    }

    pub fn with_properties(mut self, properties: AnnotationProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn kind(&self) -> AnnotationKind {
        self.geometry.kind()
    }
}
