//! Shared map state types and serialization.
//!
//! This crate contains pure data structures with no store logic: camera view
//! state, simulation parameters, layer configuration, drones, collaboration
//! cursors and annotations. It is a dependency for all other crates in the
//! workspace.

pub mod annotation;
pub mod color;
pub mod cursor;
pub mod drone;
pub mod layer;
pub mod simulation;
pub mod tool;
pub mod view;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

// Re-export view types
pub use view::{CameraTransition, ViewState, ViewStatePatch, FLY_TO_DURATION_MS};

// Re-export simulation types
pub use simulation::{SimulationParams, SimulationParamsPatch, WeatherCondition};

// Re-export layer types
pub use layer::{default_layers, LayerConfig, LayerKind, LayerPatch};

// Re-export entity types
pub use annotation::{
    generate_annotation_id, Annotation, AnnotationGeometry, AnnotationKind,
    AnnotationProperties,
};
pub use cursor::CursorPosition;
pub use drone::{Drone, DronePatch, DroneStatus};

pub use color::{ColorError, Rgb, Rgba};
pub use tool::SelectedTool;
