//! Layer configuration types.
//!
//! The layer list drives the visibility checkboxes in the sidebar. Entries
//! are keyed by a unique string id.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of geometry a configured layer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Scatterplot,
    Path,
    Polygon,
    Icon,
    Terrain,
    Buildings,
}

/// A configured map layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Opaque data rows handed through to the renderer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Value>>,
    /// Opaque renderer settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
}

fn default_visible() -> bool {
    true
}

impl LayerConfig {
    /// Creates a visible layer with no data or settings.
    pub fn new(id: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            id: id.into(),
            kind,
            visible: true,
            data: None,
            config: None,
        }
    }

    /// Sets the visibility flag.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Attaches data rows.
    pub fn with_data(mut self, data: Vec<Value>) -> Self {
        self.data = Some(data);
        self
    }

    /// Overwrites the fields present in `patch`. The id is never changed.
    pub fn apply(&mut self, patch: &LayerPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
        if let Some(data) = &patch.data {
            self.data = Some(data.clone());
        }
        if let Some(config) = &patch.config {
            self.config = Some(config.clone());
        }
    }
}

/// Partial layer update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerPatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<LayerKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
}

/// The base-map layers every session starts with.
pub fn default_layers() -> Vec<LayerConfig> {
    vec![
        LayerConfig::new("terrain", LayerKind::Terrain),
        LayerConfig::new("buildings", LayerKind::Buildings),
    ]
}
