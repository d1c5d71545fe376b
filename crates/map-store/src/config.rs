//! Configuration loading for the map store.
//!
//! The initial session state and derivation settings are loaded from a TOML
//! configuration file. Every section is optional and falls back to defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use map_types::{default_layers, LayerConfig, SimulationParams, ViewState, ViewStatePatch};

/// Complete store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Initial camera view
    pub view: ViewState,
    /// Initial simulation parameters
    pub simulation: SimulationParams,
    /// Layer-list derivation settings
    pub derive: DeriveConfig,
    /// Wind particle sampling settings
    pub particles: ParticleConfig,
    /// Initial layer configuration
    pub layers: Vec<LayerConfig>,
    /// Named fly-to locations
    pub presets: Vec<LocationPreset>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            view: ViewState::default(),
            simulation: SimulationParams::default(),
            derive: DeriveConfig::default(),
            particles: ParticleConfig::default(),
            layers: default_layers(),
            presets: default_presets(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that configured layer ids are unique.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, layer) in self.layers.iter().enumerate() {
            if self.layers[..i].iter().any(|l| l.id == layer.id) {
                return Err(ConfigError::DuplicateLayer(layer.id.clone()));
            }
        }
        Ok(())
    }

    /// Serializes the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Finds a preset by name.
    pub fn preset(&self, name: &str) -> Option<&LocationPreset> {
        self.presets.iter().find(|p| p.name == name)
    }
}

/// Layer-list derivation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DeriveConfig {
    /// Drop derived layers whose id matches a hidden configured layer
    pub respect_layer_visibility: bool,
    /// Evict collaboration cursors older than this before deriving
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor_max_age_ms: Option<u64>,
}

/// Wind particle sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Particles generated per m/s of wind
    pub particles_per_mps: f64,
    /// Upper bound on particles per derivation
    pub max_particles: usize,
    /// Horizontal spread factor; the jitter range is `spread / zoom` degrees
    pub spread: f64,
    /// Zoom used for the spread when the camera zoom is not positive
    pub fallback_zoom: f64,
    /// Lowest particle altitude in meters
    pub min_altitude: f64,
    /// Height of the altitude band in meters
    pub altitude_band: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            particles_per_mps: 20.0,
            max_particles: 200,
            spread: 0.1,
            fallback_zoom: 1.0,
            min_altitude: 50.0,
            altitude_band: 200.0,
        }
    }
}

/// A named location the camera can fly to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPreset {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
}

impl LocationPreset {
    pub fn new(name: impl Into<String>, longitude: f64, latitude: f64, zoom: f64) -> Self {
        Self {
            name: name.into(),
            longitude,
            latitude,
            zoom,
        }
    }

    /// The partial view update that moves the camera here.
    pub fn to_patch(&self) -> ViewStatePatch {
        ViewStatePatch::default()
            .with_center(self.longitude, self.latitude)
            .with_zoom(self.zoom)
    }
}

/// The sidebar's built-in Tokyo locations.
pub fn default_presets() -> Vec<LocationPreset> {
    vec![
        LocationPreset::new("tokyo_station", 139.7671, 35.6812, 16.0),
        LocationPreset::new("shibuya", 139.7016, 35.6580, 16.0),
        LocationPreset::new("shinjuku", 139.6917, 35.6895, 16.0),
        LocationPreset::new("shinagawa", 139.7387, 35.6284, 16.0),
        LocationPreset::new("minato", 139.7454, 35.6586, 15.0),
    ]
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Duplicate layer id in config: {0}")]
    DuplicateLayer(String),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Map Store Configuration

[view]
longitude = 139.7671
latitude = 35.6812
zoom = 14.0
pitch = 45.0
bearing = -17.6

[simulation]
wind_speed = 5.0
wind_direction = 180.0
drone_payload = 2.5
weather_condition = "clear"

[derive]
respect_layer_visibility = false

[particles]
particles_per_mps = 20.0
max_particles = 200
spread = 0.1
fallback_zoom = 1.0
min_altitude = 50.0
altitude_band = 200.0

[[layers]]
id = "terrain"
type = "terrain"
visible = true

[[layers]]
id = "buildings"
type = "buildings"
visible = true

[[presets]]
name = "tokyo_station"
longitude = 139.7671
latitude = 35.6812
zoom = 16.0

[[presets]]
name = "shibuya"
longitude = 139.7016
latitude = 35.6580
zoom = 16.0

[[presets]]
name = "shinjuku"
longitude = 139.6917
latitude = 35.6895
zoom = 16.0

[[presets]]
name = "shinagawa"
longitude = 139.7387
latitude = 35.6284
zoom = 16.0

[[presets]]
name = "minato"
longitude = 139.7454
latitude = 35.6586
zoom = 15.0
"#
    .to_string()
}
