//! Map store: camera view, simulation knobs, layers and tracked entities.
//!
//! The store is the single source of truth for a map session. Sidebar
//! controls and the renderer adapter both read from it and write to it
//! through its operations; the store depends on neither of them.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  operations   ┌──────────┐  derive_layers   ┌─────────────┐
//! │ controls /   │ ────────────▶ │ MapStore │ ───────────────▶ │ GPU overlay │
//! │ renderer     │ ◀──────────── │          │                  └─────────────┘
//! └──────────────┘  fly_to       └──────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`]: TOML configuration for the initial session state
//! - [`renderer`]: The `MapRenderer` seam driven by `fly_to`
//! - [`descriptors`]: Point and path layer descriptors
//! - [`particles`]: Seedable wind particle sampling
//! - [`compose`]: Deterministic layer-list composition

pub mod compose;
pub mod config;
pub mod descriptors;
pub mod particles;
pub mod renderer;

// Re-export config types
pub use config::{
    default_config_toml, default_presets, ConfigError, DeriveConfig, LocationPreset,
    ParticleConfig, StoreConfig,
};

// Re-export renderer types
pub use renderer::{MapRenderer, RecordingRenderer};

// Re-export descriptor types
pub use descriptors::{
    LayerDescriptor, PathFeature, PathLayer, PointFeature, PointLayer, DRONE_PATHS_LAYER,
    DRONE_POSITIONS_LAYER, USER_CURSORS_LAYER, WIND_PARTICLES_LAYER,
};

// Re-export derivation helpers
pub use compose::{compose_layers, cursor_fill_color, status_fill_color, CompositionInput};
pub use particles::{particle_count, sample_wind_particles, WindParticle};

use std::path::Path;
use std::rc::{Rc, Weak};

use map_types::{
    Annotation, CameraTransition, CursorPosition, Drone, DronePatch, LayerConfig, LayerPatch,
    SelectedTool, SimulationParams, SimulationParamsPatch, ViewState, ViewStatePatch,
    FLY_TO_DURATION_MS,
};
use rand::Rng;
use thiserror::Error;

/// Errors returned by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("layer {0:?} already exists")]
    DuplicateLayer(String),
    #[error("layer {0:?} not found")]
    LayerNotFound(String),
    #[error("drone {0:?} appears more than once")]
    DuplicateDrone(String),
    #[error("drone {0:?} not found")]
    DroneNotFound(String),
    #[error("annotation {0:?} already exists")]
    DuplicateAnnotation(String),
    #[error("no location preset named {0:?}")]
    UnknownPreset(String),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// The view/layer store for one map session.
///
/// Owned by the application's composition root and lent to consumers by
/// reference. All mutation goes through `&mut self` methods.
#[derive(Debug)]
pub struct MapStore {
    /// Settings that outlive individual mutations
    config: StoreConfig,
    view_state: ViewState,
    simulation_params: SimulationParams,
    layers: Vec<LayerConfig>,
    drones: Vec<Drone>,
    annotations: Vec<Annotation>,
    cursors: Vec<CursorPosition>,
    simulation_running: bool,
    selected_tool: SelectedTool,
    /// Non-owning handle to the external renderer
    renderer: Option<Weak<dyn MapRenderer>>,
}

impl MapStore {
    /// Creates a store seeded from `config`.
    ///
    /// Fails if the configured layers repeat an id.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;
        Ok(Self {
            view_state: config.view,
            simulation_params: config.simulation,
            layers: config.layers.clone(),
            drones: Vec::new(),
            annotations: Vec::new(),
            cursors: Vec::new(),
            simulation_running: false,
            selected_tool: SelectedTool::default(),
            renderer: None,
            config,
        })
    }

    /// Creates a store from a configuration file.
    pub fn from_config_file(path: &Path) -> Result<Self, StoreError> {
        let config = StoreConfig::from_file(path)?;
        Self::new(config)
    }

    /// Creates a store with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(StoreConfig::default()).expect("Default config should always work")
    }

    // ----- view state -----

    /// Replaces the camera view wholesale. Called on renderer move events.
    pub fn set_view_state(&mut self, view_state: ViewState) {
        tracing::trace!("View state set to {:?}", view_state);
        self.view_state = view_state;
    }

    /// Merges `target` over the current view and animates the renderer there.
    ///
    /// The stored view is updated whether or not a renderer is attached.
    /// Returns true if a live renderer received a transition.
    pub fn fly_to(&mut self, target: &ViewStatePatch) -> bool {
        let merged = self.view_state.merged(target);

        let driven = match self.renderer() {
            Some(renderer) => {
                renderer.fly_to(&CameraTransition::to_view(&merged, FLY_TO_DURATION_MS));
                true
            }
            None => false,
        };

        tracing::debug!(
            driven,
            "Fly to ({:.4}, {:.4}) zoom {:.2}",
            merged.longitude,
            merged.latitude,
            merged.zoom
        );
        self.view_state = merged;
        driven
    }

    /// Flies to a named location preset.
    pub fn fly_to_preset(&mut self, name: &str) -> Result<bool, StoreError> {
        let patch = self
            .config
            .preset(name)
            .map(LocationPreset::to_patch)
            .ok_or_else(|| StoreError::UnknownPreset(name.to_string()))?;
        Ok(self.fly_to(&patch))
    }

    // ----- simulation -----

    /// Shallow-merges `patch` over the current parameters. No range checks.
    pub fn set_simulation_params(&mut self, patch: &SimulationParamsPatch) {
        self.simulation_params.apply(patch);
        tracing::debug!("Simulation params now {:?}", self.simulation_params);
    }

    pub fn set_simulation_running(&mut self, running: bool) {
        tracing::debug!(running, "Simulation running flag set");
        self.simulation_running = running;
    }

    /// Flips the running flag and returns the new value.
    pub fn toggle_simulation(&mut self) -> bool {
        self.set_simulation_running(!self.simulation_running);
        self.simulation_running
    }

    pub fn set_selected_tool(&mut self, tool: SelectedTool) {
        tracing::debug!(%tool, "Tool selected");
        self.selected_tool = tool;
    }

    // ----- layers -----

    /// Appends a layer. Ids must be unique.
    pub fn add_layer(&mut self, layer: LayerConfig) -> Result<(), StoreError> {
        if self.layer(&layer.id).is_some() {
            tracing::warn!("Rejected duplicate layer {:?}", layer.id);
            return Err(StoreError::DuplicateLayer(layer.id));
        }
        tracing::debug!("Added layer {:?}", layer.id);
        self.layers.push(layer);
        Ok(())
    }

    /// Removes a layer by id, returning it. Absent ids change nothing.
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<LayerConfig> {
        let index = self.layers.iter().position(|l| l.id == layer_id)?;
        tracing::debug!("Removed layer {:?}", layer_id);
        Some(self.layers.remove(index))
    }

    /// Flips a layer's visibility and returns the new value.
    pub fn toggle_layer_visibility(&mut self, layer_id: &str) -> Result<bool, StoreError> {
        let layer = self.layer_mut(layer_id)?;
        layer.visible = !layer.visible;
        let visible = layer.visible;
        tracing::debug!(visible, "Toggled layer {:?}", layer_id);
        Ok(visible)
    }

    /// Shallow-merges `patch` onto the layer with `layer_id`.
    pub fn update_layer_config(
        &mut self,
        layer_id: &str,
        patch: &LayerPatch,
    ) -> Result<(), StoreError> {
        self.layer_mut(layer_id)?.apply(patch);
        tracing::debug!("Updated layer {:?}", layer_id);
        Ok(())
    }

    fn layer_mut(&mut self, layer_id: &str) -> Result<&mut LayerConfig, StoreError> {
        match self.layers.iter_mut().find(|l| l.id == layer_id) {
            Some(layer) => Ok(layer),
            None => {
                tracing::warn!("Layer {:?} not found", layer_id);
                Err(StoreError::LayerNotFound(layer_id.to_string()))
            }
        }
    }

    // ----- drones -----

    /// Replaces the whole fleet. Rejects lists with repeated ids, leaving
    /// the current fleet in place.
    pub fn set_drones(&mut self, drones: Vec<Drone>) -> Result<(), StoreError> {
        for (i, drone) in drones.iter().enumerate() {
            if drones[..i].iter().any(|d| d.id == drone.id) {
                tracing::warn!("Rejected fleet with duplicate drone {:?}", drone.id);
                return Err(StoreError::DuplicateDrone(drone.id.clone()));
            }
        }
        tracing::debug!("Fleet replaced with {} drones", drones.len());
        self.drones = drones;
        Ok(())
    }

    /// Merges `patch` onto an existing drone. Never creates one.
    pub fn update_drone(&mut self, drone_id: &str, patch: &DronePatch) -> Result<(), StoreError> {
        match self.drones.iter_mut().find(|d| d.id == drone_id) {
            Some(drone) => {
                drone.apply(patch);
                tracing::trace!("Updated drone {:?}", drone_id);
                Ok(())
            }
            None => {
                tracing::warn!("Drone {:?} not found", drone_id);
                Err(StoreError::DroneNotFound(drone_id.to_string()))
            }
        }
    }

    // ----- annotations -----

    /// Appends an annotation. Ids must be unique.
    pub fn add_annotation(&mut self, annotation: Annotation) -> Result<(), StoreError> {
        if self.annotation(&annotation.id).is_some() {
            tracing::warn!("Rejected duplicate annotation {:?}", annotation.id);
            return Err(StoreError::DuplicateAnnotation(annotation.id));
        }
        tracing::debug!("Added {:?} annotation {:?}", annotation.kind(), annotation.id);
        self.annotations.push(annotation);
        Ok(())
    }

    /// Removes an annotation by id, returning it. Absent ids change nothing.
    pub fn remove_annotation(&mut self, annotation_id: &str) -> Option<Annotation> {
        let index = self.annotations.iter().position(|a| a.id == annotation_id)?;
        tracing::debug!("Removed annotation {:?}", annotation_id);
        Some(self.annotations.remove(index))
    }

    // ----- collaboration -----

    /// Replaces all cursors with a fresh snapshot from the collaboration feed.
    pub fn set_cursors(&mut self, cursors: Vec<CursorPosition>) {
        tracing::trace!("Cursor snapshot with {} entries", cursors.len());
        self.cursors = cursors;
    }

    /// Drops cursors last reported more than `max_age_ms` before `now_ms`.
    /// Returns how many were removed.
    pub fn prune_stale_cursors(&mut self, now_ms: u64, max_age_ms: u64) -> usize {
        let before = self.cursors.len();
        self.cursors.retain(|c| !c.is_stale(now_ms, max_age_ms));
        let removed = before - self.cursors.len();
        if removed > 0 {
            tracing::debug!("Pruned {} stale cursors", removed);
        }
        removed
    }

    // ----- renderer -----

    /// Registers or clears the renderer that `fly_to` drives.
    ///
    /// Only a weak handle is kept; dropping the last `Rc` detaches it.
    pub fn set_map_instance(&mut self, renderer: Option<&Rc<dyn MapRenderer>>) {
        tracing::debug!(attached = renderer.is_some(), "Map instance registered");
        self.renderer = renderer.map(Rc::downgrade);
    }

    /// Returns the renderer if one is registered and still alive.
    pub fn renderer(&self) -> Option<Rc<dyn MapRenderer>> {
        self.renderer.as_ref().and_then(Weak::upgrade)
    }

    // ----- derivation -----

    /// Borrowed input for [`compose_layers`].
    pub fn composition_input(&self) -> CompositionInput<'_> {
        CompositionInput {
            drones: &self.drones,
            cursors: &self.cursors,
            layers: &self.layers,
            params: &self.simulation_params,
            simulation_running: self.simulation_running,
            respect_layer_visibility: self.config.derive.respect_layer_visibility,
        }
    }

    /// Samples wind particles if the simulation calls for them.
    pub fn sample_particles<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<WindParticle> {
        if !self.composition_input().wants_particles() {
            return Vec::new();
        }
        sample_wind_particles(
            &self.view_state,
            &self.simulation_params,
            &self.config.particles,
            rng,
        )
    }

    /// Derives the overlay layer list from current state.
    ///
    /// Particles are re-sampled from `rng` on every call.
    pub fn derive_layers<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<LayerDescriptor> {
        let particles = self.sample_particles(rng);
        compose_layers(&self.composition_input(), &particles)
    }

    // ----- accessors -----

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn simulation_params(&self) -> &SimulationParams {
        &self.simulation_params
    }

    pub fn layers(&self) -> &[LayerConfig] {
        &self.layers
    }

    pub fn layer(&self, layer_id: &str) -> Option<&LayerConfig> {
        self.layers.iter().find(|l| l.id == layer_id)
    }

    pub fn drones(&self) -> &[Drone] {
        &self.drones
    }

    pub fn drone(&self, drone_id: &str) -> Option<&Drone> {
        self.drones.iter().find(|d| d.id == drone_id)
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn annotation(&self, annotation_id: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == annotation_id)
    }

    pub fn cursors(&self) -> &[CursorPosition] {
        &self.cursors
    }

    pub fn is_simulation_running(&self) -> bool {
        self.simulation_running
    }

    pub fn selected_tool(&self) -> SelectedTool {
        self.selected_tool
    }
}

impl Default for MapStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}
