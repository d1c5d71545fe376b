//! Layer-list composition.
//!
//! Turns the store's entities into overlay descriptors. Composition is
//! deterministic: the random wind particles are sampled beforehand and passed
//! in, so the same input always yields the same list.
//!
//! Layers are emitted in a fixed order:
//!
//! 1. `drone-positions` when there are drones
//! 2. `drone-paths` when any drone is flying or delivering
//! 3. `user-cursors` when there are cursors
//! 4. `wind-particles` when the simulation runs with wind

use map_types::{CursorPosition, Drone, DroneStatus, LayerConfig, Rgb, Rgba, SimulationParams};

use crate::descriptors::{
    LayerDescriptor, PathFeature, PathLayer, PointFeature, PointLayer, DRONE_PATHS_LAYER,
    DRONE_POSITIONS_LAYER, USER_CURSORS_LAYER, WIND_PARTICLES_LAYER,
};
use crate::particles::WindParticle;

/// Degrees added to longitude and latitude for a drone path's end vertex.
pub const PATH_OFFSET_DEGREES: f64 = 0.001;

/// Color used when a cursor's hex color cannot be decoded.
pub const FALLBACK_CURSOR_COLOR: Rgb = Rgb(150, 150, 150);

const FLYING_COLOR: Rgb = Rgb(0, 200, 100);
const DELIVERING_COLOR: Rgb = Rgb(255, 165, 0);
const CHARGING_COLOR: Rgb = Rgb(100, 100, 255);
const IDLE_COLOR: Rgb = Rgb(150, 150, 150);
const DRONE_ALPHA: u8 = 200;
const CURSOR_ALPHA: u8 = 200;
const PARTICLE_COLOR: Rgba = Rgba(200, 220, 255, 100);

/// Borrowed view of everything composition reads.
#[derive(Debug, Clone, Copy)]
pub struct CompositionInput<'a> {
    pub drones: &'a [Drone],
    pub cursors: &'a [CursorPosition],
    pub layers: &'a [LayerConfig],
    pub params: &'a SimulationParams,
    pub simulation_running: bool,
    /// Drop derived layers whose id matches a hidden configured layer
    pub respect_layer_visibility: bool,
}

impl CompositionInput<'_> {
    /// Returns true if the descriptor with `id` is hidden by configuration.
    pub fn is_suppressed(&self, id: &str) -> bool {
        self.respect_layer_visibility && self.layers.iter().any(|l| l.id == id && !l.visible)
    }

    /// Returns true if a wind particle layer should be drawn.
    pub fn wants_particles(&self) -> bool {
        self.simulation_running
            && self.params.wind_speed > 0.0
            && !self.is_suppressed(WIND_PARTICLES_LAYER)
    }
}

/// Builds the ordered descriptor list.
pub fn compose_layers(
    input: &CompositionInput<'_>,
    particles: &[WindParticle],
) -> Vec<LayerDescriptor> {
    let mut layers = Vec::new();

    if !input.drones.is_empty() {
        layers.push(drone_positions(input.drones));

        let paths = drone_paths(input.drones);
        if !paths.paths.is_empty() {
            layers.push(LayerDescriptor::Path(paths));
        }
    }

    if !input.cursors.is_empty() {
        layers.push(user_cursors(input.cursors));
    }

    if input.wants_particles() {
        layers.push(wind_particles(particles));
    }

    if input.respect_layer_visibility {
        layers.retain(|layer| !input.is_suppressed(layer.id()));
    }

    layers
}

/// Fill color for a drone marker.
pub fn status_fill_color(status: DroneStatus) -> Rgba {
    let rgb = match status {
        DroneStatus::Flying => FLYING_COLOR,
        DroneStatus::Delivering => DELIVERING_COLOR,
        DroneStatus::Charging => CHARGING_COLOR,
        DroneStatus::Idle => IDLE_COLOR,
    };
    rgb.with_alpha(DRONE_ALPHA)
}

/// Fill color for a cursor marker, falling back to grey on a malformed hex.
pub fn cursor_fill_color(cursor: &CursorPosition) -> Rgba {
    match Rgb::from_hex(&cursor.color) {
        Ok(rgb) => rgb.with_alpha(CURSOR_ALPHA),
        Err(e) => {
            tracing::warn!(
                user_id = %cursor.user_id,
                "Cursor color rejected, using fallback: {}",
                e
            );
            FALLBACK_CURSOR_COLOR.with_alpha(CURSOR_ALPHA)
        }
    }
}

fn drone_positions(drones: &[Drone]) -> LayerDescriptor {
    LayerDescriptor::Scatterplot(PointLayer {
        id: DRONE_POSITIONS_LAYER.to_string(),
        points: drones
            .iter()
            .map(|d| PointFeature {
                id: Some(d.id.clone()),
                position: d.position,
                fill_color: status_fill_color(d.status),
            })
            .collect(),
        radius: 50.0,
        radius_min_pixels: 8.0,
        radius_max_pixels: 30.0,
        pickable: true,
    })
}

fn drone_paths(drones: &[Drone]) -> PathLayer {
    PathLayer {
        id: DRONE_PATHS_LAYER.to_string(),
        paths: drones
            .iter()
            .filter(|d| d.status.is_airborne())
            .map(|d| {
                let [lng, lat, alt] = d.position;
                PathFeature {
                    id: d.id.clone(),
                    path: vec![
                        d.position,
                        [lng + PATH_OFFSET_DEGREES, lat + PATH_OFFSET_DEGREES, alt],
                    ],
                    color: if d.status == DroneStatus::Flying {
                        FLYING_COLOR
                    } else {
                        DELIVERING_COLOR
                    },
                }
            })
            .collect(),
        width: 3.0,
        width_min_pixels: 2.0,
    }
}

fn user_cursors(cursors: &[CursorPosition]) -> LayerDescriptor {
    LayerDescriptor::Scatterplot(PointLayer {
        id: USER_CURSORS_LAYER.to_string(),
        points: cursors
            .iter()
            .map(|c| PointFeature {
                id: Some(c.user_id.clone()),
                position: [c.longitude, c.latitude, 0.0],
                fill_color: cursor_fill_color(c),
            })
            .collect(),
        radius: 20.0,
        radius_min_pixels: 10.0,
        radius_max_pixels: 20.0,
        pickable: true,
    })
}

fn wind_particles(particles: &[WindParticle]) -> LayerDescriptor {
    LayerDescriptor::Scatterplot(PointLayer {
        id: WIND_PARTICLES_LAYER.to_string(),
        points: particles
            .iter()
            .map(|p| PointFeature {
                id: None,
                position: p.position,
                fill_color: PARTICLE_COLOR,
            })
            .collect(),
        radius: 10.0,
        radius_min_pixels: 1.0,
        radius_max_pixels: 3.0,
        pickable: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_types::{LayerKind, SimulationParams};

    fn input<'a>(
        drones: &'a [Drone],
        cursors: &'a [CursorPosition],
        layers: &'a [LayerConfig],
        params: &'a SimulationParams,
        running: bool,
    ) -> CompositionInput<'a> {
        CompositionInput {
            drones,
            cursors,
            layers,
            params,
            simulation_running: running,
            respect_layer_visibility: false,
        }
    }

    fn particle(id: u32) -> WindParticle {
        WindParticle {
            id,
            position: [139.0, 35.0, 100.0],
            velocity: [0.0, 5.0, 0.0],
        }
    }

    #[test]
    fn test_empty_state_composes_nothing() {
        let params = SimulationParams::default();
        let layers = compose_layers(&input(&[], &[], &[], &params, false), &[]);
        assert!(layers.is_empty());
    }

    #[test]
    fn test_drone_colors_by_status() {
        assert_eq!(status_fill_color(DroneStatus::Flying), Rgba(0, 200, 100, 200));
        assert_eq!(status_fill_color(DroneStatus::Delivering), Rgba(255, 165, 0, 200));
        assert_eq!(status_fill_color(DroneStatus::Charging), Rgba(100, 100, 255, 200));
        assert_eq!(status_fill_color(DroneStatus::Idle), Rgba(150, 150, 150, 200));
    }

    #[test]
    fn test_grounded_drones_have_no_paths() {
        let drones = vec![
            Drone::new("d1", [139.0, 35.0, 0.0]),
            Drone::new("d2", [139.1, 35.1, 0.0]).with_status(DroneStatus::Charging),
        ];
        let params = SimulationParams::default();

        let layers = compose_layers(&input(&drones, &[], &[], &params, false), &[]);

        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].id(), DRONE_POSITIONS_LAYER);
        let points = layers[0].as_points().unwrap();
        assert_eq!(points.radius_min_pixels, 8.0);
        assert_eq!(points.radius_max_pixels, 30.0);
    }

    #[test]
    fn test_airborne_drones_get_offset_paths() {
        let drones = vec![
            Drone::new("d1", [139.0, 35.0, 120.0]).with_status(DroneStatus::Flying),
            Drone::new("d2", [139.5, 35.5, 80.0]).with_status(DroneStatus::Delivering),
            Drone::new("d3", [139.9, 35.9, 0.0]),
        ];
        let params = SimulationParams::default();

        let layers = compose_layers(&input(&drones, &[], &[], &params, false), &[]);

        assert_eq!(layers.len(), 2);
        let paths = layers[1].as_paths().unwrap();
        assert_eq!(paths.id, DRONE_PATHS_LAYER);
        assert_eq!(paths.paths.len(), 2);

        let flying = &paths.paths[0];
        assert_eq!(flying.id, "d1");
        assert_eq!(flying.color, Rgb(0, 200, 100));
        assert_eq!(flying.path[0], [139.0, 35.0, 120.0]);
        assert!((flying.path[1][0] - 139.001).abs() < 1e-9);
        assert!((flying.path[1][1] - 35.001).abs() < 1e-9);
        assert_eq!(flying.path[1][2], 120.0);

        assert_eq!(paths.paths[1].color, Rgb(255, 165, 0));
    }

    #[test]
    fn test_cursor_color_decoding() {
        let ok = CursorPosition::new("u1", "Aiko", "#00c864", 139.0, 35.0, 0);
        assert_eq!(cursor_fill_color(&ok), Rgba(0, 200, 100, 200));

        let bad = CursorPosition::new("u2", "Kenji", "#12", 139.0, 35.0, 0);
        assert_eq!(cursor_fill_color(&bad), Rgba(150, 150, 150, 200));
    }

    #[test]
    fn test_cursor_layer_positions_are_ground_level() {
        let cursors = vec![CursorPosition::new("u1", "Aiko", "#ff0000", 139.7, 35.6, 0)];
        let params = SimulationParams::default();

        let layers = compose_layers(&input(&[], &cursors, &[], &params, false), &[]);

        assert_eq!(layers.len(), 1);
        let points = layers[0].as_points().unwrap();
        assert_eq!(points.id, USER_CURSORS_LAYER);
        assert_eq!(points.points[0].position, [139.7, 35.6, 0.0]);
        assert_eq!(points.points[0].id.as_deref(), Some("u1"));
    }

    #[test]
    fn test_particles_only_when_running_with_wind() {
        let particles = vec![particle(0), particle(1)];
        let mut params = SimulationParams::default();

        let stopped = compose_layers(&input(&[], &[], &[], &params, false), &particles);
        assert!(stopped.is_empty());

        let running = compose_layers(&input(&[], &[], &[], &params, true), &particles);
        assert_eq!(running.len(), 1);
        assert_eq!(running[0].id(), WIND_PARTICLES_LAYER);
        assert_eq!(running[0].len(), 2);
        assert!(!running[0].as_points().unwrap().pickable);

        params.wind_speed = 0.0;
        let calm = compose_layers(&input(&[], &[], &[], &params, true), &particles);
        assert!(calm.is_empty());
    }

    #[test]
    fn test_layer_order() {
        let drones = vec![Drone::new("d1", [139.0, 35.0, 100.0]).with_status(DroneStatus::Flying)];
        let cursors = vec![CursorPosition::new("u1", "Aiko", "#ff0000", 139.7, 35.6, 0)];
        let params = SimulationParams::default();

        let layers = compose_layers(&input(&drones, &cursors, &[], &params, true), &[particle(0)]);

        let ids: Vec<_> = layers.iter().map(|l| l.id()).collect();
        assert_eq!(
            ids,
            vec![DRONE_POSITIONS_LAYER, DRONE_PATHS_LAYER, USER_CURSORS_LAYER, WIND_PARTICLES_LAYER]
        );
    }

    #[test]
    fn test_hidden_layers_ignored_by_default() {
        let cursors = vec![CursorPosition::new("u1", "Aiko", "#ff0000", 139.7, 35.6, 0)];
        let config = vec![LayerConfig::new(USER_CURSORS_LAYER, LayerKind::Scatterplot).with_visible(false)];
        let params = SimulationParams::default();

        let layers = compose_layers(&input(&[], &cursors, &config, &params, false), &[]);
        assert_eq!(layers.len(), 1);
    }

    #[test]
    fn test_hidden_layers_suppressed_when_respected() {
        let drones = vec![Drone::new("d1", [139.0, 35.0, 100.0]).with_status(DroneStatus::Flying)];
        let cursors = vec![CursorPosition::new("u1", "Aiko", "#ff0000", 139.7, 35.6, 0)];
        let config = vec![
            LayerConfig::new(USER_CURSORS_LAYER, LayerKind::Scatterplot).with_visible(false),
            LayerConfig::new(DRONE_PATHS_LAYER, LayerKind::Path),
        ];
        let params = SimulationParams::default();
        let mut composition = input(&drones, &cursors, &config, &params, false);
        composition.respect_layer_visibility = true;

        let layers = compose_layers(&composition, &[]);

        let ids: Vec<_> = layers.iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec![DRONE_POSITIONS_LAYER, DRONE_PATHS_LAYER]);
    }
}
