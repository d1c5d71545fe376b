//! Wind particle sampling.
//!
//! Particles are cosmetic: they are re-sampled on every derivation and carry
//! no identity between calls. The random source is injected so tests can use
//! a seeded generator.

use rand::Rng;
use serde::{Deserialize, Serialize};

use map_types::{SimulationParams, ViewState};

use crate::config::ParticleConfig;

/// A single wind particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindParticle {
    /// Index within the current sample
    pub id: u32,
    /// `[longitude, latitude, altitude_m]`
    pub position: [f64; 3],
    /// Downwind velocity `[east, north, up]` in m/s
    pub velocity: [f64; 3],
}

/// Number of particles sampled for the given wind speed.
///
/// `ceil(min(wind_speed * particles_per_mps, max_particles))`, and zero for
/// calm, negative or NaN wind.
pub fn particle_count(params: &SimulationParams, config: &ParticleConfig) -> usize {
    if params.wind_speed.is_nan() || params.wind_speed <= 0.0 {
        return 0;
    }
    let raw = (params.wind_speed * config.particles_per_mps).min(config.max_particles as f64);
    raw.max(0.0).ceil() as usize
}

/// Velocity of air moving with the wind.
///
/// `wind_direction` is where the wind blows from, so particles travel toward
/// the opposite bearing.
pub fn wind_velocity(params: &SimulationParams) -> [f64; 3] {
    let toward = (params.wind_direction + 180.0).to_radians();
    [
        params.wind_speed * toward.sin(),
        params.wind_speed * toward.cos(),
        0.0,
    ]
}

/// Samples particles jittered around the camera center.
///
/// The horizontal jitter range is inversely proportional to zoom. A zoom that
/// is zero, negative or not finite falls back to `config.fallback_zoom`.
/// Altitudes are uniform within the configured band.
pub fn sample_wind_particles<R: Rng + ?Sized>(
    view: &ViewState,
    params: &SimulationParams,
    config: &ParticleConfig,
    rng: &mut R,
) -> Vec<WindParticle> {
    let count = particle_count(params, config);
    let zoom = if view.zoom.is_finite() && view.zoom > 0.0 {
        view.zoom
    } else {
        config.fallback_zoom
    };
    let range = config.spread / zoom;
    let velocity = wind_velocity(params);

    (0..count)
        .map(|i| WindParticle {
            id: i as u32,
            position: [
                view.longitude + (rng.gen::<f64>() - 0.5) * range,
                view.latitude + (rng.gen::<f64>() - 0.5) * range,
                config.min_altitude + rng.gen::<f64>() * config.altitude_band,
            ],
            velocity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_types::SimulationParamsPatch;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn params_with_wind(wind_speed: f64) -> SimulationParams {
        let mut params = SimulationParams::default();
        params.apply(&SimulationParamsPatch::default().with_wind_speed(wind_speed));
        params
    }

    #[test]
    fn test_particle_count_is_capped() {
        let config = ParticleConfig::default();
        assert_eq!(particle_count(&params_with_wind(5.0), &config), 100);
        assert_eq!(particle_count(&params_with_wind(10.0), &config), 200);
        assert_eq!(particle_count(&params_with_wind(40.0), &config), 200);
    }

    #[test]
    fn test_particle_count_rounds_up_fractional_wind() {
        let config = ParticleConfig::default();
        assert_eq!(particle_count(&params_with_wind(0.01), &config), 1);
        assert_eq!(particle_count(&params_with_wind(5.51), &config), 111);
    }

    #[test]
    fn test_particle_count_zero_for_calm_or_invalid_wind() {
        let config = ParticleConfig::default();
        assert_eq!(particle_count(&params_with_wind(0.0), &config), 0);
        assert_eq!(particle_count(&params_with_wind(-4.0), &config), 0);
        assert_eq!(particle_count(&params_with_wind(f64::NAN), &config), 0);
    }

    #[test]
    fn test_particles_stay_within_bounds() {
        let view = ViewState::new(139.7671, 35.6812, 10.0, 45.0, 0.0);
        let config = ParticleConfig::default();
        let mut rng = SmallRng::seed_from_u64(7);

        let particles = sample_wind_particles(&view, &params_with_wind(10.0), &config, &mut rng);

        assert_eq!(particles.len(), 200);
        let half_range = 0.1 / 10.0 / 2.0;
        for (i, p) in particles.iter().enumerate() {
            assert_eq!(p.id, i as u32);
            assert!((p.position[0] - view.longitude).abs() <= half_range);
            assert!((p.position[1] - view.latitude).abs() <= half_range);
            assert!(p.position[2] >= 50.0 && p.position[2] < 250.0);
        }
    }

    #[test]
    fn test_zero_zoom_uses_fallback() {
        let config = ParticleConfig::default();
        let params = params_with_wind(2.0);

        for zoom in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let view = ViewState::new(0.0, 0.0, zoom, 0.0, 0.0);
            let mut rng = SmallRng::seed_from_u64(1);
            let particles = sample_wind_particles(&view, &params, &config, &mut rng);

            assert_eq!(particles.len(), 40);
            assert!(particles
                .iter()
                .all(|p| p.position[0].is_finite() && p.position[0].abs() <= 0.05));
        }
    }

    #[test]
    fn test_fractional_zoom_widens_spread() {
        // zoom 0.5 gives a range of 0.2 degrees, so offsets reach past 0.05
        let view = ViewState::new(0.0, 0.0, 0.5, 0.0, 0.0);
        let config = ParticleConfig::default();
        let mut rng = SmallRng::seed_from_u64(1);

        let particles = sample_wind_particles(&view, &params_with_wind(10.0), &config, &mut rng);

        assert_eq!(particles.len(), 200);
        let max_offset = particles
            .iter()
            .map(|p| p.position[0].abs().max(p.position[1].abs()))
            .fold(0.0, f64::max);
        assert!(max_offset <= 0.1);
        assert!(max_offset > 0.05);
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let view = ViewState::default();
        let params = params_with_wind(3.0);
        let config = ParticleConfig::default();

        let a = sample_wind_particles(&view, &params, &config, &mut SmallRng::seed_from_u64(42));
        let b = sample_wind_particles(&view, &params, &config, &mut SmallRng::seed_from_u64(42));
        let c = sample_wind_particles(&view, &params, &config, &mut SmallRng::seed_from_u64(43));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_wind_velocity_points_downwind() {
        // Northerly wind (from 0°) pushes particles south
        let mut params = params_with_wind(10.0);
        params.wind_direction = 0.0;
        let v = wind_velocity(&params);
        assert!(v[0].abs() < 1e-9);
        assert!((v[1] + 10.0).abs() < 1e-9);

        // Default 180° wind pushes north
        let v = wind_velocity(&params_with_wind(5.0));
        assert!((v[1] - 5.0).abs() < 1e-9);
    }
}
