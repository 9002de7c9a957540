use super::{Gust, Vortex, WindSampler};
use crate::config::WindConfig3d;
use crate::constants::*;
use crate::noise::NoiseGenerator;
use crate::tools::derive_noise_seed;
use glam::Vec3;

/// Volumetric wind field with one noise generator per axis.
///
/// On top of the planar model it adds a curl term computed from the
/// turbulence field, and vortices as a second kind of transient event.
#[derive(Debug, Clone)]
pub struct WindField3d {
    noise: [NoiseGenerator; 3],
    config: WindConfig3d,
    time: f32,
    gusts: Vec<Gust<Vec3>>,
    vortices: Vec<Vortex>,
}

impl Default for WindField3d {
    fn default() -> Self {
        Self::new(WindConfig3d::default())
    }
}

impl WindField3d {
    pub fn new(config: WindConfig3d) -> Self {
        Self {
            noise: [
                NoiseGenerator::new(DEFAULT_NOISE_SEED),
                NoiseGenerator::new(DEFAULT_NOISE_SEED_Y),
                NoiseGenerator::new(DEFAULT_NOISE_SEED_Z),
            ],
            config,
            time: 0.0,
            gusts: Vec::new(),
            vortices: Vec::new(),
        }
    }

    pub fn with_seed(config: WindConfig3d, scene_seed: u64) -> Self {
        let mut field = Self::new(config);
        field.reseed(scene_seed);
        field
    }

    pub fn update(&mut self, dt: f32) {
        self.time += dt * self.config.time_scale;

        for gust in &mut self.gusts {
            gust.lifetime.advance(dt);
        }
        for vortex in &mut self.vortices {
            vortex.lifetime.advance(dt);
        }

        let before = self.active_events();
        self.gusts.retain(|gust| !gust.lifetime.expired());
        self.vortices.retain(|vortex| !vortex.lifetime.expired());
        if self.active_events() < before {
            log::debug!("{} wind event(s) expired", before - self.active_events());
        }
    }

    /// Per-axis turbulence noise with the vertical channel already damped
    fn sample_noise(&self, position: Vec3) -> Vec3 {
        let scaled = position * self.config.noise_scale;
        let t = self.time;
        let axis = |i: usize| {
            let offset = AXIS_OFFSETS[i];
            self.noise[i].octave3(
                scaled.x + offset,
                scaled.y + offset,
                scaled.z + t + AXIS_TIME_OFFSETS[i],
                TURBULENCE_OCTAVES,
                NOISE_PERSISTENCE,
            )
        };
        Vec3::new(axis(0), axis(1) * self.config.vertical_influence, axis(2))
    }

    fn gust_noise(&self, position: Vec3) -> f32 {
        let s = self.config.noise_scale * GUST_SPATIAL_FACTOR;
        self.noise[0]
            .octave3(position.x * s, position.z * s, self.time * GUST_TIME_FACTOR, GUST_OCTAVES, NOISE_PERSISTENCE)
            .max(0.0)
    }

    pub fn wind_at(&self, position: Vec3) -> Vec3 {
        let direction = self.config.base_direction.normalize_or_zero();
        let base = direction * self.config.base_strength;
        let turbulence = self.sample_noise(position) * (self.config.turbulence * self.config.base_strength);
        let gust = direction * (self.gust_noise(position) * self.config.gust_strength);

        let mut total = base + turbulence + gust;
        if self.config.curl_strength != 0.0 {
            total += self.curl_at(position, CURL_EPSILON) * self.config.curl_strength;
        }

        for gust in &self.gusts {
            total += gust.contribution(position);
        }
        for vortex in &self.vortices {
            total += vortex.contribution(position);
        }
        total
    }

    /// Curl of the turbulence noise field by central differences
    pub fn curl_at(&self, position: Vec3, epsilon: f32) -> Vec3 {
        let partial = |offset: Vec3| {
            (self.sample_noise(position + offset) - self.sample_noise(position - offset)) / (2.0 * epsilon)
        };
        let d_dx = partial(Vec3::X * epsilon);
        let d_dy = partial(Vec3::Y * epsilon);
        let d_dz = partial(Vec3::Z * epsilon);

        Vec3::new(d_dy.z - d_dz.y, d_dz.x - d_dx.z, d_dx.y - d_dy.x)
    }

    pub fn strength_at(&self, position: Vec3) -> f32 {
        self.wind_at(position).length()
    }

    /// Magnitude of the raw turbulence noise, independent of configured intensity
    pub fn turbulence_at(&self, position: Vec3) -> f32 {
        self.sample_noise(position).length()
    }

    pub fn add_gust(&mut self, position: Vec3, direction: Vec3, strength: f32, radius: f32, duration: f32) {
        log::debug!(
            "Gust at {:?} towards {:?}: strength {:.1}, radius {:.1}, {:.2}s",
            position,
            direction,
            strength,
            radius,
            duration
        );
        self.gusts.push(Gust::new(position, direction, strength, radius, duration));
    }

    pub fn add_vortex(&mut self, position: Vec3, axis: Vec3, strength: f32, radius: f32, duration: f32) {
        log::debug!(
            "Vortex at {:?} around {:?}: strength {:.1}, radius {:.1}, {:.2}s",
            position,
            axis,
            strength,
            radius,
            duration
        );
        self.vortices.push(Vortex::new(position, axis, strength, radius, duration));
    }

    pub fn gusts(&self) -> &[Gust<Vec3>] {
        &self.gusts
    }

    pub fn vortices(&self) -> &[Vortex] {
        &self.vortices
    }

    pub fn active_events(&self) -> usize {
        self.gusts.len() + self.vortices.len()
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn config(&self) -> &WindConfig3d {
        &self.config
    }

    pub fn set_config(&mut self, config: WindConfig3d) {
        self.config = config;
    }

    pub fn reseed(&mut self, scene_seed: u64) {
        for (stream, noise) in self.noise.iter_mut().enumerate() {
            noise.reseed(derive_noise_seed(scene_seed, stream as u64));
        }
    }
}

impl WindSampler<Vec3> for WindField3d {
    fn wind_at(&self, position: Vec3) -> Vec3 {
        WindField3d::wind_at(self, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn still_config() -> WindConfig3d {
        WindConfig3d {
            base_strength: 20.0,
            gust_strength: 0.0,
            turbulence: 0.0,
            curl_strength: 0.0,
            base_direction: Vec3::new(0.0, 0.0, -2.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_field_is_pure_base_wind() {
        let mut field = WindField3d::new(still_config());
        field.update(1.3);
        for i in 0..10 {
            let p = Vec3::new(i as f32 * 13.0, i as f32 * 3.0, i as f32 * -29.0);
            let wind = field.wind_at(p);
            assert!((wind - Vec3::new(0.0, 0.0, -20.0)).length() < 1e-4, "wind was {:?}", wind);
        }
    }

    #[test]
    fn test_zero_field_is_calm() {
        let mut field = WindField3d::new(WindConfig3d {
            base_strength: 0.0,
            turbulence: 0.0,
            gust_strength: 0.0,
            curl_strength: 0.0,
            ..Default::default()
        });
        for _ in 0..5 {
            field.update(0.4);
            for x in -2..=2 {
                for y in -2..=2 {
                    for z in -2..=2 {
                        let p = Vec3::new(x as f32 * 55.0, y as f32 * 20.0, z as f32 * 35.0);
                        assert_eq!(field.wind_at(p), Vec3::ZERO, "wind at {:?}", p);
                    }
                }
            }
        }
    }

    #[test]
    fn test_gust_envelope_over_lifetime() {
        let mut field = WindField3d::new(WindConfig3d {
            base_strength: 0.0,
            ..still_config()
        });
        let centre = Vec3::new(12.0, 40.0, -8.0);
        let outside = centre + Vec3::new(0.0, 3.0, 4.5);
        field.add_gust(centre, Vec3::X, 10.0, 5.0, 2.0);

        let mut readings = vec![field.strength_at(centre)];
        for _ in 0..20 {
            field.update(0.1);
            readings.push(field.strength_at(centre));
            assert!(field.strength_at(outside) < 1e-3);
        }

        assert!(readings[0] < 1e-5);
        for step in 1..=10 {
            assert!(readings[step] > readings[step - 1], "not rising at step {}: {:?}", step, readings);
        }
        for step in 11..=20 {
            assert!(readings[step] < readings[step - 1], "not falling at step {}: {:?}", step, readings);
        }
        assert!((readings[10] - 10.0).abs() < 1e-3, "peak was {}", readings[10]);
        assert!(readings[20] < 1e-3);
    }

    #[test]
    fn test_gust_envelope_and_radius() {
        let mut field = WindField3d::new(WindConfig3d {
            base_strength: 0.0,
            ..still_config()
        });
        field.add_gust(Vec3::ZERO, Vec3::Y * 2.0, 50.0, 10.0, 2.0);
        let sample = Vec3::new(0.0, 0.0, 5.0);

        assert!(field.wind_at(sample).length() < 1e-5);
        field.update(1.0);
        assert!((field.wind_at(sample) - Vec3::Y * 12.5).length() < 1e-3);
        assert!(field.wind_at(Vec3::new(0.0, 0.0, 11.0)).length() < 1e-5);

        field.update(1.0);
        assert!(field.gusts().is_empty());
        assert!(field.wind_at(sample).length() < 1e-5);
    }

    #[test]
    fn test_vortex_swirls_around_axis() {
        let mut field = WindField3d::new(WindConfig3d {
            base_strength: 0.0,
            ..still_config()
        });
        field.add_vortex(Vec3::ZERO, Vec3::Y, 40.0, 20.0, 2.0);
        field.update(1.0);

        let wind = field.wind_at(Vec3::new(0.0, 4.0, 5.0));
        // Y × Z = X
        assert!(wind.x > 0.0);
        assert!(wind.y.abs() < 1e-4 && wind.z.abs() < 1e-4);
        assert!(field.wind_at(Vec3::new(0.0, 4.0, 0.05)).length() < 1e-5);
    }

    #[test]
    fn test_events_expire_together() {
        let mut field = WindField3d::default();
        field.add_gust(Vec3::ZERO, Vec3::X, 1.0, 1.0, 0.5);
        field.add_vortex(Vec3::ZERO, Vec3::Y, 1.0, 1.0, 1.5);
        assert_eq!(field.active_events(), 2);

        field.update(1.0);
        assert!(field.gusts().is_empty());
        assert_eq!(field.vortices().len(), 1);

        field.update(1.0);
        assert_eq!(field.active_events(), 0);
    }

    #[rstest]
    #[case(Vec3::ZERO)]
    #[case(Vec3::new(120.0, -40.0, 310.0))]
    #[case(Vec3::new(-5000.0, 20.0, 0.5))]
    fn test_curl_is_finite(#[case] position: Vec3) {
        let mut field = WindField3d::default();
        field.update(3.0);
        assert!(field.curl_at(position, CURL_EPSILON).is_finite());
    }

    #[test]
    fn test_curl_is_divergence_free() {
        let mut field = WindField3d::default();
        field.update(2.0);
        let h = CURL_EPSILON;
        let mut largest_curl = 0.0f32;

        for i in 0..20 {
            let p = Vec3::new(i as f32 * 37.0 - 300.0, (i % 5) as f32 * 12.0, i as f32 * -23.0 + 90.0);
            let derivative = |axis: Vec3| (field.curl_at(p + axis * h, h) - field.curl_at(p - axis * h, h)) / (2.0 * h);
            let divergence = derivative(Vec3::X).x + derivative(Vec3::Y).y + derivative(Vec3::Z).z;

            largest_curl = largest_curl.max(field.curl_at(p, h).length());
            assert!(divergence.abs() < 1e-5, "divergence {} at {:?}", divergence, p);
        }
        assert!(largest_curl > 1e-3, "curl too weak to test: {}", largest_curl);
    }

    #[test]
    fn test_no_curl_wind_without_curl_strength() {
        let field = WindField3d::new(still_config());
        let with_curl = WindField3d::new(WindConfig3d {
            curl_strength: 1.0,
            ..still_config()
        });
        let p = Vec3::new(40.0, 10.0, -70.0);
        let base = Vec3::new(0.0, 0.0, -20.0);

        assert!((field.wind_at(p) - base).length() < 1e-4);
        let curl = field.curl_at(p, CURL_EPSILON);
        assert!(((with_curl.wind_at(p) - base) - curl).length() < 1e-4);
    }

    #[test]
    fn test_vertical_influence_flattens_turbulence() {
        let flat = WindField3d::new(WindConfig3d {
            vertical_influence: 0.0,
            gust_strength: 0.0,
            curl_strength: 0.0,
            base_direction: Vec3::X,
            ..Default::default()
        });
        for i in 0..10 {
            let wind = flat.wind_at(Vec3::new(i as f32 * 21.0, 3.0, i as f32 * 7.0));
            assert_eq!(wind.y, 0.0);
        }
    }

    #[test]
    fn test_same_scene_seed_same_wind() {
        let a = WindField3d::with_seed(WindConfig3d::default(), 99);
        let b = WindField3d::with_seed(WindConfig3d::default(), 99);
        let p = Vec3::new(17.0, 2.0, -33.0);
        assert_eq!(a.wind_at(p), b.wind_at(p));
        assert_eq!(a.turbulence_at(p), b.turbulence_at(p));
    }
}
