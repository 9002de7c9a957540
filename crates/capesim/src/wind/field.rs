use super::{Gust, WindSampler};
use crate::config::WindConfig;
use crate::constants::*;
use crate::noise::NoiseGenerator;
use crate::tools::derive_noise_seed;
use glam::Vec2;

/// Planar wind field.
///
/// Turbulence samples noise at `(x, y, time)`, so the pattern drifts smoothly
/// as the field's clock advances.
#[derive(Debug, Clone)]
pub struct WindField {
    noise: NoiseGenerator,
    config: WindConfig,
    time: f32,
    gusts: Vec<Gust<Vec2>>,
}

impl Default for WindField {
    fn default() -> Self {
        Self::new(WindConfig::default())
    }
}

impl WindField {
    pub fn new(config: WindConfig) -> Self {
        Self {
            noise: NoiseGenerator::new(DEFAULT_NOISE_SEED),
            config,
            time: 0.0,
            gusts: Vec::new(),
        }
    }

    pub fn with_seed(config: WindConfig, scene_seed: u64) -> Self {
        let mut field = Self::new(config);
        field.reseed(scene_seed);
        field
    }

    pub fn update(&mut self, dt: f32) {
        self.time += dt * self.config.time_scale;

        for gust in &mut self.gusts {
            gust.lifetime.advance(dt);
        }
        let before = self.gusts.len();
        self.gusts.retain(|gust| !gust.lifetime.expired());
        if self.gusts.len() < before {
            log::debug!("{} gust(s) expired", before - self.gusts.len());
        }
    }

    /// Per-axis turbulence noise, unscaled by intensity
    fn sample_noise(&self, position: Vec2) -> Vec2 {
        let scaled = position * self.config.noise_scale;
        let t = self.time;
        let axis = |i: usize| {
            let offset = AXIS_OFFSETS[i];
            self.noise.octave3(
                scaled.x + offset,
                scaled.y + offset,
                t + AXIS_TIME_OFFSETS[i],
                TURBULENCE_OCTAVES,
                NOISE_PERSISTENCE,
            )
        };
        Vec2::new(axis(0), axis(1))
    }

    fn gust_noise(&self, position: Vec2) -> f32 {
        let s = self.config.noise_scale * GUST_SPATIAL_FACTOR;
        self.noise
            .octave3(position.x * s, position.y * s, self.time * GUST_TIME_FACTOR, GUST_OCTAVES, NOISE_PERSISTENCE)
            .max(0.0)
    }

    pub fn wind_at(&self, position: Vec2) -> Vec2 {
        let direction = self.config.base_direction.normalize_or_zero();
        let base = direction * self.config.base_strength;
        let turbulence = self.sample_noise(position) * (self.config.turbulence * self.config.base_strength);
        let gust = direction * (self.gust_noise(position) * self.config.gust_strength);

        let transient: Vec2 = self.gusts.iter().map(|g| g.contribution(position)).sum();

        base + turbulence + gust + transient
    }

    pub fn strength_at(&self, position: Vec2) -> f32 {
        self.wind_at(position).length()
    }

    /// Magnitude of the raw turbulence noise, independent of configured intensity
    pub fn turbulence_at(&self, position: Vec2) -> f32 {
        self.sample_noise(position).length()
    }

    /// A zero `direction` pushes radially away from `position`
    pub fn add_gust(&mut self, position: Vec2, direction: Vec2, strength: f32, radius: f32, duration: f32) {
        log::debug!(
            "Gust at {:?}: strength {:.1}, radius {:.1}, {:.2}s",
            position,
            strength,
            radius,
            duration
        );
        self.gusts.push(Gust::new(position, direction, strength, radius, duration));
    }

    pub fn gusts(&self) -> &[Gust<Vec2>] {
        &self.gusts
    }

    pub fn active_events(&self) -> usize {
        self.gusts.len()
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn config(&self) -> &WindConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: WindConfig) {
        self.config = config;
    }

    pub fn reseed(&mut self, scene_seed: u64) {
        self.noise.reseed(derive_noise_seed(scene_seed, 0));
    }
}

impl WindSampler<Vec2> for WindField {
    fn wind_at(&self, position: Vec2) -> Vec2 {
        WindField::wind_at(self, position)
    }
}
