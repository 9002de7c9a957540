use super::WindField3d;
use crate::config::GustSchedulerConfig;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// What the scheduler emitted on a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindEvent {
    Gust {
        position: Vec3,
        direction: Vec3,
        strength: f32,
        radius: f32,
        duration: f32,
    },
    Vortex {
        position: Vec3,
        axis: Vec3,
        strength: f32,
        radius: f32,
        duration: f32,
    },
}

/// Emits random gusts and vortices around a focus point at random intervals.
///
/// All randomness comes from one seeded generator, so two schedulers with the
/// same seed and config produce the same event stream for the same ticks.
#[derive(Debug, Clone)]
pub struct GustScheduler {
    rng: StdRng,
    config: GustSchedulerConfig,
    countdown: f32,
}

impl GustScheduler {
    pub fn new(config: GustSchedulerConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let countdown = next_interval(&mut rng, &config);
        Self { rng, config, countdown }
    }

    pub fn config(&self) -> &GustSchedulerConfig {
        &self.config
    }

    /// Seconds until the next emission
    pub fn countdown(&self) -> f32 {
        self.countdown
    }

    /// Advance the countdown and roll an event when it runs out
    pub fn tick(&mut self, dt: f32, focus: Vec3) -> Option<WindEvent> {
        if !self.config.enabled {
            return None;
        }

        self.countdown -= dt;
        if self.countdown > 0.0 {
            return None;
        }
        self.countdown = next_interval(&mut self.rng, &self.config);

        Some(self.roll_event(focus))
    }

    /// Tick and feed any emitted event straight into `field`
    pub fn drive(&mut self, dt: f32, focus: Vec3, field: &mut WindField3d) -> Option<WindEvent> {
        let event = self.tick(dt, focus)?;
        match event {
            WindEvent::Gust {
                position,
                direction,
                strength,
                radius,
                duration,
            } => field.add_gust(position, direction, strength, radius, duration),
            WindEvent::Vortex {
                position,
                axis,
                strength,
                radius,
                duration,
            } => field.add_vortex(position, axis, strength, radius, duration),
        }
        Some(event)
    }

    fn roll_event(&mut self, focus: Vec3) -> WindEvent {
        let config = &self.config;
        let angle = self.rng.random_range(0.0..TAU);
        let offset = Vec3::new(angle.cos(), 0.0, angle.sin()) * config.spawn_radius;
        let position = focus + offset;
        let strength = random_in(&mut self.rng, config.min_strength, config.max_strength);
        let radius = random_in(&mut self.rng, config.min_radius, config.max_radius);
        let duration = random_in(&mut self.rng, config.min_duration, config.max_duration);

        let vortex_probability = if config.vortex_probability.is_finite() {
            config.vortex_probability.clamp(0.0, 1.0)
        } else {
            0.0
        };

        if self.rng.random_bool(vortex_probability) {
            let axis = Vec3::new(
                self.rng.random_range(-0.3..0.3),
                1.0,
                self.rng.random_range(-0.3..0.3),
            )
            .normalize_or_zero();
            log::debug!("Scheduled vortex at {:?}", position);
            WindEvent::Vortex {
                position,
                axis,
                strength,
                radius,
                duration,
            }
        } else {
            // blow back across the focus point
            let direction = (-offset).normalize_or_zero();
            log::debug!("Scheduled gust at {:?}", position);
            WindEvent::Gust {
                position,
                direction,
                strength,
                radius,
                duration,
            }
        }
    }
}

fn next_interval(rng: &mut StdRng, config: &GustSchedulerConfig) -> f32 {
    random_in(rng, config.min_interval, config.max_interval)
}

/// Uniform in `[min, max)`, or `min` when the range is empty
fn random_in(rng: &mut StdRng, min: f32, max: f32) -> f32 {
    if max > min { rng.random_range(min..max) } else { min }
}
