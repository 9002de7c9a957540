// Procedural wind: steady base flow, noise turbulence and short-lived events

pub mod field;
pub mod field3d;
pub mod scheduler;
pub mod transient;

pub use field::WindField;
pub use field3d::WindField3d;
pub use scheduler::GustScheduler;
pub use transient::{Gust, Vortex};

use std::f32::consts::PI;

/// Anything a cape can read wind from
pub trait WindSampler<V> {
    fn wind_at(&self, position: V) -> V;
}

/// Closures work as wind sources, mostly for tests and fixed-wind scenes
impl<V, F> WindSampler<V> for F
where
    F: Fn(V) -> V,
{
    fn wind_at(&self, position: V) -> V {
        self(position)
    }
}

/// Age of a transient wind event, in unscaled seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    pub duration: f32,
    pub elapsed: f32,
}

impl Lifetime {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn expired(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Ramps 0 → 1 → 0 over the lifetime
    pub fn envelope(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (PI * self.elapsed / self.duration).sin()
    }
}

/// Quadratic falloff, 1 at the centre and 0 at `radius`
pub fn falloff(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 || distance >= radius {
        return 0.0;
    }
    let t = 1.0 - distance / radius;
    t * t
}
