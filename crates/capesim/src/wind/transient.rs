use super::{Lifetime, falloff};
use crate::constants::VORTEX_CORE_RADIUS;
use crate::vector::SimVector;
use glam::Vec3;

/// Localized push of air that swells and fades over its lifetime.
///
/// A zero `direction` pushes radially away from `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gust<V: SimVector> {
    pub position: V,
    pub direction: V,
    pub strength: f32,
    pub radius: f32,
    pub lifetime: Lifetime,
}

impl<V: SimVector> Gust<V> {
    pub fn new(position: V, direction: V, strength: f32, radius: f32, duration: f32) -> Self {
        Self {
            position,
            direction,
            strength,
            radius,
            lifetime: Lifetime::new(duration),
        }
    }

    pub fn contribution(&self, point: V) -> V {
        let to_point = point - self.position;
        let distance = to_point.length();
        if distance >= self.radius {
            return V::ZERO;
        }

        let push = if self.direction == V::ZERO {
            to_point.normalize_or_zero()
        } else {
            self.direction.normalize_or_zero()
        };
        push * (self.strength * falloff(distance, self.radius) * self.lifetime.envelope())
    }
}

/// Swirl of air around `axis` through `position`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vortex {
    pub position: Vec3,
    /// Unit length
    pub axis: Vec3,
    pub strength: f32,
    pub radius: f32,
    pub lifetime: Lifetime,
}

impl Vortex {
    pub fn new(position: Vec3, axis: Vec3, strength: f32, radius: f32, duration: f32) -> Self {
        Self {
            position,
            axis: axis.normalize_or_zero(),
            strength,
            radius,
            lifetime: Lifetime::new(duration),
        }
    }

    /// Tangential flow; zero inside the core and beyond `radius`
    pub fn contribution(&self, point: Vec3) -> Vec3 {
        let to_point = point - self.position;
        let projected = to_point - self.axis * to_point.dot(self.axis);
        let distance = projected.length();
        if distance <= VORTEX_CORE_RADIUS || distance >= self.radius {
            return Vec3::ZERO;
        }

        let tangent = self.axis.cross(projected).normalize_or_zero();
        tangent * (self.strength * falloff(distance, self.radius) * self.lifetime.envelope())
    }
}
