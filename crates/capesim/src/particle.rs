use crate::vector::SimVector;

pub const DEFAULT_DAMPING: f32 = 0.99;

/// Point mass integrated with position Verlet.
///
/// Velocity is never stored; it is the difference between the current and the
/// previous position. A pinned particle is kinematic: forces are ignored and
/// only [`Particle::move_to`] changes where it is.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle<V: SimVector> {
    pub position: V,
    pub previous_position: V,
    /// Force accumulator divided by mass, cleared on every integration step
    pub acceleration: V,
    pub mass: f32,
    pub pinned: bool,
    /// Share of the inferred velocity kept each step, in (0, 1]
    pub damping: f32,
}

impl<V: SimVector> Particle<V> {
    /// Preconditions: `mass > 0`
    pub fn new(position: V, mass: f32, pinned: bool) -> Self {
        Self {
            position,
            previous_position: position,
            acceleration: V::ZERO,
            mass,
            pinned,
            damping: DEFAULT_DAMPING,
        }
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn apply_force(&mut self, force: V) {
        if !self.pinned {
            self.acceleration += force / self.mass;
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.pinned {
            self.acceleration = V::ZERO;
            return;
        }

        let velocity = (self.position - self.previous_position) * self.damping;
        self.previous_position = self.position;
        self.position += velocity + self.acceleration * (dt * dt);
        self.acceleration = V::ZERO;
    }

    /// Displacement over the last step
    pub fn velocity(&self) -> V {
        self.position - self.previous_position
    }

    pub fn set_velocity(&mut self, velocity: V) {
        self.previous_position = self.position - velocity;
    }

    pub fn pin(&mut self) {
        self.pinned = true;
        self.previous_position = self.position;
    }

    pub fn unpin(&mut self) {
        self.pinned = false;
    }

    /// Teleport the particle.
    ///
    /// Pinned particles come to rest at `position`; free particles keep their
    /// inferred velocity.
    pub fn move_to(&mut self, position: V) {
        let delta = position - self.position;
        self.position = position;
        if self.pinned {
            self.previous_position = position;
        } else {
            self.previous_position += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use rstest::rstest;

    #[test]
    fn test_first_step_is_pure_acceleration() {
        let mut p = Particle::new(Vec2::ZERO, 1.0, false).with_damping(1.0);
        p.apply_force(Vec2::new(0.0, -10.0));
        p.update(0.1);

        assert!((p.position - Vec2::new(0.0, -0.1)).length() < 1e-6, "position was {:?}", p.position);
        assert_eq!(p.acceleration, Vec2::ZERO);
    }

    #[test]
    fn test_pinned_never_moves() {
        let start = Vec3::new(1.0, 2.0, 3.0);
        let mut p = Particle::new(start, 2.0, true);
        for _ in 0..100 {
            p.apply_force(Vec3::new(50.0, -400.0, 7.0));
            p.update(1.0 / 60.0);
        }
        assert_eq!(p.position, start);
        assert_eq!(p.acceleration, Vec3::ZERO);
    }

    #[rstest]
    #[case(1.0)]
    #[case(4.0)]
    fn test_force_scales_with_inverse_mass(#[case] mass: f32) {
        let mut p = Particle::new(Vec2::ZERO, mass, false);
        p.apply_force(Vec2::new(8.0, 0.0));
        assert!((p.acceleration.x - 8.0 / mass).abs() < 1e-6);
    }

    #[test]
    fn test_velocity_carries_over_with_damping() {
        let mut p = Particle::new(Vec2::ZERO, 1.0, false).with_damping(0.5);
        p.set_velocity(Vec2::new(2.0, 0.0));
        assert_eq!(p.velocity(), Vec2::new(2.0, 0.0));

        p.update(0.1);
        assert!((p.position.x - 1.0).abs() < 1e-6);
        assert!((p.velocity().x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_move_to_free_particle_keeps_velocity() {
        let mut p = Particle::new(Vec3::ZERO, 1.0, false);
        p.set_velocity(Vec3::new(0.0, 1.0, 0.0));
        p.move_to(Vec3::new(10.0, 0.0, 0.0));

        assert_eq!(p.position, Vec3::new(10.0, 0.0, 0.0));
        assert!((p.velocity() - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_move_to_pinned_particle_comes_to_rest() {
        let mut p = Particle::new(Vec3::ZERO, 1.0, true);
        p.set_velocity(Vec3::new(3.0, 0.0, 0.0));
        p.move_to(Vec3::new(0.0, 5.0, 0.0));

        assert_eq!(p.velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_pin_zeroes_velocity() {
        let mut p = Particle::new(Vec2::ZERO, 1.0, false);
        p.set_velocity(Vec2::new(1.0, 1.0));
        p.pin();
        assert_eq!(p.velocity(), Vec2::ZERO);

        p.unpin();
        p.apply_force(Vec2::new(0.0, -1.0));
        p.update(1.0);
        assert!(p.position.y < 0.0);
    }
}
