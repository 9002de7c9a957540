use crate::constants::{MIN_BEND_EDGE, MIN_BEND_ERROR, MIN_CONSTRAINT_LENGTH};
use crate::particle::Particle;
use crate::vector::SimVector;

/// Keeps two particles at a target separation.
///
/// Particles are referenced by index into the owning arena, so the constraint
/// stays valid for as long as the arena's topology is unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceConstraint {
    pub a: usize,
    pub b: usize,
    pub rest_length: f32,
    /// Fraction of the violation removed per solve, 1 = rigid
    pub stiffness: f32,
    pub active: bool,
}

impl DistanceConstraint {
    pub fn new(a: usize, b: usize, rest_length: f32, stiffness: f32) -> Self {
        Self {
            a,
            b,
            rest_length,
            stiffness,
            active: true,
        }
    }

    /// Constraint whose rest length is the particles' current separation
    pub fn from_current<V: SimVector>(particles: &[Particle<V>], a: usize, b: usize, stiffness: f32) -> Self {
        let rest_length = (particles[b].position - particles[a].position).length();
        Self::new(a, b, rest_length, stiffness)
    }

    pub fn set_rest_length(&mut self, length: f32) {
        self.rest_length = length;
    }

    pub fn current_length<V: SimVector>(&self, particles: &[Particle<V>]) -> f32 {
        (particles[self.b].position - particles[self.a].position).length()
    }

    /// Signed stretch, positive when the pair is farther apart than at rest
    pub fn error<V: SimVector>(&self, particles: &[Particle<V>]) -> f32 {
        self.current_length(particles) - self.rest_length
    }

    pub fn solve<V: SimVector>(&self, particles: &mut [Particle<V>]) {
        if !self.active {
            return;
        }

        let delta = particles[self.b].position - particles[self.a].position;
        let current_length = delta.length();
        if current_length < MIN_CONSTRAINT_LENGTH {
            return;
        }

        let diff = (current_length - self.rest_length) / current_length;
        let correction = delta * (diff * 0.5 * self.stiffness);

        let (pinned_a, mass_a) = (particles[self.a].pinned, particles[self.a].mass);
        let (pinned_b, mass_b) = (particles[self.b].pinned, particles[self.b].mass);

        match (pinned_a, pinned_b) {
            (false, false) => {
                // heavier particle moves less
                let total_mass = mass_a + mass_b;
                particles[self.a].position += correction * (mass_b / total_mass);
                particles[self.b].position -= correction * (mass_a / total_mass);
            }
            (false, true) => particles[self.a].position += correction * 2.0,
            (true, false) => particles[self.b].position -= correction * 2.0,
            (true, true) => {}
        }
    }
}

/// Resists folding at particle `b` between the edges towards `a` and `c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BendingConstraint {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub rest_angle: f32,
    pub stiffness: f32,
}

impl BendingConstraint {
    /// Rest angle is taken from the particles' current arrangement
    pub fn new<V: SimVector>(particles: &[Particle<V>], a: usize, b: usize, c: usize, stiffness: f32) -> Self {
        let ba = particles[a].position - particles[b].position;
        let bc = particles[c].position - particles[b].position;
        Self {
            a,
            b,
            c,
            rest_angle: V::bend_angle(bc, ba),
            stiffness,
        }
    }

    pub fn current_angle<V: SimVector>(&self, particles: &[Particle<V>]) -> f32 {
        let pivot = particles[self.b].position;
        V::bend_angle(particles[self.c].position - pivot, particles[self.a].position - pivot)
    }

    /// Rotate the free endpoints about `b` back towards the rest angle.
    /// The pivot itself is never moved.
    ///
    /// When the pivot is pinned the rotation is applied as is. Otherwise the
    /// endpoint shifts are mass-balanced so the triplet's centre of mass stays
    /// put, and a triplet with only one free endpoint is left alone.
    pub fn solve<V: SimVector>(&self, particles: &mut [Particle<V>]) {
        let pivot = particles[self.b].position;
        let ba = particles[self.a].position - pivot;
        let bc = particles[self.c].position - pivot;

        if ba.length() < MIN_BEND_EDGE || bc.length() < MIN_BEND_EDGE {
            return;
        }

        let angle_diff = V::wrap_angle(V::bend_angle(bc, ba) - self.rest_angle);
        if angle_diff.abs() < MIN_BEND_ERROR {
            return;
        }

        let Some(axis) = V::bend_axis(bc, ba) else {
            return;
        };

        let correction = angle_diff * self.stiffness * 0.5;
        let free_a = !particles[self.a].pinned;
        let free_c = !particles[self.c].pinned;

        let mut shift_a = if free_a {
            V::rotate_about(ba, axis, -correction) - ba
        } else {
            V::ZERO
        };
        let mut shift_c = if free_c {
            V::rotate_about(bc, axis, correction) - bc
        } else {
            V::ZERO
        };

        if !particles[self.b].pinned {
            if !(free_a && free_c) {
                return;
            }
            let (mass_a, mass_c) = (particles[self.a].mass, particles[self.c].mass);
            let mean = (shift_a * mass_a + shift_c * mass_c) / (mass_a + mass_c);
            shift_a -= mean;
            shift_c -= mean;
        }

        particles[self.a].position += shift_a;
        particles[self.c].position += shift_c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use rstest::rstest;

    fn pair(mass_a: f32, mass_b: f32, separation: f32) -> Vec<Particle<Vec2>> {
        vec![
            Particle::new(Vec2::ZERO, mass_a, false),
            Particle::new(Vec2::new(separation, 0.0), mass_b, false),
        ]
    }

    #[test]
    fn test_mass_weighted_correction() {
        let mut particles = pair(1.0, 3.0, 12.0);
        let constraint = DistanceConstraint::new(0, 1, 10.0, 1.0);
        constraint.solve(&mut particles);

        let moved_light = (particles[0].position - Vec2::ZERO).length();
        let moved_heavy = (particles[1].position - Vec2::new(12.0, 0.0)).length();
        assert!(moved_light > 0.0);
        assert!(
            (moved_light - 3.0 * moved_heavy).abs() < 1e-5,
            "light moved {}, heavy moved {}",
            moved_light,
            moved_heavy
        );
    }

    #[test]
    fn test_pinned_endpoint_absorbs_nothing() {
        let mut particles = pair(1.0, 1.0, 12.0);
        particles[0].pin();
        let constraint = DistanceConstraint::new(0, 1, 10.0, 1.0);
        constraint.solve(&mut particles);

        assert_eq!(particles[0].position, Vec2::ZERO);
        assert!((particles[1].position.x - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_pinned_pair_untouched() {
        let mut particles = pair(1.0, 1.0, 12.0);
        particles[0].pin();
        particles[1].pin();
        DistanceConstraint::new(0, 1, 10.0, 1.0).solve(&mut particles);

        assert_eq!(particles[0].position, Vec2::ZERO);
        assert_eq!(particles[1].position, Vec2::new(12.0, 0.0));
    }

    #[test]
    fn test_degenerate_pair_is_skipped() {
        let mut particles = pair(1.0, 1.0, 0.0);
        DistanceConstraint::new(0, 1, 10.0, 1.0).solve(&mut particles);

        assert!(particles.iter().all(|p| p.position.is_finite()));
        assert_eq!(particles[1].position, Vec2::ZERO);
    }

    #[test]
    fn test_inactive_constraint_is_skipped() {
        let mut particles = pair(1.0, 1.0, 12.0);
        let mut constraint = DistanceConstraint::new(0, 1, 10.0, 1.0);
        constraint.active = false;
        constraint.solve(&mut particles);
        assert_eq!(particles[1].position, Vec2::new(12.0, 0.0));
    }

    #[test]
    fn test_rigid_convergence() {
        let mut particles = pair(1.0, 2.0, 15.0);
        let constraint = DistanceConstraint::new(0, 1, 10.0, 1.0);
        let initial_error = constraint.error(&particles).abs();

        for _ in 0..20 {
            constraint.solve(&mut particles);
        }

        let final_error = constraint.error(&particles).abs();
        assert!(final_error < initial_error * 0.01, "error {} of {}", final_error, initial_error);
    }

    #[rstest]
    #[case(15.0)]
    #[case(6.0)]
    fn test_soft_convergence_is_monotonic(#[case] separation: f32) {
        let mut particles = pair(1.0, 1.0, separation);
        let constraint = DistanceConstraint::new(0, 1, 10.0, 0.5);

        let mut previous = constraint.error(&particles).abs();
        for _ in 0..20 {
            constraint.solve(&mut particles);
            let error = constraint.error(&particles).abs();
            assert!(error < previous, "error grew from {} to {}", previous, error);
            previous = error;
        }
    }

    #[test]
    fn test_from_current_uses_separation() {
        let particles = vec![
            Particle::new(Vec3::ZERO, 1.0, false),
            Particle::new(Vec3::new(3.0, 4.0, 0.0), 1.0, false),
        ];
        let constraint = DistanceConstraint::from_current(&particles, 0, 1, 1.0);
        assert!((constraint.rest_length - 5.0).abs() < 1e-6);
        assert!(constraint.error(&particles).abs() < 1e-6);
    }

    fn hinge_2d() -> Vec<Particle<Vec2>> {
        vec![
            Particle::new(Vec2::new(-1.0, 0.0), 1.0, false),
            Particle::new(Vec2::ZERO, 1.0, true),
            Particle::new(Vec2::new(1.0, 0.0), 1.0, false),
        ]
    }

    #[test]
    fn test_planar_bend_restores_rest_angle() {
        let mut particles = hinge_2d();
        let bend = BendingConstraint::new(&particles, 0, 1, 2, 1.0);

        particles[2].position = Vec2::new(0.0, 1.0);
        let before = <Vec2 as SimVector>::wrap_angle(bend.current_angle(&particles) - bend.rest_angle).abs();
        bend.solve(&mut particles);
        let after = <Vec2 as SimVector>::wrap_angle(bend.current_angle(&particles) - bend.rest_angle).abs();

        assert!(after < before * 0.1, "error went from {} to {}", before, after);
        assert_eq!(particles[1].position, Vec2::ZERO);
        assert!((particles[0].position.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_spatial_bend_restores_rest_angle() {
        let mut particles = vec![
            Particle::new(Vec3::new(-1.0, 0.0, 0.0), 1.0, false),
            Particle::new(Vec3::ZERO, 1.0, false),
            Particle::new(Vec3::new(0.0, 0.0, 1.0), 1.0, false),
        ];
        let bend = BendingConstraint::new(&particles, 0, 1, 2, 0.5);
        particles[2].position = Vec3::new(0.7, 0.0, 0.7);

        let before = (bend.current_angle(&particles) - bend.rest_angle).abs();
        for _ in 0..10 {
            bend.solve(&mut particles);
        }
        let after = (bend.current_angle(&particles) - bend.rest_angle).abs();

        assert!(after < before, "error went from {} to {}", before, after);
        assert_eq!(particles[1].position, Vec3::ZERO);
    }

    #[test]
    fn test_free_bend_keeps_centre_of_mass() {
        let mut particles = vec![
            Particle::new(Vec3::new(0.0, 6.0, 0.0), 1.0, false),
            Particle::new(Vec3::ZERO, 1.2, false),
            Particle::new(Vec3::new(4.0, -4.0, 1.0), 1.5, false),
        ];
        let bend = BendingConstraint::new(&particles, 0, 1, 2, 1.0);
        particles[0].position = Vec3::new(-3.0, 5.0, 0.0);
        particles[2].position = Vec3::new(0.0, -6.0, 2.0);

        let centre = |ps: &[Particle<Vec3>]| {
            let total: f32 = ps.iter().map(|p| p.mass).sum();
            ps.iter().fold(Vec3::ZERO, |acc, p| acc + p.position * p.mass) / total
        };
        let before_centre = centre(&particles);
        let before = (bend.current_angle(&particles) - bend.rest_angle).abs();
        bend.solve(&mut particles);
        let after = (bend.current_angle(&particles) - bend.rest_angle).abs();

        assert!((centre(&particles) - before_centre).length() < 1e-5);
        assert_eq!(particles[1].position, Vec3::ZERO);
        assert!(after < before, "error went from {} to {}", before, after);
    }

    #[test]
    fn test_free_pivot_with_one_pinned_endpoint_is_left_alone() {
        let mut particles = hinge_2d();
        particles[1].unpin();
        particles[0].pin();
        let bend = BendingConstraint::new(&particles, 0, 1, 2, 1.0);
        particles[2].position = Vec2::new(0.0, 1.0);

        bend.solve(&mut particles);
        assert_eq!(particles[0].position, Vec2::new(-1.0, 0.0));
        assert_eq!(particles[2].position, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_bend_skips_pinned_endpoints() {
        let mut particles = hinge_2d();
        let bend = BendingConstraint::new(&particles, 0, 1, 2, 1.0);
        particles[0].pin();
        particles[2].position = Vec2::new(0.0, 1.0);
        particles[2].pin();

        bend.solve(&mut particles);
        assert_eq!(particles[0].position, Vec2::new(-1.0, 0.0));
        assert_eq!(particles[2].position, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_bend_skips_degenerate_edges() {
        let mut particles = hinge_2d();
        let bend = BendingConstraint::new(&particles, 0, 1, 2, 1.0);
        particles[2].position = Vec2::ZERO;
        bend.solve(&mut particles);
        assert!(particles.iter().all(|p| p.position.is_finite()));
        assert_eq!(particles[0].position, Vec2::new(-1.0, 0.0));
    }
}
