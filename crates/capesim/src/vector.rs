// Dimension abstraction shared by particles, constraints and the cloth grid

use glam::{Quat, Vec2, Vec3};
use std::f32::consts::{PI, TAU};
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Vector type a cloth can be simulated in.
///
/// Everything but bending is plain vector arithmetic. Bending needs an angle
/// between two edges and a way to rotate an edge about the shared pivot, which
/// is where 2D (signed planar angle) and 3D (unsigned angle + axis) differ.
pub trait SimVector:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f32, Output = Self>
    + Div<f32, Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign<f32>
{
    /// Rotation axis for bending; `()` in the plane
    type Axis: Copy + Debug;

    const ZERO: Self;

    fn dot(self, rhs: Self) -> f32;
    fn length(self) -> f32;
    fn length_squared(self) -> f32;
    fn normalize_or_zero(self) -> Self;
    fn is_finite(self) -> bool;

    /// Angle measured from `from` to `to`
    fn bend_angle(from: Self, to: Self) -> f32;

    /// Axis that rotates `from` towards `to`, if the pair is not degenerate
    fn bend_axis(from: Self, to: Self) -> Option<Self::Axis>;

    /// Bring an angle difference into the range the angle measure lives in
    fn wrap_angle(diff: f32) -> f32;

    fn rotate_about(v: Self, axis: Self::Axis, angle: f32) -> Self;
}

impl SimVector for Vec2 {
    type Axis = ();

    const ZERO: Self = Vec2::ZERO;

    fn dot(self, rhs: Self) -> f32 {
        Vec2::dot(self, rhs)
    }

    fn length(self) -> f32 {
        Vec2::length(self)
    }

    fn length_squared(self) -> f32 {
        Vec2::length_squared(self)
    }

    fn normalize_or_zero(self) -> Self {
        Vec2::normalize_or_zero(self)
    }

    fn is_finite(self) -> bool {
        Vec2::is_finite(self)
    }

    fn bend_angle(from: Self, to: Self) -> f32 {
        from.perp_dot(to).atan2(from.dot(to))
    }

    fn bend_axis(_from: Self, _to: Self) -> Option<()> {
        Some(())
    }

    fn wrap_angle(diff: f32) -> f32 {
        let mut wrapped = diff;
        while wrapped > PI {
            wrapped -= TAU;
        }
        while wrapped < -PI {
            wrapped += TAU;
        }
        wrapped
    }

    fn rotate_about(v: Self, _axis: (), angle: f32) -> Self {
        Vec2::from_angle(angle).rotate(v)
    }
}

impl SimVector for Vec3 {
    type Axis = Vec3;

    const ZERO: Self = Vec3::ZERO;

    fn dot(self, rhs: Self) -> f32 {
        Vec3::dot(self, rhs)
    }

    fn length(self) -> f32 {
        Vec3::length(self)
    }

    fn length_squared(self) -> f32 {
        Vec3::length_squared(self)
    }

    fn normalize_or_zero(self) -> Self {
        Vec3::normalize_or_zero(self)
    }

    fn is_finite(self) -> bool {
        Vec3::is_finite(self)
    }

    fn bend_angle(from: Self, to: Self) -> f32 {
        let dot = from.normalize_or_zero().dot(to.normalize_or_zero());
        dot.clamp(-1.0, 1.0).acos()
    }

    fn bend_axis(from: Self, to: Self) -> Option<Vec3> {
        let axis = from.normalize_or_zero().cross(to.normalize_or_zero());
        let len = axis.length();
        if len < crate::constants::MIN_BEND_EDGE {
            None
        } else {
            Some(axis / len)
        }
    }

    fn wrap_angle(diff: f32) -> f32 {
        diff
    }

    fn rotate_about(v: Self, axis: Vec3, angle: f32) -> Self {
        Quat::from_axis_angle(axis, angle) * v
    }
}
