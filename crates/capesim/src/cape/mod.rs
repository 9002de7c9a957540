// Capes: force models driving a ClothGrid pinned to a moving attachment line

pub mod planar;
pub mod spatial;

pub use planar::Cape;
pub use spatial::Cape3d;

use crate::vector::SimVector;

/// 0 at the attachment line, approaching 1 at the free hem
fn row_factor(row: usize, segments: usize) -> f32 {
    row as f32 / segments as f32
}

/// Lateral offset of `col` when `width` columns are centred on the attachment point
fn column_offset(col: usize, width: usize, spacing: f32) -> f32 {
    col as f32 * spacing - (width - 1) as f32 * spacing * 0.5
}

/// Force a mover leaves behind on the cloth: billowing and sideways sway
fn motion_forces<V: SimVector>(
    attach_velocity: V,
    lateral: V,
    row: usize,
    segments: usize,
    clock: f32,
    billow: f32,
    sway: f32,
) -> V {
    let billow_force = attach_velocity * (-billow * row_factor(row, segments));
    let sway_amount = (row as f32 * 0.5 + clock * 3.0).sin() * attach_velocity.length() * sway;
    billow_force + lateral * sway_amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rstest::rstest;

    #[rstest]
    #[case(0, 4, 2.0, -3.0)]
    #[case(3, 4, 2.0, 3.0)]
    #[case(1, 3, 5.0, 0.0)]
    fn test_columns_are_centred(#[case] col: usize, #[case] width: usize, #[case] spacing: f32, #[case] expected: f32) {
        assert!((column_offset(col, width, spacing) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_standing_still_leaves_no_wake() {
        let force = motion_forces(Vec2::ZERO, Vec2::X, 5, 10, 1.7, 0.08, 0.002);
        assert_eq!(force, Vec2::ZERO);
    }

    #[test]
    fn test_billow_trails_motion() {
        let force = motion_forces(Vec2::new(100.0, 0.0), Vec2::Y, 8, 8, 0.0, 0.08, 0.0);
        assert!((force.x - (-8.0)).abs() < 1e-5);
    }
}
