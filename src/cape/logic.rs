use bevy::math::Vec3;

/// Centre of the cape's attachment line: at the shoulders, pushed back behind the body
pub fn attach_point(body: Vec3, forward: Vec3, shoulder: Vec3, back_offset: f32) -> Vec3 {
    body + shoulder - forward * back_offset
}

/// Manual gusts start `lead` units ahead of the character and blow back at it
pub fn gust_in_front(focus: Vec3, forward: Vec3, lead: f32) -> (Vec3, Vec3) {
    (focus + forward * lead, -forward)
}

/// Horizontal grid of sample points around `center`, snapped to `spacing`
/// so arrows stay put while the character moves through them
pub fn arrow_origins(center: Vec3, spacing: f32, half_count: i32) -> Vec<Vec3> {
    let snapped_x = (center.x / spacing).round() * spacing;
    let snapped_z = (center.z / spacing).round() * spacing;

    let mut origins = Vec::new();
    for i in -half_count..=half_count {
        for j in -half_count..=half_count {
            origins.push(Vec3::new(
                snapped_x + i as f32 * spacing,
                center.y,
                snapped_z + j as f32 * spacing,
            ));
        }
    }
    origins
}

pub fn arrow_end(origin: Vec3, wind: Vec3, scale: f32, max_length: f32) -> Vec3 {
    origin + (wind * scale).clamp_length_max(max_length)
}

/// 0 for calm air, 1 at `reference` strength and above
pub fn strength_ratio(strength: f32, reference: f32) -> f32 {
    if reference <= 0.0 {
        return 1.0;
    }
    (strength / reference).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_attach_point_sits_behind_shoulders() {
        let point = attach_point(Vec3::new(10.0, 50.0, 0.0), Vec3::NEG_Z, Vec3::Y * 6.0, 3.0);
        assert_eq!(point, Vec3::new(10.0, 56.0, 3.0));
    }

    #[test]
    fn test_gust_blows_back_at_character() {
        let (position, direction) = gust_in_front(Vec3::ZERO, Vec3::X, 60.0);
        assert_eq!(position, Vec3::new(60.0, 0.0, 0.0));
        assert_eq!(direction, Vec3::NEG_X);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 9)]
    #[case(4, 81)]
    fn test_arrow_grid_size(#[case] half_count: i32, #[case] expected: usize) {
        assert_eq!(arrow_origins(Vec3::ZERO, 40.0, half_count).len(), expected);
    }

    #[test]
    fn test_arrow_grid_is_snapped() {
        let a = arrow_origins(Vec3::new(3.0, 20.0, -5.0), 40.0, 1);
        let b = arrow_origins(Vec3::new(-12.0, 20.0, 9.0), 40.0, 1);
        assert_eq!(a, b);
        assert!(a.iter().all(|p| p.y == 20.0));
    }

    #[rstest]
    #[case(Vec3::new(10.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0))]
    #[case(Vec3::new(0.0, 0.0, 100.0), Vec3::new(0.0, 0.0, 20.0))] // clamped
    #[case(Vec3::ZERO, Vec3::ZERO)]
    fn test_arrow_end(#[case] wind: Vec3, #[case] expected: Vec3) {
        let end = arrow_end(Vec3::ZERO, wind, 0.5, 20.0);
        assert!((end - expected).length() < 1e-5);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(50.0, 0.5)]
    #[case(300.0, 1.0)]
    fn test_strength_ratio(#[case] strength: f32, #[case] expected: f32) {
        assert!((strength_ratio(strength, 100.0) - expected).abs() < 1e-6);
    }
}
