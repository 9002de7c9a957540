use bevy::math::Vec3;

const ZOOM_STEP: f32 = 8.0;

pub struct ChaseView {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Where the camera wants to be: behind the target's heading and above it.
/// Only the horizontal part of `forward` counts, so climbing does not flip the view.
pub fn chase_view(target: Vec3, forward: Vec3, distance: f32, height: f32, look_height: f32) -> ChaseView {
    let flat = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
    let behind = if flat == Vec3::ZERO { Vec3::Z } else { -flat };

    ChaseView {
        position: target + behind * distance + Vec3::Y * height,
        look_at: target + Vec3::Y * look_height,
    }
}

/// Share of the remaining gap to close this frame
pub fn follow_factor(lerp_speed: f32, delta_time: f32) -> f32 {
    (lerp_speed * delta_time).clamp(0.0, 1.0)
}

pub fn zoom_distance(distance: f32, wheel_delta: f32, min_distance: f32, max_distance: f32) -> f32 {
    (distance - wheel_delta * ZOOM_STEP).clamp(min_distance, max_distance)
}
