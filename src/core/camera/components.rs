use bevy::prelude::*;

#[derive(Component, Reflect)]
pub struct MainCamera;

/// The entity the main camera chases
#[derive(Component, Reflect)]
pub struct MainCameraTarget;

#[derive(Component, Reflect)]
pub struct ChaseCamera {
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub height: f32,
    pub look_height: f32,
    pub lerp_speed: f32,
    pub current_look_at: Vec3,
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self {
            distance: 140.0,
            min_distance: 40.0,
            max_distance: 400.0,
            height: 45.0,
            look_height: 5.0,
            lerp_speed: 4.0,
            current_look_at: Vec3::ZERO,
        }
    }
}
