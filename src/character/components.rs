use crate::character::logic::FlightParams;
use bevy::prelude::*;

/// The flier wearing the cape
#[derive(Component)]
pub struct Character {
    pub velocity: Vec3,
    pub yaw: f32,
    pub params: FlightParams,
}

impl Character {
    /// Where the cape's attachment line is centred, relative to the body
    pub fn shoulder_offset(&self) -> Vec3 {
        Vec3::new(0.0, 6.0, 0.0)
    }
}
