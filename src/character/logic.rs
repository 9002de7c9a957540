use bevy::math::{Quat, Vec3};

#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterInput {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub ascend: bool,
    pub descend: bool,
    pub boost: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct FlightParams {
    pub speed: f32,
    pub boost_multiplier: f32,
    /// Radians per second
    pub turn_rate: f32,
    pub climb_speed: f32,
    /// How quickly velocity catches up with the input, per second
    pub responsiveness: f32,
    pub min_height: f32,
}

impl Default for FlightParams {
    fn default() -> Self {
        Self {
            speed: 60.0,
            boost_multiplier: 2.5,
            turn_rate: 1.8,
            climb_speed: 30.0,
            responsiveness: 3.0,
            min_height: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
}

/// Horizontal heading for a yaw angle; yaw 0 faces -Z
pub fn heading(yaw: f32) -> Vec3 {
    Quat::from_rotation_y(yaw) * Vec3::NEG_Z
}

/// Advance the flier one step. Velocity eases towards what the input asks for
/// instead of snapping, which is what makes the cape trail and billow.
pub fn step_motion(state: &MotionState, input: &CharacterInput, params: &FlightParams, delta_time: f32) -> MotionState {
    let mut yaw = state.yaw;
    if input.turn_left {
        yaw += params.turn_rate * delta_time;
    }
    if input.turn_right {
        yaw -= params.turn_rate * delta_time;
    }

    let mut speed = params.speed;
    if input.boost {
        speed *= params.boost_multiplier;
    }

    let mut throttle = 0.0;
    if input.forward {
        throttle += 1.0;
    }
    if input.backward {
        throttle -= 1.0;
    }

    let mut climb = 0.0;
    if input.ascend {
        climb += params.climb_speed;
    }
    if input.descend {
        climb -= params.climb_speed;
    }

    let desired = heading(yaw) * (throttle * speed) + Vec3::Y * climb;
    let blend = (params.responsiveness * delta_time).clamp(0.0, 1.0);
    let mut velocity = state.velocity.lerp(desired, blend);

    let mut position = state.position + velocity * delta_time;
    if position.y < params.min_height {
        position.y = params.min_height;
        velocity.y = velocity.y.max(0.0);
    }

    MotionState { position, velocity, yaw }
}
