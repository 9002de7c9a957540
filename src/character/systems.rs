use crate::character::components::Character;
use crate::character::logic::{CharacterInput, FlightParams, MotionState, step_motion};
use crate::core::camera::components::MainCameraTarget;
use bevy::prelude::*;

pub fn spawn_character(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let params = FlightParams::default();
    let start = Vec3::new(0.0, params.min_height + 40.0, 0.0);

    commands.spawn((
        Mesh3d(meshes.add(Capsule3d::new(3.0, 8.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.85, 0.75, 0.6))),
        Transform::from_translation(start),
        Character {
            velocity: Vec3::ZERO,
            yaw: 0.0,
            params,
        },
        MainCameraTarget,
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(4000.0, 4000.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.5, 0.3))),
        Transform::default(),
    ));

    info!("Character spawned at {:?}", start);
}

pub fn move_character(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut character_q: Query<(&mut Transform, &mut Character)>,
) {
    let Ok((mut transform, mut character)) = character_q.single_mut() else {
        return;
    };

    let input = CharacterInput {
        forward: keyboard_input.pressed(KeyCode::KeyW),
        backward: keyboard_input.pressed(KeyCode::KeyS),
        turn_left: keyboard_input.pressed(KeyCode::KeyA),
        turn_right: keyboard_input.pressed(KeyCode::KeyD),
        ascend: keyboard_input.pressed(KeyCode::KeyE),
        descend: keyboard_input.pressed(KeyCode::KeyQ),
        boost: keyboard_input.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
    };

    let state = MotionState {
        position: transform.translation,
        velocity: character.velocity,
        yaw: character.yaw,
    };
    let next = step_motion(&state, &input, &character.params, time.delta_secs());

    transform.translation = next.position;
    transform.rotation = Quat::from_rotation_y(next.yaw);
    character.velocity = next.velocity;
    character.yaw = next.yaw;
}
