use crate::core::camera::components::{ChaseCamera, MainCamera, MainCameraTarget};
use crate::core::camera::logic::{chase_view, follow_factor, zoom_distance};
use bevy::input::mouse::MouseWheel;
use bevy::light::DirectionalLight;
use bevy::log::info;
use bevy::math::{EulerRot, Quat, Vec3};
use bevy::prelude::*;
use std::f32::consts::PI;

pub fn spawn_camera(mut commands: Commands) {
    let camera = ChaseCamera::default();
    let start = chase_view(Vec3::ZERO, Vec3::NEG_Z, camera.distance, camera.height, camera.look_height);

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(start.position).looking_at(start.look_at, Vec3::Y),
        MainCamera,
        ChaseCamera {
            current_look_at: start.look_at,
            ..camera
        },
    ));

    commands.spawn((
        Transform::from_rotation(Quat::from_euler(EulerRot::ZYX, 0.0, 1.0, -PI / 4.)),
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
    ));

    info!("Camera spawned");
}

pub fn camera_zoom(mut mouse_wheel: MessageReader<MouseWheel>, mut camera_q: Query<&mut ChaseCamera, With<MainCamera>>) {
    let Ok(mut camera) = camera_q.single_mut() else {
        return;
    };
    for wheel in mouse_wheel.read() {
        camera.distance = zoom_distance(camera.distance, wheel.y, camera.min_distance, camera.max_distance);
    }
}

pub fn camera_follow(
    time: Res<Time>,
    target_q: Query<&Transform, (With<MainCameraTarget>, Without<MainCamera>)>,
    mut camera_q: Query<(&mut Transform, &mut ChaseCamera), With<MainCamera>>,
) {
    let (Ok(target), Ok((mut transform, mut camera))) = (target_q.single(), camera_q.single_mut()) else {
        return;
    };

    let view = chase_view(
        target.translation,
        *target.forward(),
        camera.distance,
        camera.height,
        camera.look_height,
    );
    let factor = follow_factor(camera.lerp_speed, time.delta_secs());

    transform.translation = transform.translation.lerp(view.position, factor);
    camera.current_look_at = camera.current_look_at.lerp(view.look_at, factor);
    transform.look_at(camera.current_look_at, Vec3::Y);
}
