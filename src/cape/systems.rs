use crate::cape::events::*;
use crate::cape::logic::{arrow_end, arrow_origins, attach_point, gust_in_front, strength_ratio};
use crate::cape::resources::*;
use crate::character::components::Character;
use bevy::color::palettes::css;
use bevy::prelude::*;
use capesim::prelude::*;
use rand::Rng;

const CAPE_BACK_OFFSET: f32 = 3.0;
const GUST_LEAD: f32 = 60.0;
const MAX_ARROW_LENGTH: f32 = 35.0;

pub fn setup_simulation(
    mut commands: Commands,
    seed: Res<SceneSeed>,
    character_q: Query<(&Transform, &Character)>,
) {
    let config = capesim::get_config();
    let (body, forward, shoulder) = match character_q.single() {
        Ok((transform, character)) => (transform.translation, *transform.forward(), character.shoulder_offset()),
        Err(_) => (Vec3::ZERO, Vec3::NEG_Z, Vec3::ZERO),
    };

    let cape = Cape3d::new(
        attach_point(body, forward, shoulder, CAPE_BACK_OFFSET),
        forward,
        config.cape3d.clone(),
    );

    info!("Scene seed {} ({:#018x})", seed.user_seed, seed.seed);
    commands.insert_resource(Wind(WindField3d::with_seed(config.wind3d.clone(), seed.seed)));
    commands.insert_resource(Gusts(GustScheduler::new(
        config.gusts.clone(),
        capesim::tools::splitmix64(seed.seed),
    )));
    commands.insert_resource(CapeSim {
        cape,
        iterations: config.solver.iterations,
    });
}

pub fn handle_keys(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut gust_events: MessageWriter<SpawnGustEvent>,
    mut vortex_events: MessageWriter<SpawnVortexEvent>,
    mut reload_events: MessageWriter<ReloadConfigEvent>,
    mut arrow_events: MessageWriter<ToggleWindArrowsEvent>,
) {
    if keyboard_input.just_pressed(KeyCode::KeyG) {
        gust_events.write(SpawnGustEvent);
    }
    if keyboard_input.just_pressed(KeyCode::KeyV) {
        vortex_events.write(SpawnVortexEvent);
    }
    if keyboard_input.just_pressed(KeyCode::KeyR) {
        reload_events.write(ReloadConfigEvent);
    }
    if keyboard_input.just_pressed(KeyCode::KeyT) {
        arrow_events.write(ToggleWindArrowsEvent);
    }
}

pub fn spawn_gust_on_event(
    mut events: MessageReader<SpawnGustEvent>,
    mut wind: ResMut<Wind>,
    character_q: Query<&Transform, With<Character>>,
) {
    let Ok(transform) = character_q.single() else {
        return;
    };
    for _ in events.read() {
        let (position, direction) = gust_in_front(transform.translation, *transform.forward(), GUST_LEAD);
        let strength = rand::rng().random_range(120.0..200.0);
        wind.0.add_gust(position, direction, strength, 90.0, 2.0);
        info!("Gust spawned, strength {:.0}", strength);
    }
}

pub fn spawn_vortex_on_event(
    mut events: MessageReader<SpawnVortexEvent>,
    mut wind: ResMut<Wind>,
    character_q: Query<&Transform, With<Character>>,
) {
    let Ok(transform) = character_q.single() else {
        return;
    };
    for _ in events.read() {
        let mut rng = rand::rng();
        let axis = Vec3::new(rng.random_range(-0.2..0.2), 1.0, rng.random_range(-0.2..0.2));
        wind.0.add_vortex(transform.translation, axis, 150.0, 70.0, 3.0);
        info!("Vortex spawned");
    }
}

pub fn reload_config_on_event(
    mut events: MessageReader<ReloadConfigEvent>,
    mut wind: ResMut<Wind>,
    mut cape_sim: ResMut<CapeSim>,
    mut gusts: ResMut<Gusts>,
    seed: Res<SceneSeed>,
    character_q: Query<(&Transform, &Character)>,
) {
    for _ in events.read() {
        if let Err(err) = capesim::reload_config() {
            warn!("Config reload failed: {}", err);
            continue;
        }
        let config = capesim::get_config();
        wind.0.set_config(config.wind3d.clone());
        gusts.0 = GustScheduler::new(config.gusts.clone(), capesim::tools::splitmix64(seed.seed));

        if let Ok((transform, character)) = character_q.single() {
            let forward = *transform.forward();
            let point = attach_point(transform.translation, forward, character.shoulder_offset(), CAPE_BACK_OFFSET);
            cape_sim.cape = Cape3d::new(point, forward, config.cape3d.clone());
        }
        cape_sim.iterations = config.solver.iterations;
        info!("Config reloaded");
    }
}

pub fn toggle_wind_arrows(mut events: MessageReader<ToggleWindArrowsEvent>, mut display: ResMut<WindDisplay>) {
    for _ in events.read() {
        display.show_arrows = !display.show_arrows;
    }
}

pub fn advance_wind(time: Res<Time>, mut wind: ResMut<Wind>) {
    wind.0.update(time.delta_secs());
}

pub fn attach_cape(mut cape_sim: ResMut<CapeSim>, character_q: Query<(&Transform, &Character)>) {
    let Ok((transform, character)) = character_q.single() else {
        return;
    };
    let forward = *transform.forward();
    let point = attach_point(transform.translation, forward, character.shoulder_offset(), CAPE_BACK_OFFSET);

    cape_sim.cape.set_attach_point(point, forward);
    cape_sim.cape.set_attach_velocity(character.velocity);
}

pub fn step_cape(time: Res<Time>, wind: Res<Wind>, mut cape_sim: ResMut<CapeSim>) {
    let iterations = cape_sim.iterations;
    cape_sim.cape.update(time.delta_secs(), &wind.0);
    cape_sim.cape.solve_constraints(iterations);
}

pub fn schedule_gusts(
    time: Res<Time>,
    mut gusts: ResMut<Gusts>,
    mut wind: ResMut<Wind>,
    character_q: Query<&Transform, With<Character>>,
) {
    let focus = character_q.single().map(|t| t.translation).unwrap_or(Vec3::ZERO);
    gusts.0.drive(time.delta_secs(), focus, &mut wind.0);
}

pub fn draw_cape(mut gizmos: Gizmos, cape_sim: Res<CapeSim>) {
    let cape = &cape_sim.cape;
    let (segments, width) = (cape.segments(), cape.width());
    let cloth = Color::from(css::CRIMSON);
    let seam = Color::from(css::DARK_RED);

    for row in 0..segments {
        for col in 0..width {
            let here = cape.position(row, col);
            if col + 1 < width {
                gizmos.line(here, cape.position(row, col + 1), cloth);
            }
            if row + 1 < segments {
                gizmos.line(here, cape.position(row + 1, col), seam);
            }
        }
    }

    let centre = cape.position(segments / 2, width / 2);
    gizmos.arrow(centre, centre + cape.average_normal() * 10.0, css::GOLD);
}

pub fn draw_wind(
    mut gizmos: Gizmos,
    wind: Res<Wind>,
    display: Res<WindDisplay>,
    character_q: Query<&Transform, With<Character>>,
) {
    let Ok(transform) = character_q.single() else {
        return;
    };

    if display.show_arrows {
        let reference = wind.0.config().base_strength + wind.0.config().gust_strength;
        for origin in arrow_origins(transform.translation, display.spacing, display.half_count) {
            let velocity = wind.0.wind_at(origin);
            let ratio = strength_ratio(velocity.length(), reference);
            let color = Color::srgb(0.3 + 0.7 * ratio, 0.8 - 0.5 * ratio, 1.0 - 0.8 * ratio);
            gizmos.arrow(origin, arrow_end(origin, velocity, display.scale, MAX_ARROW_LENGTH), color);
        }
    }

    for gust in wind.0.gusts() {
        let isometry = Isometry3d::from_translation(gust.position);
        gizmos.sphere(isometry, gust.radius * gust.lifetime.envelope().max(0.05), css::SKY_BLUE);
    }
    for vortex in wind.0.vortices() {
        let isometry = Isometry3d::from_translation(vortex.position);
        gizmos.sphere(isometry, vortex.radius * vortex.lifetime.envelope().max(0.05), css::ORCHID);
        gizmos.line(vortex.position, vortex.position + vortex.axis * vortex.radius, css::ORCHID);
    }
}
