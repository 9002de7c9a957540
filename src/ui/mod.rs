mod bundles;
pub mod components;

use crate::cape::resources::{Gusts, SceneSeed, Wind};
use crate::character::components::Character;
use crate::core::state::SimState;
use bevy::prelude::*;
use bundles::*;
use components::*;

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, update_hud.run_if(resource_exists::<Wind>));
    }
}

fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((PanelBundle::top_left(Color::srgba(0.05, 0.05, 0.1, 0.6)), HudPanel))
        .with_children(|parent| {
            parent.spawn((LabelBundle::new("", 18.0, Color::WHITE), HudStatus));
            parent.spawn(
                LabelBundle::new(KEY_HELP, 14.0, Color::srgb(0.75, 0.75, 0.8))
                    .with_margin(UiRect::top(Val::Px(6.0))),
            );
        });
}

fn update_hud(
    seed: Res<SceneSeed>,
    wind: Res<Wind>,
    gusts: Option<Res<Gusts>>,
    state: Res<State<SimState>>,
    character_q: Query<&Transform, With<Character>>,
    mut status_q: Query<&mut Text, With<HudStatus>>,
) {
    let wind_speed = character_q
        .single()
        .map(|transform| wind.0.strength_at(transform.translation))
        .unwrap_or(0.0);

    let snapshot = HudSnapshot {
        user_seed: seed.user_seed,
        paused: *state.get() == SimState::Paused,
        gusts: wind.0.gusts().len(),
        vortices: wind.0.vortices().len(),
        wind_speed,
        next_event_in: gusts
            .filter(|scheduler| scheduler.0.config().enabled)
            .map(|scheduler| scheduler.0.countdown()),
    };

    for mut text in status_q.iter_mut() {
        text.0 = snapshot.status_text();
    }
}
