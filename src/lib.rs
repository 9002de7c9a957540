mod cape;
mod character;
mod core;
mod ui;

use crate::cape::CapePlugin;
use crate::character::CharacterPlugin;
use crate::core::camera::CameraPlugin;
use crate::core::state::{SimState, SimulationStep};
use crate::ui::UIPlugin;

use bevy::app::App;
#[cfg(debug_assertions)]
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::prelude::*;

/// Fixed simulation rate the cape is stepped at
pub const SIMULATION_HZ: f64 = 60.0;

pub struct ViewerPlugin;

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SimState>()
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationStep::Character,
                    SimulationStep::Wind,
                    SimulationStep::Cape,
                    SimulationStep::Events,
                )
                    .chain()
                    .run_if(in_state(SimState::Running)),
            )
            .add_plugins((CameraPlugin, CharacterPlugin, CapePlugin, UIPlugin))
            .add_systems(Update, toggle_pause);

        #[cfg(debug_assertions)]
        {
            app.add_plugins(LogDiagnosticsPlugin::default());
        }
    }
}

fn toggle_pause(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    state: Res<State<SimState>>,
    mut next_state: ResMut<NextState<SimState>>,
) {
    if keyboard_input.just_pressed(KeyCode::Space) {
        let next = state.get().toggled();
        info!("Simulation {:?}", next);
        next_state.set(next);
    }
}
