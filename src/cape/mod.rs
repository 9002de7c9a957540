pub(crate) mod events;
mod logic;
pub(crate) mod resources;
mod systems;

use crate::cape::events::*;
use crate::cape::resources::*;
use crate::cape::systems::*;
use crate::core::state::SimulationStep;
use bevy::prelude::*;

pub(crate) struct CapePlugin;

impl Plugin for CapePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SpawnGustEvent>()
            .add_message::<SpawnVortexEvent>()
            .add_message::<ReloadConfigEvent>()
            .add_message::<ToggleWindArrowsEvent>()
            .init_resource::<SceneSeed>()
            .init_resource::<WindDisplay>()
            .add_systems(PostStartup, setup_simulation)
            .add_systems(
                Update,
                (
                    handle_keys,
                    spawn_gust_on_event,
                    spawn_vortex_on_event,
                    reload_config_on_event,
                    toggle_wind_arrows,
                )
                    .chain(),
            )
            .add_systems(Update, (draw_cape, draw_wind).run_if(resource_exists::<CapeSim>))
            .add_systems(FixedUpdate, advance_wind.in_set(SimulationStep::Wind))
            .add_systems(
                FixedUpdate,
                (attach_cape, step_cape).chain().in_set(SimulationStep::Cape),
            )
            .add_systems(FixedUpdate, schedule_gusts.in_set(SimulationStep::Events));
    }
}
