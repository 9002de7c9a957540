pub(crate) mod components;
pub(crate) mod logic;
mod systems;

use crate::core::state::SimulationStep;
use bevy::prelude::*;
use systems::*;

pub(crate) struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_character).add_systems(
            FixedUpdate,
            move_character.in_set(SimulationStep::Character),
        );
    }
}
