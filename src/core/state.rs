use bevy::prelude::{States, SystemSet};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub(crate) enum SimState {
    #[default]
    Running,
    Paused,
}

impl SimState {
    pub fn toggled(self) -> Self {
        match self {
            SimState::Running => SimState::Paused,
            SimState::Paused => SimState::Running,
        }
    }
}

/// Ordering of the fixed-rate simulation step
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum SimulationStep {
    Character,
    Wind,
    Cape,
    Events,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(SimState::Running.toggled(), SimState::Paused);
        assert_eq!(SimState::Running.toggled().toggled(), SimState::Running);
    }
}
