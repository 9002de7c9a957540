use bevy::prelude::Resource;
use capesim::prelude::*;

#[derive(Resource, Clone)]
pub struct SceneSeed {
    /// Short seed shown to the user
    pub user_seed: u32,
    pub seed: u64,
}

impl Default for SceneSeed {
    fn default() -> Self {
        let user_seed = capesim::tools::generate_seed8();
        Self {
            user_seed,
            seed: capesim::tools::expand_seed64(user_seed),
        }
    }
}

#[derive(Resource)]
pub struct Wind(pub WindField3d);

#[derive(Resource)]
pub struct CapeSim {
    pub cape: Cape3d,
    pub iterations: usize,
}

#[derive(Resource)]
pub struct Gusts(pub GustScheduler);

#[derive(Resource)]
pub struct WindDisplay {
    pub show_arrows: bool,
    pub spacing: f32,
    pub half_count: i32,
    /// World units of arrow per unit of wind speed
    pub scale: f32,
}

impl Default for WindDisplay {
    fn default() -> Self {
        Self {
            show_arrows: true,
            spacing: 40.0,
            half_count: 4,
            scale: 0.25,
        }
    }
}
