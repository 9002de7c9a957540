use bevy::prelude::*;

#[derive(Component)]
pub struct HudPanel;

/// Live status line, rewritten every frame
#[derive(Component)]
pub struct HudStatus;

pub const KEY_HELP: &str = "WASD fly, E/Q climb, Shift boost\n\
G gust, V vortex, T arrows, R reload config\n\
Space pause, wheel zoom";

pub struct HudSnapshot {
    pub user_seed: u32,
    pub paused: bool,
    pub gusts: usize,
    pub vortices: usize,
    pub wind_speed: f32,
    pub next_event_in: Option<f32>,
}

impl HudSnapshot {
    pub fn status_text(&self) -> String {
        let mut text = format!("Seed {:08}", self.user_seed);
        if self.paused {
            text.push_str("  [PAUSED]");
        }
        text.push_str(&format!(
            "\nWind {:.0}  gusts {}  vortices {}",
            self.wind_speed, self.gusts, self.vortices
        ));
        if let Some(countdown) = self.next_event_in {
            text.push_str(&format!("\nNext event in {:.1}s", countdown.max(0.0)));
        }
        text
    }
}
