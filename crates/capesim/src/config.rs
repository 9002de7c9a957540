use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, OnceLock};

pub const CONFIG_FILE: &str = "capesim_config.toml";

static CONFIG: OnceLock<Mutex<CapeSimConfig>> = OnceLock::new();

/// Get a copy of the current configuration, loading from file if not already loaded.
/// A missing or malformed file falls back to the defaults.
pub fn get_config() -> CapeSimConfig {
    let config_mutex = CONFIG.get_or_init(|| {
        let config = CapeSimConfig::load_from_file(CONFIG_FILE).unwrap_or_else(|err| {
            log::warn!("Could not load {}: {}, using defaults", CONFIG_FILE, err);
            CapeSimConfig::default()
        });
        Mutex::new(config)
    });
    match config_mutex.lock() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn reload_config() -> Result<(), Box<dyn std::error::Error>> {
    reload_config_from_file(CONFIG_FILE)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    pub base_strength: f32,
    pub gust_strength: f32,
    /// Turbulence amplitude relative to `base_strength`
    pub turbulence: f32,
    pub noise_scale: f32,
    pub time_scale: f32,
    pub base_direction: Vec2,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            base_strength: 50.0,
            gust_strength: 80.0,
            turbulence: 0.3,
            noise_scale: 0.008,
            time_scale: 0.5,
            base_direction: Vec2::new(1.0, 0.2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig3d {
    pub base_strength: f32,
    pub gust_strength: f32,
    pub turbulence: f32,
    pub noise_scale: f32,
    pub time_scale: f32,
    pub base_direction: Vec3,
    /// Scale on the vertical turbulence component
    pub vertical_influence: f32,
    pub curl_strength: f32,
}

impl Default for WindConfig3d {
    fn default() -> Self {
        Self {
            base_strength: 60.0,
            gust_strength: 100.0,
            turbulence: 0.4,
            noise_scale: 0.006,
            time_scale: 0.4,
            base_direction: Vec3::new(1.0, 0.0, 0.2),
            vertical_influence: 0.3,
            curl_strength: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapeConfig {
    pub segments: usize,
    pub width: usize,
    pub segment_length: f32,
    /// Column spacing as a share of `segment_length`
    pub width_ratio: f32,
    pub stiffness: f32,
    pub bend_stiffness: f32,
    pub gravity: f32,
    pub wind_influence: f32,
    pub damping: f32,
    pub drag: f32,
    pub billow: f32,
    pub sway: f32,
    pub attach_velocity_share: f32,
}

impl Default for CapeConfig {
    fn default() -> Self {
        Self {
            segments: 12,
            width: 8,
            segment_length: 8.0,
            width_ratio: 0.6,
            stiffness: 0.95,
            bend_stiffness: 0.3,
            gravity: 400.0,
            wind_influence: 1.2,
            damping: 0.98,
            drag: 0.5,
            billow: 0.08,
            sway: 0.002,
            attach_velocity_share: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapeConfig3d {
    pub segments: usize,
    pub width: usize,
    pub segment_length: f32,
    pub width_spacing: f32,
    pub stiffness: f32,
    pub bend_stiffness: f32,
    pub gravity: f32,
    pub wind_influence: f32,
    pub damping: f32,
    pub aerodynamic_drag: f32,
    pub lift_coefficient: f32,
    /// Quadratic air drag on particle speed
    pub drag: f32,
    pub billow: f32,
    pub sway: f32,
    pub attach_velocity_share: f32,
}

impl Default for CapeConfig3d {
    fn default() -> Self {
        Self {
            segments: 14,
            width: 10,
            segment_length: 6.0,
            width_spacing: 4.0,
            stiffness: 0.92,
            bend_stiffness: 0.25,
            gravity: 25.0,
            wind_influence: 1.4,
            damping: 0.985,
            aerodynamic_drag: 0.02,
            lift_coefficient: 0.3,
            drag: 0.0015,
            billow: 0.08,
            sway: 0.002,
            attach_velocity_share: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { iterations: 5 }
    }
}

/// Random transient events emitted by [`crate::wind::scheduler::GustScheduler`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GustSchedulerConfig {
    pub enabled: bool,
    pub min_interval: f32,
    pub max_interval: f32,
    /// Chance that an emission is a vortex rather than a gust
    pub vortex_probability: f64,
    /// Emission distance from the focus point
    pub spawn_radius: f32,
    pub min_strength: f32,
    pub max_strength: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_duration: f32,
    pub max_duration: f32,
}

impl Default for GustSchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_interval: 2.0,
            max_interval: 5.0,
            vortex_probability: 0.25,
            spawn_radius: 40.0,
            min_strength: 60.0,
            max_strength: 150.0,
            min_radius: 40.0,
            max_radius: 100.0,
            min_duration: 1.0,
            max_duration: 3.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapeSimConfig {
    pub wind: WindConfig,
    pub wind3d: WindConfig3d,
    pub cape: CapeConfig,
    pub cape3d: CapeConfig3d,
    pub solver: SolverConfig,
    pub gusts: GustSchedulerConfig,
}

impl CapeSimConfig {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: CapeSimConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn reload_config_from_file(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let new_config = CapeSimConfig::load_from_file(path)?;

    // reload before the first get_config() seeds the slot directly
    let config_mutex = CONFIG.get_or_init(|| Mutex::new(new_config.clone()));

    match config_mutex.lock() {
        Ok(mut config) => *config = new_config,
        Err(poisoned) => *poisoned.into_inner() = new_config,
    }
    log::info!("Reloaded {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("capesim_{}_{}.toml", name, std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_toml_round_trip() {
        let path = temp_path("round_trip");
        let mut config = CapeSimConfig::default();
        config.cape.segments = 20;
        config.wind3d.base_direction = Vec3::new(0.0, 0.0, -1.0);
        config.solver.iterations = 8;

        config.save_to_file(&path).unwrap();
        let loaded = CapeSimConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = temp_path("partial");
        std::fs::write(&path, "[solver]\niterations = 12\n\n[cape]\ngravity = 9.8\n").unwrap();
        let loaded = CapeSimConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.solver.iterations, 12);
        assert_eq!(loaded.cape.gravity, 9.8);
        assert_eq!(loaded.cape.segments, CapeConfig::default().segments);
        assert_eq!(loaded.wind, WindConfig::default());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(CapeSimConfig::load_from_file(&temp_path("does_not_exist")).is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = temp_path("malformed");
        std::fs::write(&path, "[solver\niterations = ").unwrap();
        let result = CapeSimConfig::load_from_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_get_config_falls_back_to_defaults() {
        // no capesim_config.toml next to the crate manifest
        let config = get_config();
        assert_eq!(config.solver.iterations, SolverConfig::default().iterations);
    }
}
