pub mod cape;
pub mod config;
pub mod constants;
pub mod constraint;
pub mod grid;
pub mod noise;
pub mod particle;
pub mod prelude;
pub mod tools;
pub mod vector;
pub mod wind;

pub use config::{get_config, reload_config};
