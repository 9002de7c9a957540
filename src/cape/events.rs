use bevy::prelude::*;

#[derive(Message)]
pub struct SpawnGustEvent;

#[derive(Message)]
pub struct SpawnVortexEvent;

#[derive(Message)]
pub struct ReloadConfigEvent;

#[derive(Message)]
pub struct ToggleWindArrowsEvent;
