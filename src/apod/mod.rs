//! NASA Astronomy Picture of the Day fetch (feature `apod`).
//!
//! Diagnostic only: the entry is logged and never reaches the scene.

use bevy::prelude::*;

pub mod fetcher;
pub mod systems;
pub mod types;

pub use systems::{drain_apod_results, setup_apod_worker};
pub use types::{ApodConfig, ApodSummary};

/// Plugin for the APOD background fetch.
pub struct ApodPlugin;

impl Plugin for ApodPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ApodConfig>()
            .add_systems(Startup, setup_apod_worker)
            .add_systems(Update, drain_apod_results);
    }
}
