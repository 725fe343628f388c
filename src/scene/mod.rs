//! Planet scene module
//!
//! Builds the entity graph for every catalog planet at startup and binds
//! textures to it as they finish loading.

use bevy::prelude::*;

pub mod builder;
pub mod components;
pub mod config;
pub mod resources;
pub mod ring_mesh;
pub mod textures;

pub use builder::{load_planet_textures, spawn_planets};
pub use components::{
    ActivePlanet, Billboard, LabelOverlay, OrbitBand, OrbitGroup, PlanetBody, PlanetId,
    PlanetLabel, RingSystem, Sun,
};
pub use config::SceneConfig;
pub use resources::{PlanetEntity, PlanetTable};
pub use textures::{PendingTexture, PlanetTextures, bind_loaded_textures};

/// Plugin for planet scene construction and texture binding
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneConfig>()
            .init_resource::<PlanetTable>()
            .add_systems(Startup, (load_planet_textures, spawn_planets).chain())
            .add_systems(Update, bind_loaded_textures);
    }
}
