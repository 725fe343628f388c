//! Camera module
//!
//! The main camera is a `PanOrbitCamera`. While a planet carries
//! `ActivePlanet` the follow system eases the camera toward it each frame and
//! keeps the orbit controller's pose in sync.

use bevy::prelude::*;

pub mod follow;
pub mod selection;

pub use follow::{OrbitPose, follow_active_planet, follow_step};
pub use selection::{
    PlanetSelection, SelectionRequest, apply_planet_selection, release_follow_on_escape,
};

use crate::frame::FrameSystems;

/// Marker for the scene's main camera
#[derive(Component, Debug, Default)]
pub struct MainCamera;

/// Plugin for camera follow and planet selection
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlanetSelection>()
            .add_systems(
                Update,
                (release_follow_on_escape, apply_planet_selection)
                    .chain()
                    .before(FrameSystems::Spin),
            )
            .add_systems(Update, follow_active_planet.in_set(FrameSystems::CameraFollow));
    }
}
