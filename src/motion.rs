//! Orbital motion and axial spin
//!
//! Motion is purely parametric: each frame adds a fixed angle to every body's
//! spin and every orbit group's pivot. Speeds come straight from the catalog.

use bevy::prelude::*;

use crate::frame::FrameSystems;
use crate::scene::{OrbitGroup, PlanetBody, SceneConfig};

/// Plugin for the spin and orbit updaters
pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, spin_planets.in_set(FrameSystems::Spin))
            .add_systems(Update, advance_orbits.in_set(FrameSystems::Orbit));
    }
}

/// Rotate every planet body about its tilted axis
pub fn spin_planets(mut bodies: Query<(&mut PlanetBody, &mut Transform)>) {
    for (mut body, mut transform) in &mut bodies {
        body.advance();
        transform.rotation = body.rotation();
    }
}

/// Swing every orbit group around the sun
pub fn advance_orbits(
    config: Res<SceneConfig>,
    mut groups: Query<(&mut OrbitGroup, &mut Transform)>,
) {
    for (mut group, mut transform) in &mut groups {
        group.advance(config.orbit_time_scale);
        transform.rotation = group.rotation();
    }
}
