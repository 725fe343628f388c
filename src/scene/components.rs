//! Planet scene components

use bevy::prelude::*;
use std::f32::consts::TAU;

/// Catalog index of the planet an entity belongs to
#[derive(Component, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlanetId(pub usize);

/// Pivot at the sun whose rotation carries a planet along its orbit
#[derive(Component, Clone, Debug)]
pub struct OrbitGroup {
    /// Radians, wrapped into [0, 2π)
    pub angle: f32,
    /// Catalog orbit speed (before `orbit_time_scale`)
    pub speed: f32,
}

impl OrbitGroup {
    pub fn new(speed: f32) -> Self {
        Self { angle: 0.0, speed }
    }

    pub fn advance(&mut self, time_scale: f32) {
        self.angle = (self.angle + self.speed * time_scale).rem_euclid(TAU);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.angle)
    }
}

/// Planet body spinning about its tilted axis
#[derive(Component, Clone, Debug)]
pub struct PlanetBody {
    /// Radians, wrapped into [0, 2π)
    pub spin_angle: f32,
    /// Radians per frame
    pub rotation_speed: f32,
    /// Radians about X
    pub axial_tilt: f32,
}

impl PlanetBody {
    pub fn new(rotation_speed: f32, axial_tilt_deg: f32) -> Self {
        Self {
            spin_angle: 0.0,
            rotation_speed,
            axial_tilt: axial_tilt_deg.to_radians(),
        }
    }

    pub fn advance(&mut self) {
        self.spin_angle = (self.spin_angle + self.rotation_speed).rem_euclid(TAU);
    }

    /// Tilt first, then spin about the tilted axis.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_x(self.axial_tilt) * Quat::from_rotation_y(self.spin_angle)
    }
}

/// Marker for the planet the camera is following
#[derive(Component, Debug, Default)]
pub struct ActivePlanet;

/// Scene element re-oriented toward the camera every frame
#[derive(Component, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Billboard {
    /// Label anchor: scales with distance, hidden up close
    Label,
    /// Decorative ring: scales with distance, never hidden
    DecorativeRing,
}

/// Label anchor carrying the text shown by the overlay
#[derive(Component, Clone, Debug)]
pub struct PlanetLabel {
    pub text: String,
    pub color: Color,
}

/// UI text node tracking a label anchor on screen
#[derive(Component, Copy, Clone, Debug)]
pub struct LabelOverlay {
    pub anchor: Entity,
}

/// Orbit path band drawn in the orbital plane
#[derive(Component, Debug)]
pub struct OrbitBand;

/// Physical ring system mesh
#[derive(Component, Debug)]
pub struct RingSystem;

/// Marker for the sun mesh
#[derive(Component, Debug)]
pub struct Sun;
