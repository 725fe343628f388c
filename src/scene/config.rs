//! Scene configuration

use bevy::prelude::*;

/// Scale factors and per-frame tunables shared by the builder and the frame systems
#[derive(Resource, Debug, Clone)]
pub struct SceneConfig {
    /// Scene units per catalog km for orbit radii
    pub distance_scale: f32,
    /// Scene units per catalog km for body and ring radii
    pub size_scale: f32,
    /// Orbit band half-width as a fraction of the scaled body radius
    pub orbit_band_thickness: f32,
    /// Converts catalog orbit speeds to radians per frame
    pub orbit_time_scale: f32,
    /// Camera standoff from a followed planet
    pub follow_offset: Vec3,
    /// Fraction of the remaining distance covered per frame while following
    pub follow_lerp: f32,
    pub label_scale_per_unit: f32,
    /// Labels are hidden at or below this scale
    pub label_min_scale: f32,
    pub ring_scale_per_unit: f32,
    pub ring_min_scale: f32,
    pub label_font_size: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            distance_scale: 1e-7,
            size_scale: 1e-4,
            orbit_band_thickness: 0.5,
            orbit_time_scale: 0.01,
            follow_offset: Vec3::new(20.0, 0.0, 0.0),
            follow_lerp: 0.1,
            label_scale_per_unit: 0.05,
            label_min_scale: 0.5,
            ring_scale_per_unit: 0.005,
            ring_min_scale: 0.2,
            label_font_size: 18.0,
        }
    }
}
