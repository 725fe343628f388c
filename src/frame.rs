//! Per-frame update ordering
//!
//! Every frame the scene is advanced in a fixed order: axial spin, orbital
//! motion, camera follow, then billboards. Each module registers its systems in
//! the matching set.

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSystems {
    Spin,
    Orbit,
    CameraFollow,
    Billboard,
}

/// Plugin that orders the per-frame sets
pub struct FramePlugin;

impl Plugin for FramePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                FrameSystems::Spin,
                FrameSystems::Orbit,
                FrameSystems::CameraFollow,
                FrameSystems::Billboard,
            )
                .chain(),
        );
    }
}
