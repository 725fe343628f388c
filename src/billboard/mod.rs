//! Billboard module
//!
//! Label anchors and decorative rings turn to face the camera and grow with
//! camera distance. Label text is drawn as UI, pinned to each anchor's
//! projected position.

use bevy::prelude::*;
use bevy::transform::TransformSystems;

pub mod overlay;
pub mod systems;

pub use overlay::{centered_on, position_label_overlays};
pub use systems::{facing_rotation, label_scale, label_visible, ring_scale, update_billboards};

use crate::frame::FrameSystems;

/// Plugin for billboard facing, scaling and label overlays
pub struct BillboardPlugin;

impl Plugin for BillboardPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, update_billboards.in_set(FrameSystems::Billboard))
            .add_systems(
                PostUpdate,
                position_label_overlays.after(TransformSystems::Propagate),
            );
    }
}
