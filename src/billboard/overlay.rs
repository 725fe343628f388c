//! Screen-space text for label anchors

use bevy::prelude::*;
use bevy::ui::ComputedNode;

use crate::camera::MainCamera;
use crate::scene::LabelOverlay;

/// Top-left corner that centres a node of logical `size` on `anchor`
pub fn centered_on(anchor: Vec2, size: Vec2) -> Vec2 {
    anchor - size / 2.0
}

/// Centre each overlay on its anchor's projected screen position. Overlays are
/// hidden while their anchor is hidden or off screen.
pub fn position_label_overlays(
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    anchors: Query<(&GlobalTransform, &Visibility), Without<LabelOverlay>>,
    mut overlays: Query<(
        &LabelOverlay,
        &mut Node,
        &mut Visibility,
        Option<&ComputedNode>,
    )>,
) {
    let camera = cameras.single().ok();

    for (overlay, mut node, mut visibility, computed) in &mut overlays {
        let screen = anchors
            .get(overlay.anchor)
            .ok()
            .filter(|(_, anchor_visibility)| **anchor_visibility != Visibility::Hidden)
            .and_then(|(anchor, _)| {
                let (camera, camera_transform) = camera?;
                camera
                    .world_to_viewport(camera_transform, anchor.translation())
                    .ok()
            });

        match screen {
            Some(position) => {
                // Size is unknown until the first layout pass.
                let size = computed
                    .map(|c| c.size() * c.inverse_scale_factor())
                    .unwrap_or(Vec2::ZERO);
                let corner = centered_on(position, size);
                node.left = Val::Px(corner.x);
                node.top = Val::Px(corner.y);
                visibility.set_if_neq(Visibility::Inherited);
            }
            None => {
                visibility.set_if_neq(Visibility::Hidden);
            }
        }
    }
}
