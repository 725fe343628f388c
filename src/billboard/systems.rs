//! Camera-facing labels and decorative rings

use bevy::prelude::*;
use bevy::transform::helper::TransformHelper;

use crate::camera::MainCamera;
use crate::scene::{Billboard, SceneConfig};

/// Uniform label scale for a camera distance
pub fn label_scale(distance: f32, config: &SceneConfig) -> f32 {
    distance * config.label_scale_per_unit
}

/// Labels show only strictly above the minimum scale
pub fn label_visible(scale: f32, config: &SceneConfig) -> bool {
    scale > config.label_min_scale
}

/// Uniform decorative ring scale; never below `ring_min_scale` for d >= 0
pub fn ring_scale(distance: f32, config: &SceneConfig) -> f32 {
    distance * config.ring_scale_per_unit + config.ring_min_scale
}

/// World rotation turning local +Z from `position` toward `camera`
pub fn facing_rotation(position: Vec3, camera: Vec3) -> Quat {
    Transform::from_translation(position)
        .looking_to(position - camera, Vec3::Y)
        .rotation
}

struct BillboardUpdate {
    entity: Entity,
    rotation: Quat,
    scale: f32,
    visible: Option<bool>,
}

/// Face every billboard toward the main camera and rescale it by distance.
/// Label anchors are hidden when the camera is close.
///
/// Distance is measured to the billboard's world position (its planet), not
/// to the sun at the orbit group's origin.
pub fn update_billboards(
    config: Res<SceneConfig>,
    cameras: Query<&Transform, (With<MainCamera>, Without<Billboard>)>,
    billboards: Query<(Entity, &Billboard, Option<&ChildOf>)>,
    mut visibilities: Query<&mut Visibility, With<Billboard>>,
    mut params: ParamSet<(TransformHelper, Query<&mut Transform, With<Billboard>>)>,
) {
    let Ok(camera) = cameras.single() else {
        return;
    };
    let camera_position = camera.translation;

    let updates: Vec<BillboardUpdate> = {
        let helper = params.p0();
        billboards
            .iter()
            .filter_map(|(entity, kind, parent)| {
                let position = helper.compute_global_transform(entity).ok()?.translation();
                let parent_rotation = match parent {
                    Some(parent) => helper
                        .compute_global_transform(parent.parent())
                        .ok()?
                        .rotation(),
                    None => Quat::IDENTITY,
                };
                let distance = camera_position.distance(position);
                let (scale, visible) = match kind {
                    Billboard::Label => {
                        let scale = label_scale(distance, &config);
                        (scale, Some(label_visible(scale, &config)))
                    }
                    Billboard::DecorativeRing => (ring_scale(distance, &config), None),
                };
                let facing = facing_rotation(position, camera_position);
                Some(BillboardUpdate {
                    entity,
                    rotation: parent_rotation.inverse() * facing,
                    scale,
                    visible,
                })
            })
            .collect()
    };

    let mut transforms = params.p1();
    for update in updates {
        if let Ok(mut transform) = transforms.get_mut(update.entity) {
            transform.rotation = update.rotation;
            transform.scale = Vec3::splat(update.scale);
        }
        if let Some(visible) = update.visible
            && let Ok(mut visibility) = visibilities.get_mut(update.entity)
        {
            visibility.set_if_neq(if visible {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            });
        }
    }
}
