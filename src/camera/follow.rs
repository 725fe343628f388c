//! Camera follow for the active planet

use bevy::prelude::*;
use bevy::transform::helper::TransformHelper;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::camera::MainCamera;
use crate::scene::{ActivePlanet, SceneConfig};

/// Orbit-camera pose relative to a focus point
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OrbitPose {
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl OrbitPose {
    /// Pose placing the camera at `focus + offset`. `None` for a zero offset.
    pub fn from_offset(offset: Vec3) -> Option<Self> {
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return None;
        }
        let direction = offset / radius;
        Some(Self {
            radius,
            yaw: direction.x.atan2(direction.z),
            pitch: direction.y.clamp(-1.0, 1.0).asin(),
        })
    }

    pub fn offset(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.pitch.cos() * self.yaw.sin(),
            self.radius * self.pitch.sin(),
            self.radius * self.pitch.cos() * self.yaw.cos(),
        )
    }
}

/// Camera position after one easing step toward `target + offset`.
pub fn follow_step(camera: Vec3, target: Vec3, offset: Vec3, factor: f32) -> Vec3 {
    camera.lerp(target + offset, factor)
}

/// Ease the camera toward the active planet and keep it looking at it.
///
/// Planet positions are computed from this frame's local transforms so the
/// camera matches what gets drawn. With several active planets the last one
/// processed wins.
pub fn follow_active_planet(
    config: Res<SceneConfig>,
    active: Query<Entity, With<ActivePlanet>>,
    mut params: ParamSet<(
        TransformHelper,
        Query<(&mut Transform, Option<&mut PanOrbitCamera>), With<MainCamera>>,
    )>,
) {
    if active.is_empty() {
        return;
    }

    let targets: Vec<Vec3> = {
        let helper = params.p0();
        active
            .iter()
            .filter_map(|entity| match helper.compute_global_transform(entity) {
                Ok(global) => Some(global.translation()),
                Err(err) => {
                    warn!("follow_active_planet: no world position for {entity}: {err}");
                    None
                }
            })
            .collect()
    };

    let mut cameras = params.p1();
    let Ok((mut transform, mut pan_orbit)) = cameras.single_mut() else {
        return;
    };

    for target in targets {
        let position = follow_step(
            transform.translation,
            target,
            config.follow_offset,
            config.follow_lerp,
        );
        *transform = Transform::from_translation(position).looking_at(target, Vec3::Y);

        // Keep PanOrbit's pose in sync so it neither fights the follow nor
        // jumps when following stops.
        if let Some(poc) = pan_orbit.as_deref_mut()
            && let Some(pose) = OrbitPose::from_offset(position - target)
        {
            poc.focus = target;
            poc.target_focus = target;
            poc.radius = Some(pose.radius);
            poc.target_radius = pose.radius;
            poc.yaw = Some(pose.yaw);
            poc.target_yaw = pose.yaw;
            poc.pitch = Some(pose.pitch);
            poc.target_pitch = pose.pitch;
            poc.force_update = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{OrbitGroup, PlanetBody};

    const EPSILON: f32 = 1e-4;

    #[test]
    fn one_step_covers_a_tenth_of_the_gap() {
        let p0 = Vec3::new(-3.0, 1.5, 4.0);
        let target = Vec3::new(10.0, 0.0, 5.0);
        let offset = Vec3::new(20.0, 0.0, 0.0);
        let p1 = target + offset;
        let next = follow_step(p0, target, offset, 0.1);
        assert!(next.distance(p0 + (p1 - p0) * 0.1) < EPSILON);
    }

    #[test]
    fn repeated_steps_converge_without_overshoot() {
        let target = Vec3::new(50.0, 0.0, -10.0);
        let offset = Vec3::new(20.0, 0.0, 0.0);
        let goal = target + offset;
        let mut camera = Vec3::new(-3.0, 1.5, 4.0);
        let mut last_gap = camera.distance(goal);
        for _ in 0..200 {
            let next = follow_step(camera, target, offset, 0.1);
            // Every step stays on the segment between the camera and the goal.
            let to_goal = goal - camera;
            let progress = (next - camera).dot(to_goal) / to_goal.length_squared();
            assert!((0.0..=1.0).contains(&progress));
            let gap = next.distance(goal);
            assert!(gap <= last_gap);
            last_gap = gap;
            camera = next;
        }
        assert!(last_gap < 1e-3);
    }

    #[test]
    fn orbit_pose_round_trips_offset() {
        for offset in [
            Vec3::new(20.0, 0.0, 0.0),
            Vec3::new(-3.0, 1.5, 4.0),
            Vec3::new(0.0, -7.0, 0.5),
        ] {
            let pose = OrbitPose::from_offset(offset).unwrap();
            assert!(pose.offset().distance(offset) < EPSILON, "{offset:?}");
        }
        assert!(OrbitPose::from_offset(Vec3::ZERO).is_none());
    }

    fn app_with_planet(active: bool) -> (App, Entity) {
        let mut app = App::new();
        app.init_resource::<SceneConfig>()
            .add_systems(Update, follow_active_planet);

        let world = app.world_mut();
        let group = world
            .spawn((
                Transform::from_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
                OrbitGroup::new(1.0),
            ))
            .id();
        let mut body = world.spawn((
            Transform::from_xyz(10.0, 0.0, 0.0),
            PlanetBody::new(0.01, 0.0),
            ChildOf(group),
        ));
        if active {
            body.insert(ActivePlanet);
        }
        let camera = world
            .spawn((Transform::from_xyz(0.0, 5.0, 30.0), MainCamera, PanOrbitCamera::default()))
            .id();
        (app, camera)
    }

    #[test]
    fn camera_eases_toward_active_planet_world_position() {
        let (mut app, camera) = app_with_planet(true);
        app.update();

        // The group's quarter turn moves the body from +X to -Z.
        let target = Vec3::new(0.0, 0.0, -10.0);
        let goal = target + Vec3::new(20.0, 0.0, 0.0);
        let start = Vec3::new(0.0, 5.0, 30.0);
        let expected = start + (goal - start) * 0.1;

        let world = app.world();
        let transform = world.get::<Transform>(camera).unwrap();
        assert!(transform.translation.distance(expected) < EPSILON);

        let facing = transform.forward().as_vec3();
        let wanted = (target - transform.translation).normalize();
        assert!(facing.dot(wanted) > 0.9999);

        let poc = world.get::<PanOrbitCamera>(camera).unwrap();
        assert!(poc.focus.distance(target) < EPSILON);
        let radius = poc.radius.unwrap();
        assert!((radius - transform.translation.distance(target)).abs() < EPSILON);
        let pose = OrbitPose {
            radius,
            yaw: poc.yaw.unwrap(),
            pitch: poc.pitch.unwrap(),
        };
        assert!((poc.focus + pose.offset()).distance(transform.translation) < 1e-3);
    }

    #[test]
    fn camera_untouched_without_active_planet() {
        let (mut app, camera) = app_with_planet(false);
        app.update();
        let transform = app.world().get::<Transform>(camera).unwrap();
        assert_eq!(transform.translation, Vec3::new(0.0, 5.0, 30.0));
    }
}
