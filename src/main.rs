use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::light::GlobalAmbientLight;
use bevy::picking::prelude::*;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

#[cfg(feature = "apod")]
mod apod;
mod billboard;
mod camera;
mod catalog;
mod frame;
mod motion;
mod scene;

#[cfg(feature = "apod")]
use apod::ApodPlugin;
use billboard::BillboardPlugin;
use camera::{CameraPlugin, MainCamera, OrbitPose};
use catalog::{PlanetCatalog, catalog_path_from_env};
use frame::FramePlugin;
use motion::MotionPlugin;
use scene::{ScenePlugin, Sun};

const SUN_RADIUS: f32 = 2.5;
const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(-3.0, 1.5, 4.0);

// Sun, light and camera. Planets are spawned by `ScenePlugin`.
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(GlobalAmbientLight {
        brightness: 150.0,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(SUN_RADIUS).mesh().uv(32, 32))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.8, 0.3),
            emissive: LinearRgba::rgb(8.0, 5.0, 1.5),
            unlit: true,
            ..default()
        })),
        Transform::default(),
        Sun,
        Name::new("Sun"),
        children![(
            PointLight {
                intensity: 5.0e8,
                range: 2_000.0,
                shadows_enabled: false,
                ..default()
            },
            Name::new("Sun Light"),
        )],
    ));

    // PanOrbit recomputes the transform from its pose, so seed the pose from
    // the starting position.
    let pose = OrbitPose::from_offset(INITIAL_CAMERA_POSITION).unwrap_or(OrbitPose {
        radius: 5.0,
        yaw: 0.0,
        pitch: 0.0,
    });
    let pan_orbit = PanOrbitCamera {
        focus: Vec3::ZERO,
        radius: Some(pose.radius),
        yaw: Some(pose.yaw),
        pitch: Some(pose.pitch),
        force_update: true,
        ..default()
    };

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 45_f32.to_radians(),
            near: 0.1,
            far: 20_000.0,
            ..default()
        }),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        pan_orbit,
        MainCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_translation(INITIAL_CAMERA_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Main Camera"),
    ));
}

fn main() -> anyhow::Result<()> {
    let catalog = PlanetCatalog::load(catalog_path_from_env())?;

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Bevy Orrery".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    app.add_plugins(PanOrbitCameraPlugin);
    app.add_plugins(MeshPickingPlugin);

    app.insert_resource(catalog);
    app.add_plugins(FramePlugin);
    app.add_plugins(ScenePlugin);
    app.add_plugins(MotionPlugin);
    app.add_plugins(CameraPlugin);
    app.add_plugins(BillboardPlugin);

    #[cfg(feature = "apod")]
    app.add_plugins(ApodPlugin);

    app.add_systems(Startup, setup);

    app.run();
    Ok(())
}
