//! Scene construction: one entity graph per catalog planet
//!
//! ```text
//! orbit band (root, orbital plane)
//! orbit group (root, pivots at the sun)
//! └── body (tilted sphere at the orbit radius)
//!     ├── label anchor
//!     ├── rings (optional)
//!     └── decorative ring
//! label overlay (UI text tracking the anchor)
//! ```

use bevy::picking::events::{Click, Pointer};
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::camera::{PlanetSelection, SelectionRequest};
use crate::catalog::{PlanetCatalog, PlanetDef, RingDef, RingSpec};
use crate::scene::components::{
    ActivePlanet, Billboard, LabelOverlay, OrbitBand, OrbitGroup, PlanetBody, PlanetId,
    PlanetLabel, RingSystem,
};
use crate::scene::config::SceneConfig;
use crate::scene::resources::{PlanetEntity, PlanetTable};
use crate::scene::ring_mesh::{planet_ring_mesh, ring_mesh};
use crate::scene::textures::{PendingTexture, PlanetTextures};

const DECORATIVE_RING_INNER: f32 = 1.25;
const DECORATIVE_RING_OUTER: f32 = 1.5;
const ORBIT_BAND_SEGMENTS: (u32, u32) = (128, 32);
const RING_SEGMENTS: (u32, u32) = (64, 32);
const BODY_SECTORS: u32 = 32;
const BODY_STACKS: u32 = 32;
const RING_PLACEHOLDER_ALPHA: f32 = 0.6;

/// Startup system: request every catalog texture
pub fn load_planet_textures(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    catalog: Res<PlanetCatalog>,
) {
    let textures = PlanetTextures::load(&asset_server, &catalog);
    info!("Requested {} planet textures", textures.len());
    commands.insert_resource(textures);
}

/// Startup system: spawn all planets and record them in the `PlanetTable`
pub fn spawn_planets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    catalog: Res<PlanetCatalog>,
    textures: Res<PlanetTextures>,
    config: Res<SceneConfig>,
) {
    let decorative_ring = meshes.add(ring_mesh(
        DECORATIVE_RING_INNER,
        DECORATIVE_RING_OUTER,
        RING_SEGMENTS.0,
        RING_SEGMENTS.1,
    ));
    let mut assets = SceneAssets {
        meshes: &mut *meshes,
        materials: &mut *materials,
        textures: &*textures,
        decorative_ring,
    };

    if catalog.is_empty() {
        warn!("Planet catalog is empty; only the sun will be shown");
    }
    if let Some(def) = catalog.active_index().and_then(|i| catalog.planets.get(i)) {
        info!("Camera follows {} from startup", def.name);
    }

    let mut table = PlanetTable::with_capacity(catalog.len());
    for (index, def) in catalog.planets.iter().enumerate() {
        let entry = spawn_planet(&mut commands, &mut assets, &config, index, def);
        table.entries.push(entry);
    }

    info!(
        "Spawned {} planets ({} with rings)",
        table.len(),
        table.entries.iter().filter(|e| e.rings.is_some()).count()
    );
    commands.insert_resource(table);
}

struct SceneAssets<'a> {
    meshes: &'a mut Assets<Mesh>,
    materials: &'a mut Assets<StandardMaterial>,
    textures: &'a PlanetTextures,
    decorative_ring: Handle<Mesh>,
}

fn spawn_planet(
    commands: &mut Commands,
    assets: &mut SceneAssets,
    config: &SceneConfig,
    index: usize,
    def: &PlanetDef,
) -> PlanetEntity {
    let id = PlanetId(index);
    let orbit_radius = def.distance_from_sun * config.distance_scale;
    let body_radius = def.radius * config.size_scale;
    let band_half_width = config.orbit_band_thickness * body_radius;

    let orbit_band = commands
        .spawn((
            Mesh3d(assets.meshes.add(ring_mesh(
                (orbit_radius - band_half_width).max(0.0),
                orbit_radius + band_half_width,
                ORBIT_BAND_SEGMENTS.0,
                ORBIT_BAND_SEGMENTS.1,
            ))),
            MeshMaterial3d(assets.materials.add(flat_material(def.color))),
            Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
            OrbitBand,
            id,
            Name::new(format!("{} Orbit", def.name)),
        ))
        .id();

    let orbit_group = commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            OrbitGroup::new(def.orbit_speed),
            id,
            Name::new(format!("{} Orbit Group", def.name)),
        ))
        .id();

    let body_state = PlanetBody::new(def.rotation_speed, def.axial_tilt);
    let body_transform =
        Transform::from_xyz(orbit_radius, 0.0, 0.0).with_rotation(body_state.rotation());
    let mut body_commands = commands.spawn((
        Mesh3d(
            assets
                .meshes
                .add(Sphere::new(body_radius).mesh().uv(BODY_SECTORS, BODY_STACKS)),
        ),
        MeshMaterial3d(assets.materials.add(StandardMaterial {
            base_color: def.color,
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        })),
        body_transform,
        body_state,
        id,
        ChildOf(orbit_group),
        Name::new(def.name.clone()),
    ));
    if let Some(base) = def.texture.as_deref().and_then(|p| assets.textures.get(p)) {
        body_commands.insert(PendingTexture { base, mask: None });
    }
    if def.active {
        body_commands.insert(ActivePlanet);
    }
    body_commands.observe(
        move |mut click: On<Pointer<Click>>, mut selection: ResMut<PlanetSelection>| {
            selection.request(SelectionRequest::Follow(index));
            click.propagate(false);
        },
    );
    let body = body_commands.id();

    let label_text = PlanetLabel {
        text: def.name.clone(),
        color: def.color,
    };
    let overlay_text = (
        Text::new(label_text.text.clone()),
        TextColor(label_text.color),
    );
    let label = commands
        .spawn((
            Transform::default(),
            Visibility::Hidden,
            Billboard::Label,
            label_text,
            id,
            ChildOf(body),
            Name::new(format!("{} Label", def.name)),
        ))
        .id();

    let overlay = commands
        .spawn((
            overlay_text,
            TextFont::from_font_size(config.label_font_size),
            Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
            LabelOverlay { anchor: label },
            id,
            Name::new(format!("{} Label Overlay", def.name)),
        ))
        .observe(
            move |mut click: On<Pointer<Click>>, mut selection: ResMut<PlanetSelection>| {
                selection.request(SelectionRequest::Follow(index));
                click.propagate(false);
            },
        )
        .id();

    let rings = match &def.rings {
        RingSpec::Declared(ring) => {
            Some(spawn_rings(commands, assets, config, id, body, def, ring))
        }
        RingSpec::Malformed(reason) => {
            warn!("Skipping rings for {}: {}", def.name, reason);
            None
        }
        RingSpec::None => None,
    };

    let decorative_ring = commands
        .spawn((
            Mesh3d(assets.decorative_ring.clone()),
            MeshMaterial3d(assets.materials.add(flat_material(def.color))),
            Transform::default(),
            Billboard::DecorativeRing,
            id,
            ChildOf(body),
            Name::new(format!("{} Marker Ring", def.name)),
        ))
        .id();

    PlanetEntity {
        orbit_band,
        orbit_group,
        body,
        label,
        overlay,
        decorative_ring,
        rings,
    }
}

fn spawn_rings(
    commands: &mut Commands,
    assets: &mut SceneAssets,
    config: &SceneConfig,
    id: PlanetId,
    body: Entity,
    def: &PlanetDef,
    ring: &RingDef,
) -> Entity {
    let mesh = planet_ring_mesh(
        ring.inner_radius * config.size_scale,
        ring.outer_radius * config.size_scale,
        RING_SEGMENTS.0,
        RING_SEGMENTS.1,
    );
    let mut ring_commands = commands.spawn((
        Mesh3d(assets.meshes.add(mesh)),
        MeshMaterial3d(assets.materials.add(StandardMaterial {
            base_color: def.color.with_alpha(RING_PLACEHOLDER_ALPHA),
            alpha_mode: AlphaMode::Blend,
            perceptual_roughness: 1.0,
            metallic: 0.0,
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
        RingSystem,
        id,
        ChildOf(body),
        Name::new(format!("{} Rings", def.name)),
    ));
    if let Some(base) = assets.textures.get(&ring.texture) {
        let mask = ring
            .mask_texture
            .as_deref()
            .and_then(|p| assets.textures.get(p));
        ring_commands.insert(PendingTexture { base, mask });
    }
    ring_commands.id()
}

/// Unlit, double-sided material for orbit bands and marker rings
fn flat_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RingDef;
    use bevy::mesh::VertexAttributeValues;

    fn planet(name: &str, distance_km: f32, rings: RingSpec, active: bool) -> PlanetDef {
        PlanetDef {
            name: name.to_string(),
            color: Color::srgb(0.2, 0.4, 0.8),
            radius: 6371.0,
            distance_from_sun: distance_km,
            axial_tilt: 23.44,
            rotation_speed: 0.02,
            orbit_speed: 1.0,
            active,
            texture: Some(format!("textures/{}.jpg", name.to_lowercase())),
            rings,
        }
    }

    fn saturn_rings() -> RingSpec {
        RingSpec::Declared(RingDef {
            inner_radius: 74500.0,
            outer_radius: 140220.0,
            texture: "textures/saturn_ring.png".to_string(),
            mask_texture: Some("textures/saturn_ring_alpha.png".to_string()),
        })
    }

    fn build(catalog: PlanetCatalog, textures: PlanetTextures) -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<SceneConfig>()
            .insert_resource(textures)
            .insert_resource(catalog)
            .add_systems(Startup, spawn_planets);
        app.update();
        app
    }

    fn sample_catalog() -> PlanetCatalog {
        PlanetCatalog {
            planets: vec![
                planet("Mercury", 5.79e7, RingSpec::None, false),
                planet("Saturn", 1.432e9, saturn_rings(), true),
                planet(
                    "Uranus",
                    2.867e9,
                    RingSpec::Malformed("missing ring data".to_string()),
                    false,
                ),
            ],
        }
    }

    #[test]
    fn one_entity_graph_per_planet_in_catalog_order() {
        let mut app = build(sample_catalog(), PlanetTextures::default());
        let world = app.world_mut();
        let table = world.resource::<PlanetTable>();
        assert_eq!(table.len(), 3);
        let entries = table.entries.clone();

        for (index, entry) in entries.iter().enumerate() {
            for entity in [
                entry.orbit_band,
                entry.orbit_group,
                entry.body,
                entry.label,
                entry.overlay,
                entry.decorative_ring,
            ] {
                assert_eq!(world.get::<PlanetId>(entity), Some(&PlanetId(index)));
            }
            assert_eq!(
                world.get::<ChildOf>(entry.body).map(|c| c.parent()),
                Some(entry.orbit_group)
            );
            assert_eq!(
                world.get::<ChildOf>(entry.label).map(|c| c.parent()),
                Some(entry.body)
            );
            assert_eq!(
                world.get::<LabelOverlay>(entry.overlay).map(|o| o.anchor),
                Some(entry.label)
            );
        }

        let names: Vec<_> = entries
            .iter()
            .map(|e| world.get::<Name>(e.body).unwrap().as_str().to_string())
            .collect();
        assert_eq!(names, vec!["Mercury", "Saturn", "Uranus"]);
    }

    #[test]
    fn ring_mesh_only_for_declared_rings() {
        let mut app = build(sample_catalog(), PlanetTextures::default());
        let world = app.world_mut();
        let table = world.resource::<PlanetTable>();
        let rings: Vec<_> = table.entries.iter().map(|e| e.rings).collect();
        assert!(rings[0].is_none());
        let saturn_rings = rings[1].expect("Saturn has rings");
        assert!(rings[2].is_none());

        assert!(world.get::<RingSystem>(saturn_rings).is_some());
        let count = world.query::<&RingSystem>().iter(world).count();
        assert_eq!(count, 1);
    }

    #[test]
    fn body_is_placed_on_scaled_orbit_with_tilt() {
        let mut app = build(sample_catalog(), PlanetTextures::default());
        let world = app.world_mut();
        let body = world.resource::<PlanetTable>().entries[0].body;
        let transform = world.get::<Transform>(body).unwrap();
        assert!((transform.translation.x - 5.79).abs() < 1e-4);
        assert_eq!(transform.translation.y, 0.0);

        let expected = Quat::from_rotation_x(23.44_f32.to_radians());
        assert!(transform.rotation.angle_between(expected) < 1e-5);
    }

    #[test]
    fn catalog_active_flag_marks_body() {
        let mut app = build(sample_catalog(), PlanetTextures::default());
        let world = app.world_mut();
        let saturn = world.resource::<PlanetTable>().entries[1].body;
        let active: Vec<Entity> = world
            .query_filtered::<Entity, With<ActivePlanet>>()
            .iter(world)
            .collect();
        assert_eq!(active, vec![saturn]);
    }

    #[test]
    fn known_textures_become_pending_bindings() {
        let mut textures = PlanetTextures::default();
        textures.insert("textures/saturn.jpg", Handle::default());
        textures.insert("textures/saturn_ring.png", Handle::default());
        textures.insert("textures/saturn_ring_alpha.png", Handle::default());

        let mut app = build(sample_catalog(), textures);
        let world = app.world_mut();
        let entries = world.resource::<PlanetTable>().entries.clone();

        assert!(world.get::<PendingTexture>(entries[0].body).is_none());
        assert!(world.get::<PendingTexture>(entries[1].body).is_some());
        let ring = world
            .get::<PendingTexture>(entries[1].rings.unwrap())
            .expect("ring texture pending");
        assert!(ring.mask.is_some());
    }

    #[test]
    fn empty_catalog_spawns_nothing() {
        let mut app = build(PlanetCatalog::default(), PlanetTextures::default());
        let world = app.world_mut();
        assert!(world.resource::<PlanetTable>().is_empty());
        assert_eq!(world.query::<&PlanetBody>().iter(world).count(), 0);
    }

    /// Vertex count and (min, max) distance from the mesh origin
    fn mesh_extent(world: &World, entity: Entity) -> (usize, f32, f32) {
        let handle = &world.get::<Mesh3d>(entity).unwrap().0;
        let mesh = world.resource::<Assets<Mesh>>().get(handle).unwrap();
        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("ring mesh has no positions");
        };
        let radii = positions.iter().map(|p| Vec3::from(*p).length());
        let min = radii.clone().fold(f32::INFINITY, f32::min);
        let max = radii.fold(0.0, f32::max);
        (positions.len(), min, max)
    }

    #[test]
    fn orbit_bands_and_rings_use_scaled_radii() {
        let mut catalog = sample_catalog();
        catalog.planets.push(planet("Vulcan", 0.0, RingSpec::None, false));
        let mut app = build(catalog, PlanetTextures::default());
        let world = app.world_mut();
        let entries = world.resource::<PlanetTable>().entries.clone();

        let band_vertices = (128 + 1) * (32 + 1);
        let half_width = 0.5 * 6371.0 * 1e-4;

        let (count, min, max) = mesh_extent(world, entries[0].orbit_band);
        assert_eq!(count, band_vertices);
        assert!((min - (5.79 - half_width)).abs() < 1e-3, "inner {min}");
        assert!((max - (5.79 + half_width)).abs() < 1e-3, "outer {max}");

        // A band at the sun is clamped to a disc instead of a negative radius.
        let (count, min, max) = mesh_extent(world, entries[3].orbit_band);
        assert_eq!(count, band_vertices);
        assert!(min.abs() < 1e-6);
        assert!((max - half_width).abs() < 1e-4);

        let (count, min, max) = mesh_extent(world, entries[1].rings.unwrap());
        assert_eq!(count, (64 + 1) * (32 + 1));
        assert!((min - 7.45).abs() < 1e-3, "inner {min}");
        assert!((max - 14.022).abs() < 1e-3, "outer {max}");

        let (_, min, max) = mesh_extent(world, entries[0].decorative_ring);
        assert!((min - 1.25).abs() < 1e-5);
        assert!((max - 1.5).abs() < 1e-5);
    }
}
