//! Planet texture loading and late binding
//!
//! Textures are requested once at startup and never awaited. Meshes start with
//! a plain material in the planet color; once an image finishes loading it is
//! bound to the material. Failed loads keep the plain material.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::catalog::PlanetCatalog;

/// One handle per distinct texture path referenced by the catalog
#[derive(Resource, Debug, Default)]
pub struct PlanetTextures {
    handles: HashMap<String, Handle<Image>>,
}

impl PlanetTextures {
    /// Issue a load request for every distinct body, ring and ring-mask texture.
    pub fn load(asset_server: &AssetServer, catalog: &PlanetCatalog) -> Self {
        let mut textures = Self::default();
        for path in distinct_texture_paths(catalog) {
            textures.insert(path, asset_server.load(path.to_string()));
        }
        textures
    }

    pub fn insert(&mut self, path: &str, handle: Handle<Image>) {
        self.handles.insert(path.to_string(), handle);
    }

    pub fn get(&self, path: &str) -> Option<Handle<Image>> {
        self.handles.get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Texture paths in catalog order, without duplicates.
pub fn distinct_texture_paths(catalog: &PlanetCatalog) -> Vec<&str> {
    let mut paths: Vec<&str> = Vec::new();
    for planet in &catalog.planets {
        let ring = planet.rings.declared();
        let candidates = [
            planet.texture.as_deref(),
            ring.map(|r| r.texture.as_str()),
            ring.and_then(|r| r.mask_texture.as_deref()),
        ];
        for path in candidates.into_iter().flatten() {
            if !path.is_empty() && !paths.contains(&path) {
                paths.push(path);
            }
        }
    }
    paths
}

/// Texture waiting to be bound to the entity's material
#[derive(Component, Clone, Debug)]
pub struct PendingTexture {
    pub base: Handle<Image>,
    /// Transparency mask; its green channel becomes the base texture's alpha
    pub mask: Option<Handle<Image>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadProgress {
    Pending,
    Loaded,
    Failed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextureReadiness {
    Pending,
    Ready { masked: bool },
    Failed,
}

/// Decide whether a pending texture can be bound yet.
///
/// A failed mask does not block the base texture; a pending mask does.
pub fn texture_readiness(base: LoadProgress, mask: Option<LoadProgress>) -> TextureReadiness {
    match (base, mask) {
        (LoadProgress::Failed, _) => TextureReadiness::Failed,
        (LoadProgress::Pending, _) | (_, Some(LoadProgress::Pending)) => {
            TextureReadiness::Pending
        }
        (LoadProgress::Loaded, Some(LoadProgress::Loaded)) => {
            TextureReadiness::Ready { masked: true }
        }
        (LoadProgress::Loaded, _) => TextureReadiness::Ready { masked: false },
    }
}

fn load_progress(
    images: &Assets<Image>,
    asset_server: &AssetServer,
    handle: &Handle<Image>,
) -> LoadProgress {
    if images.get(handle).is_some() {
        return LoadProgress::Loaded;
    }
    match asset_server.get_load_state(handle.id()) {
        Some(bevy::asset::LoadState::Failed(_)) => LoadProgress::Failed,
        _ => LoadProgress::Pending,
    }
}

/// Copy of `base` whose alpha is multiplied by the mask's green channel.
/// The mask is sampled nearest-neighbour, so sizes need not match.
pub fn apply_alpha_mask(base: &Image, mask: &Image) -> anyhow::Result<Image> {
    let (width, height) = (base.width(), base.height());
    let (mask_width, mask_height) = (mask.width(), mask.height());
    if mask_width == 0 || mask_height == 0 {
        anyhow::bail!("mask image is empty");
    }

    let mut masked = base.clone();
    for y in 0..height {
        let my = (y as u64 * mask_height as u64 / height as u64) as u32;
        for x in 0..width {
            let mx = (x as u64 * mask_width as u64 / width as u64) as u32;
            let coverage = mask.get_color_at(mx, my)?.to_srgba().green;
            let mut color = base.get_color_at(x, y)?.to_srgba();
            color.alpha *= coverage;
            masked.set_color_at(x, y, Color::Srgba(color))?;
        }
    }
    Ok(masked)
}

/// Bind textures that finished loading to their placeholder materials.
///
/// The bound material is opaque white so only the texture (and its mask)
/// decide the final color and transparency.
pub fn bind_loaded_textures(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    query: Query<(
        Entity,
        &PendingTexture,
        &MeshMaterial3d<StandardMaterial>,
        Option<&Name>,
    )>,
) {
    for (entity, pending, material, name) in &query {
        let label = name.map(|n| n.as_str()).unwrap_or("unnamed mesh");
        let base = load_progress(&images, &asset_server, &pending.base);
        let mask = pending
            .mask
            .as_ref()
            .map(|m| load_progress(&images, &asset_server, m));

        match texture_readiness(base, mask) {
            TextureReadiness::Pending => continue,
            TextureReadiness::Failed => {
                warn!("Texture for {} failed to load; keeping plain material", label);
            }
            TextureReadiness::Ready { masked } => {
                let composited = if masked {
                    masked_texture(&images, pending, label)
                } else {
                    None
                };
                let texture = match composited {
                    Some(image) => images.add(image),
                    None => pending.base.clone(),
                };
                if let Some(mat) = materials.get_mut(&material.0) {
                    mat.base_color = Color::WHITE;
                    mat.base_color_texture = Some(texture);
                }
                debug!("Bound texture for {}", label);
            }
        }
        commands.entity(entity).remove::<PendingTexture>();
    }
}

fn masked_texture(images: &Assets<Image>, pending: &PendingTexture, label: &str) -> Option<Image> {
    let base = images.get(&pending.base)?;
    let mask = images.get(pending.mask.as_ref()?)?;
    match apply_alpha_mask(base, mask) {
        Ok(image) => Some(image),
        Err(err) => {
            warn!("Could not apply transparency mask for {}: {}", label, err);
            None
        }
    }
}
