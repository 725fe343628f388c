//! Catalog loading and validation
//!
//! Any problem with a required field is a fatal configuration error reported
//! before the app starts. Optional ring data is checked in `types`.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::types::PlanetCatalog;

pub const DEFAULT_CATALOG_PATH: &str = "assets/planets.json";
pub const CATALOG_ENV_VAR: &str = "ORRERY_CATALOG";

/// Catalog location, honouring the `ORRERY_CATALOG` override.
pub fn catalog_path_from_env() -> PathBuf {
    std::env::var_os(CATALOG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH))
}

impl PlanetCatalog {
    /// Read and validate a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read planet catalog {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("invalid planet catalog {}", path.display()))
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let catalog: PlanetCatalog = serde_json::from_str(contents)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check required geometry and the single-active-planet rule.
    pub fn validate(&self) -> Result<()> {
        for (index, planet) in self.planets.iter().enumerate() {
            if planet.name.trim().is_empty() {
                bail!("planet #{} has an empty name", index);
            }
            let numbers = [
                ("radius", planet.radius),
                ("distance_from_sun", planet.distance_from_sun),
                ("axial_tilt", planet.axial_tilt),
                ("rotation_speed", planet.rotation_speed),
                ("orbit_speed", planet.orbit_speed),
            ];
            for (field, value) in numbers {
                if !value.is_finite() {
                    bail!("planet {:?}: {} is not a finite number", planet.name, field);
                }
            }
            if planet.radius <= 0.0 {
                bail!(
                    "planet {:?}: radius must be positive, got {}",
                    planet.name,
                    planet.radius
                );
            }
            if planet.distance_from_sun < 0.0 {
                bail!(
                    "planet {:?}: distance_from_sun must not be negative, got {}",
                    planet.name,
                    planet.distance_from_sun
                );
            }
        }

        let active: Vec<&str> = self
            .planets
            .iter()
            .filter(|p| p.active)
            .map(|p| p.name.as_str())
            .collect();
        if active.len() > 1 {
            bail!(
                "at most one planet may be active, found {}: {}",
                active.len(),
                active.join(", ")
            );
        }
        Ok(())
    }

    /// Index of the planet marked active in the file, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.planets.iter().position(|p| p.active)
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }
}
