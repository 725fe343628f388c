//! Entity table for the spawned planets

use bevy::prelude::*;

/// Entities spawned for one catalog entry
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetEntity {
    pub orbit_band: Entity,
    pub orbit_group: Entity,
    pub body: Entity,
    pub label: Entity,
    pub overlay: Entity,
    pub decorative_ring: Entity,
    /// Present iff the catalog declares well-formed rings
    pub rings: Option<Entity>,
}

/// One entry per catalog planet, in catalog order. Built once at startup.
#[derive(Resource, Debug, Default)]
pub struct PlanetTable {
    pub entries: Vec<PlanetEntity>,
}

impl PlanetTable {
    pub fn with_capacity(planets: usize) -> Self {
        Self {
            entries: Vec::with_capacity(planets),
        }
    }

    pub fn get(&self, index: usize) -> Option<&PlanetEntity> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Catalog index of the planet whose body is `entity`.
    pub fn index_of_body(&self, entity: Entity) -> Option<usize> {
        self.entries.iter().position(|e| e.body == entity)
    }
}
