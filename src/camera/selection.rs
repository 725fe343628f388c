//! Choosing which planet the camera follows

use bevy::prelude::*;

use crate::scene::{ActivePlanet, PlanetTable};

/// Change to the followed planet requested by input
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionRequest {
    /// Follow the planet at this catalog index
    Follow(usize),
    /// Stop following; the orbit camera takes over from its current pose
    Release,
}

/// Pending selection change, applied once per frame before motion runs
#[derive(Resource, Debug, Default)]
pub struct PlanetSelection {
    pending: Option<SelectionRequest>,
}

impl PlanetSelection {
    /// Queue a request. A later request in the same frame replaces it.
    pub fn request(&mut self, request: SelectionRequest) {
        self.pending = Some(request);
    }

    pub fn take(&mut self) -> Option<SelectionRequest> {
        self.pending.take()
    }
}

/// Escape stops following the active planet
pub fn release_follow_on_escape(
    input: Res<ButtonInput<KeyCode>>,
    mut selection: ResMut<PlanetSelection>,
) {
    if input.just_pressed(KeyCode::Escape) {
        selection.request(SelectionRequest::Release);
    }
}

/// Move the `ActivePlanet` marker according to the pending request
pub fn apply_planet_selection(
    mut commands: Commands,
    mut selection: ResMut<PlanetSelection>,
    table: Res<PlanetTable>,
    active: Query<(Entity, Option<&Name>), With<ActivePlanet>>,
    names: Query<&Name>,
) {
    let Some(request) = selection.take() else {
        return;
    };

    let target = match request {
        SelectionRequest::Follow(index) => match table.get(index) {
            Some(entry) => Some(entry.body),
            None => {
                warn!(
                    "Ignoring follow request for planet {index}: only {} planets",
                    table.len()
                );
                return;
            }
        },
        SelectionRequest::Release => None,
    };

    for (entity, name) in &active {
        if Some(entity) == target {
            continue;
        }
        commands.entity(entity).remove::<ActivePlanet>();
        info!("Stopped following {}", display_name(name, entity));
    }

    if let Some(body) = target
        && !active.contains(body)
    {
        commands.entity(body).insert(ActivePlanet);
        let index = table.index_of_body(body).unwrap_or_default();
        info!(
            "Following {} (planet {index})",
            display_name(names.get(body).ok(), body)
        );
    }
}

fn display_name(name: Option<&Name>, entity: Entity) -> String {
    name.map(|n| n.as_str().to_string())
        .unwrap_or_else(|| entity.to_string())
}
