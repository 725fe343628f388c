//! APOD systems (request + drain).

use crate::apod::fetcher::start_apod_worker;
use crate::apod::types::{ApodChannels, ApodCommand, ApodConfig, ApodResult};
use anyhow::Result;
use bevy::prelude::*;

/// Start the worker and queue the single startup request
pub fn setup_apod_worker(mut commands: Commands, config: Res<ApodConfig>) {
    let channels = start_apod_worker();
    info!("APOD worker started");

    match build_apod_url(&config) {
        Ok(url) => {
            if let Err(err) = channels.cmd_tx.send(ApodCommand::Fetch { url }) {
                warn!("Failed to queue APOD fetch: {err}");
            }
        }
        Err(err) => warn!("Invalid APOD url: {err:#}"),
    }
    commands.insert_resource(channels);
}

/// Log whatever the worker produced. Nothing is applied to the scene.
pub fn drain_apod_results(channels: Option<Res<ApodChannels>>) {
    let Some(channels) = channels else { return };
    let Ok(guard) = channels.res_rx.lock() else {
        return;
    };

    while let Ok(msg) = guard.try_recv() {
        match msg {
            ApodResult::Entry(entry) => info!(
                "APOD {}: {} ({})",
                entry.date,
                entry.title,
                entry.media_type.as_deref().unwrap_or("unknown media")
            ),
            ApodResult::Error(error) => warn!("APOD unavailable: {error}"),
        }
    }
}

fn build_apod_url(config: &ApodConfig) -> Result<String> {
    let mut url = reqwest::Url::parse(&config.base_url)?;
    url.query_pairs_mut().append_pair("api_key", &config.api_key);
    Ok(url.to_string())
}
