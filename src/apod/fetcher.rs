//! APOD fetcher worker.

use crate::apod::types::{ApodChannels, ApodCommand, ApodResult, ApodSummary};
use anyhow::{Context, Result};
use bevy::log::{error, warn};
use std::sync::{
    Arc, Mutex,
    mpsc::{self},
};
use std::thread;

pub fn start_apod_worker() -> ApodChannels {
    let (cmd_tx, cmd_rx) = mpsc::channel::<ApodCommand>();
    let (res_tx, res_rx) = mpsc::channel::<ApodResult>();

    thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(err) => {
                error!("APOD worker could not start a tokio runtime: {err}");
                return;
            }
        };
        rt.block_on(async move {
            let client = reqwest::Client::new();

            while let Ok(cmd) = cmd_rx.recv() {
                let ApodCommand::Fetch { url } = cmd;
                let msg = match fetch_apod(&client, &url).await {
                    Ok(entry) => ApodResult::Entry(entry),
                    Err(err) => {
                        warn!("APOD fetch failed: {err:#}");
                        ApodResult::Error(format!("{err:#}"))
                    }
                };
                let _ = res_tx.send(msg);
            }
        });
    });

    ApodChannels {
        cmd_tx,
        res_rx: Arc::new(Mutex::new(res_rx)),
    }
}

async fn fetch_apod(client: &reqwest::Client, url: &str) -> Result<ApodSummary> {
    let resp = client.get(url).send().await?;
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        anyhow::bail!("HTTP {} from APOD", status);
    }
    parse_apod(&body)
}

pub fn parse_apod(body: &str) -> Result<ApodSummary> {
    serde_json::from_str(body).context("malformed APOD response")
}
