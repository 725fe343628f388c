use bevy::prelude::*;
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::{
    Arc, Mutex,
    mpsc::{Receiver, Sender},
};

pub const API_KEY_ENV_VAR: &str = "NASA_API_KEY";
pub const DEMO_API_KEY: &str = "DEMO_KEY";

/// Astronomy Picture of the Day entry
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ApodSummary {
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Resource, Debug, Clone)]
pub struct ApodConfig {
    pub base_url: String,
    pub api_key: String,
}

impl Default for ApodConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.nasa.gov/planetary/apod".to_string(),
            api_key: std::env::var(API_KEY_ENV_VAR)
                .ok()
                .filter(|key| !key.trim().is_empty())
                .unwrap_or_else(|| DEMO_API_KEY.to_string()),
        }
    }
}

#[derive(Resource)]
pub struct ApodChannels {
    pub cmd_tx: Sender<ApodCommand>,
    pub res_rx: Arc<Mutex<Receiver<ApodResult>>>,
}

pub enum ApodCommand {
    Fetch { url: String },
}

pub enum ApodResult {
    Entry(ApodSummary),
    Error(String),
}
