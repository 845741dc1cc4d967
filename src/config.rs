//! Application settings persisted between sessions.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings file, kept in the working directory.
const SETTINGS_FILE: &str = "carprice_studio.json";

/// Default dataset location.
pub const DEFAULT_DATASET: &str = "car-prices.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
        }
    }
}

impl AppConfig {
    /// Load settings, falling back to defaults when the file is absent or
    /// malformed.
    pub fn load() -> Self {
        match std::fs::read_to_string(SETTINGS_FILE) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("ignoring malformed settings file: {e}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(SETTINGS_FILE, text).context("failed to write settings file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_the_bundled_dataset() {
        assert_eq!(
            AppConfig::default().dataset_path,
            PathBuf::from("car-prices.csv")
        );
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = AppConfig {
            dataset_path: PathBuf::from("/data/listings.csv"),
        };
        let text = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back.dataset_path, config.dataset_path);
    }
}
