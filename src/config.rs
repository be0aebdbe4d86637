//! Store configuration.

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Point balance a freshly signed-in member starts with.
    #[serde(default = "default_starting_points")]
    pub starting_points: u64,
    /// Capacity of the store event bus. Slow subscribers that fall more
    /// than this many events behind start lagging (tokio broadcast
    /// semantics) rather than blocking mutations.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_starting_points() -> u64 {
    2500
}

fn default_event_capacity() -> usize {
    64
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            starting_points: default_starting_points(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl StoreConfig {
    /// Load config from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }
}
