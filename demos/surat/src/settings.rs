//! Demo settings file.
//!
//! ```toml
//! log_level = "debug"
//! hospitals_csv = "hospitals.csv"
//!
//! [scenario]
//! seed = 7
//! ambulance_count = 3
//! ```
//!
//! Every key is optional.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use ed_dispatch::ScenarioConfig;

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub log_level: Option<String>,
    /// CSV of `name,lon,lat`; the fallback set is used if absent.
    pub hospitals_csv: Option<PathBuf>,
    pub scenario: ScenarioConfig,
}

impl Settings {
    /// Read `path`, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Settings> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read settings file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Could not parse settings file {}", path.display()))
    }
}
