use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::{Coordinates, Place, Units};

/// Location of the most recent successful lookup, kept so a unit switch can
/// refetch it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LastQuery {
    /// City text the user searched for, when the lookup was by name.
    pub city: Option<String>,

    /// Coordinates reported by the provider for the result.
    pub coords: Option<Coordinates>,
}

impl LastQuery {
    /// Coordinates win over city text when both are known.
    pub fn place(&self) -> Option<Place> {
        if let Some(coords) = self.coords {
            return Some(Place::Coords(coords));
        }
        self.city.clone().map(Place::City)
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,

    /// Preferred unit system; metric unless changed.
    #[serde(default)]
    pub units: Units,

    /// Example TOML:
    /// [last]
    /// city = "London"
    pub last: Option<LastQuery>,
}

impl Config {
    /// Returns the API key, if configured.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }

    /// Record a successful lookup for later unit switches.
    pub fn remember_query(&mut self, city: Option<String>, coords: Coordinates) {
        self.last = Some(LastQuery { city, coords: Some(coords) });
    }

    /// The place a unit switch should refetch, if any lookup succeeded yet.
    pub fn last_place(&self) -> Option<Place> {
        self.last.as_ref().and_then(LastQuery::place)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
