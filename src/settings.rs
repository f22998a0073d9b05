//! Persisted user preference
//!
//! The only thing remembered between runs is the colour theme, stored as
//! JSON next to the game.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default location of the settings file
pub const DEFAULT_SETTINGS_FILE: &str = "snake_garden.json";

/// Colour theme applied by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Green,
    Orange,
    Lilac,
}

impl Theme {
    /// The theme after this one, wrapping around
    pub fn next(self) -> Theme {
        match self {
            Theme::Green => Theme::Orange,
            Theme::Orange => Theme::Lilac,
            Theme::Lilac => Theme::Green,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Green => "green",
            Theme::Orange => "orange",
            Theme::Lilac => "lilac",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
}

impl Settings {
    /// Load settings, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse settings in {:?}", path))
    }

    /// Write settings, creating parent directories if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;
        Ok(())
    }
}
