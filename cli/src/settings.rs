use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// User preferences, loaded at startup and saved on every change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Place newly created notes at the bottom of the list instead of
    /// the top
    #[serde(default)]
    pub add_new_at_bottom: bool,
    /// "system" or "dark"
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    "system".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            add_new_at_bottom: false,
            theme: default_theme(),
        }
    }
}

impl AppSettings {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(AppSettings::default());
        }

        let contents = fs::read_to_string(path).context("Failed to read settings file")?;
        let settings: Self = toml::from_str(&contents).context("Failed to deserialize settings")?;

        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string(self).context("Failed to serialize settings")?;
        fs::write(path, content).context("Failed to write settings")?;

        Ok(())
    }
}
