use crate::error::ValidationError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name used for user-level and project-level config
pub const CONFIG_DIR: &str = ".userreg";

/// Configuration for the session journal
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct JournalConfig {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl JournalConfig {
    pub fn enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Journal directory, resolved against `root` when relative
    pub fn dir(&self, root: &Path) -> PathBuf {
        match &self.dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => root.join(dir),
            None => root.join(CONFIG_DIR).join("sessions"),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub journal: JournalConfig,
}

impl Config {
    /// Load configuration from default paths
    /// Priority: local (.userreg/config.local.toml) > project (.userreg/config.toml) > user (~/.userreg/config.toml)
    pub fn load() -> Result<Self> {
        Self::load_layered(dirs::home_dir().as_deref(), Path::new("."))
    }

    /// Load and merge the user, project and local config files found under
    /// `home` and `root`. Missing files are skipped.
    pub fn load_layered(home: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let mut layers = Vec::new();
        if let Some(home) = home {
            layers.push(home.join(CONFIG_DIR).join("config.toml"));
        }
        layers.push(root.join(CONFIG_DIR).join("config.toml"));
        // Should be gitignored
        layers.push(root.join(CONFIG_DIR).join("config.local.toml"));

        for path in layers {
            if path.exists() {
                let layer = Self::load_from(&path)?;
                config.merge(layer);
            }
        }

        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes priority for every
    /// field it sets)
    pub fn merge(&mut self, other: Config) {
        if other.journal.enabled.is_some() {
            self.journal.enabled = other.journal.enabled;
        }
        if other.journal.dir.is_some() {
            self.journal.dir = other.journal.dir;
        }
    }

    /// Validate configuration and return any errors found
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.journal.enabled() {
            if let Some(dir) = &self.journal.dir {
                if dir.as_os_str().is_empty() {
                    errors.push(ValidationError::new(
                        "journal.dir",
                        "Must not be empty when the journal is enabled",
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
