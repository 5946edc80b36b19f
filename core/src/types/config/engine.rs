use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// User-facing engine configuration, persisted as settings.toml.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    #[serde(default)]
    pub image: ImageSettings,
    #[serde(default)]
    pub notify: NotifySettings,
}

impl EngineConfig {
    /// Returns the config file path within the given data directory.
    pub fn path(data_dir: &Path) -> std::path::PathBuf {
        data_dir.join("settings.toml")
    }

    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, EngineConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), EngineConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.image.width == 0 {
            errors.push("image.width must be at least 1".to_string());
        }

        if self.image.height == 0 {
            errors.push("image.height must be at least 1".to_string());
        }

        if self.notify.workers == 0 {
            errors.push("notify.workers must be at least 1".to_string());
        }

        errors
    }

    /// Returns a validated config, replacing invalid values with defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        let defaults = Self::default();
        Self {
            image: ImageSettings {
                width: if self.image.width == 0 {
                    defaults.image.width
                } else {
                    self.image.width
                },
                height: if self.image.height == 0 {
                    defaults.image.height
                } else {
                    self.image.height
                },
            },
            notify: NotifySettings {
                workers: if self.notify.workers == 0 {
                    defaults.notify.workers
                } else {
                    self.notify.workers
                },
            },
        }
    }
}

/// Target canvas for stored image payloads.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
        }
    }
}

/// Notification dispatch settings.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifySettings {
    /// Worker threads draining the notification queue.
    pub workers: usize,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self { workers: 2 }
    }
}

#[derive(Debug, Error)]
pub enum EngineConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
