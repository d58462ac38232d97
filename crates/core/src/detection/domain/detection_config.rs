use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{
    DEFAULT_GROUP_WIDTH, DEFAULT_MIN_AREA, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("group width must be positive, got {0}")]
    InvalidGroupWidth(i32),
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Tunables for skin/hair face detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Grid cell side length in pixels.
    #[serde(default = "default_group_width")]
    pub group_width: i32,
    /// Minimum region size, in cells, for skin and hair regions alike.
    #[serde(default = "default_min_area")]
    pub min_area: usize,
}

fn default_group_width() -> i32 {
    DEFAULT_GROUP_WIDTH
}

fn default_min_area() -> usize {
    DEFAULT_MIN_AREA
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            group_width: DEFAULT_GROUP_WIDTH,
            min_area: DEFAULT_MIN_AREA,
        }
    }
}

impl DetectionConfig {
    pub fn new(group_width: i32, min_area: usize) -> Result<Self, ConfigError> {
        let config = Self {
            group_width,
            min_area,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.group_width <= 0 {
            return Err(ConfigError::InvalidGroupWidth(self.group_width));
        }
        Ok(())
    }

    /// Cell size as an index type. Only meaningful after `validate`.
    pub fn cell_size(&self) -> usize {
        self.group_width.max(1) as usize
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Loads the per-user config, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring user config: {e}");
                Self::default()
            }
        }
    }
}
