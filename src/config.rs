//! Configuration handling for the registration form

use crate::state::{Activity, Catalog, PaymentMethod, ShirtColor};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("activity id `{0}` is listed more than once")]
    DuplicateActivity(String),
    #[error("shirt color `{0}` is listed more than once")]
    DuplicateColor(String),
    #[error("activity `{0}` must cost more than $0")]
    FreeActivity(String),
    #[error("activity costs add up to more than ${max}", max = u32::MAX)]
    CostOverflow,
}

/// User configuration for the registration form
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RegistrationConfig {
    /// Replaces the built-in activity catalog
    pub activities: Option<Vec<Activity>>,
    /// Replaces the built-in shirt color catalog
    pub colors: Option<Vec<ShirtColor>>,
    /// Payment method selected when the form opens
    pub default_payment_method: Option<PaymentMethod>,
}

impl RegistrationConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "conference", "conference-registration")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Log file under the user's data directory
    pub fn log_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "conference", "conference-registration")
            .map(|dirs| dirs.data_dir().join("registration.log"))
    }

    /// Open `path` for appending, creating its directory first
    pub fn open_log_file(path: &Path) -> Result<fs::File, ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_error)?;
        }
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_error)
    }

    /// Load configuration from the user's config directory
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and check configuration from `path`
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: RegistrationConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.check()?;
        Ok(config)
    }

    /// Reject catalogs the form cannot tell entries apart in or total up
    fn check(&self) -> Result<(), ConfigError> {
        if let Some(activities) = &self.activities {
            let mut seen = HashSet::new();
            if let Some(dup) = activities.iter().find(|a| !seen.insert(a.id.as_str())) {
                return Err(ConfigError::DuplicateActivity(dup.id.clone()));
            }
            // A checked activity must move the total off zero
            if let Some(free) = activities.iter().find(|a| a.cost == 0) {
                return Err(ConfigError::FreeActivity(free.id.clone()));
            }
            activities
                .iter()
                .try_fold(0u32, |total, a| total.checked_add(a.cost))
                .ok_or(ConfigError::CostOverflow)?;
        }
        if let Some(colors) = &self.colors {
            let mut seen = HashSet::new();
            if let Some(dup) = colors.iter().find(|c| !seen.insert(c.value.as_str())) {
                return Err(ConfigError::DuplicateColor(dup.value.clone()));
            }
        }
        Ok(())
    }

    /// Catalogs to run against, falling back to the built-in lists
    pub fn catalog(&self) -> Catalog {
        let defaults = Catalog::default();
        Catalog {
            activities: self.activities.clone().unwrap_or(defaults.activities),
            colors: self.colors.clone().unwrap_or(defaults.colors),
        }
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.default_payment_method.unwrap_or_default()
    }
}
