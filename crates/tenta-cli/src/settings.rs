//! Settings persistence.
//!
//! Settings live in `settings.toml` in the platform config folder:
//! - macOS: ~/Library/Application Support/com.tenta.Tenta/
//! - Windows: %APPDATA%/tenta/Tenta/config/
//! - Linux: ~/.config/tenta/
//!
//! `--config PATH` points at another file.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use tenta_model::MergeOptions;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "tenta";
const APP_NAME: &str = "Tenta";
const CONFIG_FILENAME: &str = "settings.toml";

/// Settings file error.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize settings")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write settings file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not determine the settings folder")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, SettingsError>;

/// Everything `tenta` reads from its settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeSettings {
    /// Product collection used by `import`, `search`, `show`, `edit` and `backup`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,

    /// Folder for `backup` snapshots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,

    pub merge: MergeOptions,
}

impl MergeSettings {
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Path of the platform settings file, if the platform has a config folder.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `path`. A missing file yields the defaults.
pub fn load_settings_from(path: &Path) -> Result<MergeSettings> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let settings = toml::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
            info!(path = %path.display(), "loaded settings");
            Ok(settings)
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no settings file, using defaults");
            Ok(MergeSettings::default())
        }
        Err(source) => Err(SettingsError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load settings from an explicit file, or from the platform file.
///
/// An explicit file must exist; the platform file is optional.
pub fn load_settings(explicit: Option<&Path>) -> Result<MergeSettings> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        return load_settings_from(path);
    }
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => {
            tracing::warn!("could not determine settings path, using defaults");
            Ok(MergeSettings::default())
        }
    }
}

/// Save settings to `path`, creating its folder if needed.
pub fn save_settings_to(settings: &MergeSettings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let content = settings.to_toml()?;
    fs::write(path, content).map_err(|source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "saved settings");
    Ok(())
}

/// Save settings to the platform file.
pub fn save_settings(settings: &MergeSettings) -> Result<PathBuf> {
    let path = settings_path().ok_or(SettingsError::NoConfigDir)?;
    save_settings_to(settings, &path)?;
    Ok(path)
}
