/// Persisted settings
///
/// The settings record is a flat JSON object stored next to the process in
/// `media_organizer.json`. Every mutation is written through immediately.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the settings file, resolved against the working directory
pub const CONFIG_FILE_NAME: &str = "media_organizer.json";

/// Image extensions shown in the preview pane
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp"];

/// Video extensions, opened with the default application
pub const VIDEO_EXTENSIONS: &[&str] = &[
    ".mp4", ".avi", ".mov", ".mkv", ".wmv", ".flv", ".m4v", ".webm",
];

/// Every extension a folder listing keeps
pub fn supported_extensions() -> Vec<&'static str> {
    IMAGE_EXTENSIONS
        .iter()
        .chain(VIDEO_EXTENSIONS)
        .copied()
        .collect()
}

/// User settings
///
/// Each key falls back to its own default when it is missing or has the
/// wrong type: no root folder, non-recursive scans, deletions confirmed.
/// Only an unparsable document resets everything.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Root the folder scan starts from (empty = not chosen yet)
    #[serde(deserialize_with = "or_default")]
    pub main_folder: PathBuf,
    /// Scan the whole tree instead of the immediate subfolders
    #[serde(deserialize_with = "or_default")]
    pub recursive: bool,
    /// Delete without asking first
    #[serde(deserialize_with = "or_default")]
    pub skip_delete_confirmation: bool,
}

/// Accept any JSON value for a key, keeping the default if it doesn't fit
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl Settings {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The chosen root folder, if any
    pub fn root_folder(&self) -> Option<&Path> {
        if self.main_folder.as_os_str().is_empty() {
            None
        } else {
            Some(self.main_folder.as_path())
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse settings in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Failed to write settings to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Settings plus the file they live in
pub struct ConfigStore {
    path: PathBuf,
    settings: Settings,
}

impl ConfigStore {
    /// Open the settings file in the current working directory
    pub fn open_default() -> Self {
        Self::open(Self::default_path())
    }

    /// Where the settings file is expected by default
    pub fn default_path() -> PathBuf {
        match std::env::current_dir() {
            Ok(dir) => dir.join(CONFIG_FILE_NAME),
            Err(err) => {
                tracing::warn!("Cannot resolve working directory ({}), using relative path", err);
                PathBuf::from(CONFIG_FILE_NAME)
            }
        }
    }

    /// Open a settings file, falling back to defaults if it is missing or
    /// unreadable. Load problems are logged and never surfaced.
    pub fn open(path: PathBuf) -> Self {
        let settings = match Self::load(&path) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::info!("No settings at {}, using defaults", path.display());
                Settings::default()
            }
            Err(err) => {
                tracing::warn!("{}; using defaults", err);
                Settings::default()
            }
        };

        ConfigStore { path, settings }
    }

    /// Read and parse a settings file
    pub fn load(path: &Path) -> Result<Settings, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Settings::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overwrite the settings file with the current settings
    pub fn save(&self) -> Result<(), ConfigError> {
        let json = self.settings.to_json().map_err(ConfigError::Serialize)?;
        std::fs::write(&self.path, json).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_root_folder(&mut self, folder: PathBuf) {
        self.settings.main_folder = folder;
        self.persist();
    }

    pub fn set_recursive(&mut self, recursive: bool) {
        self.settings.recursive = recursive;
        self.persist();
    }

    pub fn set_skip_delete_confirmation(&mut self, skip: bool) {
        self.settings.skip_delete_confirmation = skip;
        self.persist();
    }

    // Save failures don't block the change; it stays in memory for this session.
    fn persist(&self) {
        if let Err(err) = self.save() {
            tracing::warn!("{}", err);
        }
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("path", &self.path)
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_has_no_root() {
        let settings = Settings::default();
        assert_eq!(settings.root_folder(), None);
        assert!(!settings.recursive);
        assert!(!settings.skip_delete_confirmation);
    }

    #[test]
    fn test_json_keys() {
        let settings = Settings {
            main_folder: PathBuf::from("/media/photos"),
            recursive: true,
            skip_delete_confirmation: false,
        };

        let value: serde_json::Value = serde_json::from_str(&settings.to_json().unwrap()).unwrap();

        assert_eq!(value["main_folder"], "/media/photos");
        assert_eq!(value["recursive"], true);
        assert_eq!(value["skip_delete_confirmation"], false);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let settings = Settings::from_json(r#"{ "recursive": true }"#).unwrap();

        assert_eq!(settings.root_folder(), None);
        assert!(settings.recursive);
        assert!(!settings.skip_delete_confirmation);
    }

    #[test]
    fn test_wrong_typed_key_keeps_other_settings() {
        let settings = Settings::from_json(
            r#"{ "main_folder": "/media/photos", "recursive": "yes", "skip_delete_confirmation": true }"#,
        )
        .unwrap();

        assert_eq!(settings.root_folder(), Some(Path::new("/media/photos")));
        assert!(!settings.recursive);
        assert!(settings.skip_delete_confirmation);
    }

    #[test]
    fn test_wrong_typed_key_survives_reopen_and_toggle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{ "main_folder": "/media/photos", "recursive": 1 }"#).unwrap();

        let mut store = ConfigStore::open(path.clone());
        assert_eq!(store.settings().root_folder(), Some(Path::new("/media/photos")));

        store.set_recursive(true);

        let reloaded = ConfigStore::load(&path).unwrap();
        assert_eq!(reloaded.root_folder(), Some(Path::new("/media/photos")));
        assert!(reloaded.recursive);
    }

    #[test]
    fn test_null_root_means_unset() {
        let settings = Settings::from_json(r#"{ "main_folder": null, "recursive": true }"#).unwrap();

        assert_eq!(settings.root_folder(), None);
        assert!(settings.recursive);
    }

    #[test]
    fn test_missing_file_opens_with_defaults() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::open(dir.path().join(CONFIG_FILE_NAME));

        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn test_corrupt_file_opens_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(ConfigStore::load(&path), Err(ConfigError::Parse { .. })));
        assert_eq!(ConfigStore::open(path).settings(), &Settings::default());
    }

    #[test]
    fn test_setters_write_through() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut store = ConfigStore::open(path.clone());
        store.set_root_folder(PathBuf::from("/media/photos"));
        store.set_recursive(true);
        store.set_skip_delete_confirmation(true);

        let reloaded = ConfigStore::load(&path).unwrap();
        assert_eq!(reloaded.root_folder(), Some(Path::new("/media/photos")));
        assert!(reloaded.recursive);
        assert!(reloaded.skip_delete_confirmation);
    }

    #[test]
    fn test_supported_extensions_is_union() {
        let all = supported_extensions();
        assert_eq!(all.len(), IMAGE_EXTENSIONS.len() + VIDEO_EXTENSIONS.len());
        assert!(all.contains(&".webp"));
        assert!(all.contains(&".m4v"));
    }
}
