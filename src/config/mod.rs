use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::{
    errors::{Result, TrackerError},
    utils::{ensure_dir, write_atomic, PathResolver},
};

/// User preferences persisted next to the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Custom location of the row store. Defaults to `<home>/data/tracker.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_file: Option<PathBuf>,
    #[serde(default)]
    pub plain_mode: bool,
    #[serde(default)]
    pub screen_reader_mode: bool,
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path).map_err(|err| {
            TrackerError::Config(format!("cannot read `{}`: {err}", self.path.display()))
        })?;
        serde_json::from_str(&data).map_err(|err| {
            TrackerError::Config(format!("`{}` is not valid: {err}", self.path.display()))
        })
    }

    /// Loads the config, writing the defaults out first when none exists yet.
    pub fn load_or_init(&self) -> Result<Config> {
        if self.path.exists() {
            return self.load();
        }
        let config = Config::default();
        self.save(&config)?;
        tracing::info!(path = %self.path.display(), "wrote default configuration");
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    /// Store location: the configured file (relative paths hang off the home
    /// directory) or the default under `data/`.
    pub fn resolved_store_path(&self, config: &Config) -> PathBuf {
        match &config.store_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.base.join(path),
            None => PathResolver::store_file_in(&self.base),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn first_run_writes_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        assert!(!manager.path().exists());
        let config = manager.load_or_init().expect("load");
        assert_eq!(config, Config::default());
        assert!(manager.path().exists());
    }

    #[test]
    fn saved_preferences_are_reloaded() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let config = Config {
            store_file: Some(PathBuf::from("books.json")),
            plain_mode: true,
            screen_reader_mode: false,
        };
        manager.save(&config).expect("save");
        assert_eq!(manager.load().expect("load"), config);
        assert_eq!(
            manager.resolved_store_path(&config),
            temp.path().join("books.json")
        );
    }

    #[test]
    fn default_store_lives_under_data() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        assert_eq!(
            manager.resolved_store_path(&Config::default()),
            temp.path().join("data").join("tracker.json")
        );
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        fs::write(manager.path(), "{ plain_mode: ").expect("write");
        assert!(matches!(manager.load(), Err(TrackerError::Config(_))));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        fs::write(manager.path(), r#"{ "plain_mode": true }"#).expect("write");
        let config = manager.load().expect("load");
        assert!(config.plain_mode);
        assert!(config.store_file.is_none());
    }
}
