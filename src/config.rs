use serde::{Deserialize, Serialize};

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::pedal::TriggerKeys;

const CONFIG_DIR: &str = "pedal-mapper";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Couldn't determine the configuration directory")]
    NoConfigDir,

    #[error("Couldn't access {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: Arc<io::Error>,
    },

    #[error("Invalid configuration {}: {}", .path.display(), .source)]
    Format {
        path: PathBuf,
        source: Arc<serde_json::Error>,
    },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub trigger_keys: TriggerKeys,
    #[serde(default)]
    pub midi_port: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            trigger_keys: ["shift", "numpad0"].into_iter().collect(),
            midi_port: String::new(),
        }
    }
}

/// Where the `Config` is persisted.
#[derive(Clone, Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    /// The store in the user's configuration directory.
    pub fn user() -> Result<Self, Error> {
        let dir = dirs::config_dir().ok_or(Error::NoConfigDir)?;

        Ok(Store::new(dir.join(CONFIG_DIR).join(CONFIG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the `Config`, using the defaults if none was saved yet.
    pub fn load(&self) -> Result<Config, Error> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", self.path.display());
                return Ok(Config::default());
            }
            Err(err) => return Err(self.io_err(err)),
        };

        let config = serde_json::from_str(&content).map_err(|err| Error::Format {
            path: self.path.clone(),
            source: Arc::new(err),
        })?;
        log::debug!("Loaded config from {}", self.path.display());

        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| self.io_err(err))?;
        }

        let content = serde_json::to_string_pretty(config).map_err(|err| Error::Format {
            path: self.path.clone(),
            source: Arc::new(err),
        })?;
        fs::write(&self.path, content).map_err(|err| self.io_err(err))?;
        log::debug!("Saved config to {}", self.path.display());

        Ok(())
    }

    fn io_err(&self, err: io::Error) -> Error {
        Error::Io {
            path: self.path.clone(),
            source: Arc::new(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, Error, Store};

    fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("nested").join("config.json"));

        (dir, store)
    }

    #[test]
    fn defaults_without_file() {
        let (_dir, store) = temp_store();
        let config = store.load().unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(
            config.trigger_keys.iter().collect::<Vec<_>>(),
            ["shift", "numpad0"]
        );
        assert!(config.midi_port.is_empty());
    }

    #[test]
    fn save_then_load() {
        let (_dir, store) = temp_store();
        let config = Config {
            trigger_keys: ["Numpad0", "a", "Shift_R"].into_iter().collect(),
            midi_port: "loopMIDI Port 1".to_string(),
        };

        store.save(&config).unwrap();
        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn file_format() {
        let (_dir, store) = temp_store();
        store.save(&Config::default()).unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "trigger_keys": ["shift", "numpad0"],
                "midi_port": ""
            })
        );
    }

    #[test]
    fn missing_fields() {
        let (_dir, store) = temp_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), r#"{ "midi_port": "Synth" }"#).unwrap();

        let config = store.load().unwrap();
        assert!(config.trigger_keys.is_empty());
        assert_eq!(config.midi_port, "Synth");
    }

    #[test]
    fn malformed() {
        let (_dir, store) = temp_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "trigger_keys = []").unwrap();

        match store.load().unwrap_err() {
            Error::Format { path, .. } => assert_eq!(path, store.path()),
            other => panic!("{other}"),
        }
    }
}
