use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// One JSON document per key in the app data directory. Writes serialize the
/// whole document; there is no partial write.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Resolves the platform data directory, or uses `override_home` (tests,
    /// portable installs) when given.
    pub fn open(override_home: Option<PathBuf>) -> Result<Self> {
        if let Some(home) = override_home {
            return Ok(Self {
                dir: home.join("data"),
            });
        }

        let proj = ProjectDirs::from("com", "monedero", "monedero")
            .context("Failed to resolve platform directories")?;

        Ok(Self {
            dir: proj.data_dir().to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Loads the document under `key`, falling back to `default` when the key
    /// is absent or its content does not parse. `migrate` runs on the raw
    /// JSON value before typed deserialization, upgrading older schemas.
    pub fn load<T>(&self, key: &str, default: T, migrate: Option<fn(Value) -> Value>) -> T
    where
        T: DeserializeOwned,
    {
        let path = self.path_for(key);
        let Ok(raw) = fs::read_to_string(&path) else {
            debug!(key, "no stored document, using default");
            return default;
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(err) => {
                warn!(key, %err, "stored document is not valid JSON, using default");
                return default;
            }
        };

        let value = match migrate {
            Some(f) => f(value),
            None => value,
        };

        match serde_json::from_value(value) {
            Ok(v) => v,
            Err(err) => {
                warn!(key, %err, "stored document has an unexpected shape, using default");
                default
            }
        }
    }

    /// Serializes the whole document and writes it under `key`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data dir {}", self.dir.display()))?;

        let path = self.path_for(key);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(key, "saved document");
        Ok(())
    }
}
