//! JSON file store.
//!
//! Implements [`DocumentStore`] over `pet_data.json` and [`ConfigPort`]
//! over `settings.json`, both inside the data directory.  Saves overwrite
//! the whole file; the last writer wins.
//!
//! A missing document file, or one that is not JSON at all, loads as the
//! empty document.  Within a readable file, unreadable entries are dropped
//! one by one (see [`Document`]) and everything else is kept.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort, DocumentStore, StorageError};
use crate::config::PetConfig;
use crate::records::Document;

pub const DOCUMENT_FILE: &str = "pet_data.json";
pub const SETTINGS_FILE: &str = "settings.json";

pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Store rooted at `dir`.  The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn document_path(&self) -> PathBuf {
        self.dir.join(DOCUMENT_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(path, contents)
    }
}

impl DocumentStore for JsonStore {
    fn load(&self) -> Document {
        let path = self.document_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("JsonStore: no document at {}, starting empty", path.display());
                return Document::default();
            }
            Err(e) => {
                warn!("JsonStore: cannot read {} ({}), starting empty", path.display(), e);
                return Document::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("JsonStore: malformed {} ({}), starting empty", path.display(), e);
                Document::default()
            }
        }
    }

    fn save(&self, doc: &Document) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(doc).map_err(|_| StorageError::Serialize)?;
        self.write(&self.document_path(), &json).map_err(|e| {
            warn!("JsonStore: write failed: {}", e);
            StorageError::IoError
        })
    }
}

impl ConfigPort for JsonStore {
    fn load(&self) -> Result<PetConfig, ConfigError> {
        let path = self.settings_path();
        match fs::read_to_string(&path) {
            Ok(raw) => {
                let cfg: PetConfig =
                    serde_json::from_str(&raw).map_err(|_| ConfigError::Corrupted)?;
                cfg.validate()?;
                info!("JsonStore: loaded settings from {}", path.display());
                Ok(cfg)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("JsonStore: no stored settings, using defaults");
                Ok(PetConfig::default())
            }
            Err(_) => Err(ConfigError::IoError),
        }
    }

    fn save(&self, config: &PetConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config).map_err(|_| ConfigError::Corrupted)?;
        self.write(&self.settings_path(), &json)
            .map_err(|_| ConfigError::IoError)
    }
}
