//! Session-scoped key/value storage over named string slots.
//!
//! `MemoryStore` lives as long as the process; `FileStore` keeps the slots in
//! a single JSON file so they survive between CLI invocations until cleared.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::errors::ScreenerError;

pub trait SessionStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, ScreenerError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ScreenerError>;
    fn remove(&mut self, key: &str) -> Result<(), ScreenerError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ScreenerError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ScreenerError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), ScreenerError> {
        self.slots.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> Result<HashMap<String, String>, ScreenerError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(slots) => Ok(slots),
            Err(e) => {
                warn!(
                    "Session file {} is unreadable ({e}); starting from an empty session",
                    self.path.display()
                );
                Ok(HashMap::new())
            }
        }
    }

    /// Writes via a sibling temp file + rename so readers never see a torn file.
    fn write_slots(&self, slots: &HashMap<String, String>) -> Result<(), ScreenerError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(slots)?)?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| ScreenerError::Store(format!("{}: {e}", self.path.display())))
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ScreenerError> {
        Ok(self.read_slots()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ScreenerError> {
        let mut slots = self.read_slots()?;
        slots.insert(key.to_string(), value.to_string());
        self.write_slots(&slots)
    }

    fn remove(&mut self, key: &str) -> Result<(), ScreenerError> {
        let mut slots = self.read_slots()?;
        if slots.remove(key).is_some() {
            self.write_slots(&slots)?;
        }
        Ok(())
    }
}
