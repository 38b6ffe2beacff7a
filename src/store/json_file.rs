//! JSON-file store: the durable key/value document on disk.
//!
//! Every write rewrites the whole document through `<path>.tmp` + rename,
//! so a crash mid-write leaves the previous document in place. Inside a
//! batch, writes only touch memory and `commit` flushes them together.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{io_err, PilotError};
use crate::traits::DurableStore;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Bool(bool),
    Int(i64),
}

/// On-disk payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    pub saved_at: DateTime<Utc>,
    pub values: BTreeMap<String, StoredValue>,
}

impl StoreDocument {
    fn empty() -> Self {
        Self {
            saved_at: Utc::now(),
            values: BTreeMap::new(),
        }
    }
}

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    document: StoreDocument,
    batch: Batch,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Batch {
    Off,
    Open { pending: bool },
}

impl JsonFileStore {
    /// Open the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PilotError> {
        let path = path.into();
        let document = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
            serde_json::from_str(&contents)?
        } else {
            StoreDocument::empty()
        };
        Ok(Self {
            path,
            document,
            batch: Batch::Off,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &StoreDocument {
        &self.document
    }

    fn put(&mut self, key: &str, value: StoredValue) -> Result<(), PilotError> {
        self.document.values.insert(key.to_string(), value);
        self.changed()
    }

    fn changed(&mut self) -> Result<(), PilotError> {
        if let Batch::Open { pending } = &mut self.batch {
            *pending = true;
            return Ok(());
        }
        self.flush()
    }

    /// Write the document atomically.
    pub fn flush(&mut self) -> Result<(), PilotError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
        }

        self.document.saved_at = Utc::now();
        let json = serde_json::to_string_pretty(&self.document)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| io_err(&self.path, e))?;
        log::trace!("store flushed to {}", self.path.display());
        Ok(())
    }
}

impl DurableStore for JsonFileStore {
    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.document.values.get(key) {
            Some(StoredValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    fn set_bool(&mut self, key: &str, value: bool) -> Result<(), PilotError> {
        self.put(key, StoredValue::Bool(value))
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        match self.document.values.get(key) {
            Some(StoredValue::Int(i)) => Some(*i),
            _ => None,
        }
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), PilotError> {
        self.put(key, StoredValue::Int(value))
    }

    fn delete_key(&mut self, key: &str) -> Result<(), PilotError> {
        if self.document.values.remove(key).is_some() {
            self.changed()?;
        }
        Ok(())
    }

    fn begin_batch(&mut self) {
        if self.batch == Batch::Off {
            self.batch = Batch::Open { pending: false };
        }
    }

    fn commit(&mut self) -> Result<(), PilotError> {
        let batch = std::mem::replace(&mut self.batch, Batch::Off);
        match batch {
            Batch::Open { pending: true } => self.flush(),
            _ => Ok(()),
        }
    }
}
