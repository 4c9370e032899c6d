use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde_json::{Map, Value};

use crate::config::{AppConfig, CorruptStorePolicy};
use crate::error::StoreError;
use crate::models::EventRecord;
use crate::utils;

type RawEvent = Map<String, Value>;

/// `events.json`: a pretty-printed JSON array of [`EventRecord`]s.
///
/// Appending reads the whole array and writes it back. Entries already in the
/// file are carried over as raw objects, so records written by other tools
/// survive untouched. There is no locking, so two processes saving at once
/// can drop one another's record.
#[derive(Debug, Clone)]
pub struct EventStore {
    path: PathBuf,
    policy: CorruptStorePolicy,
}

impl EventStore {
    pub fn open(path: impl Into<PathBuf>, policy: CorruptStorePolicy) -> Self {
        Self {
            path: path.into(),
            policy,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::open(config.store_path(), config.on_corrupt_store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record. Never touches the file, whatever the policy.
    pub fn load(&self) -> Result<Vec<EventRecord>, StoreError> {
        let raw: Vec<Value> = self.read_raw()?.into_iter().map(Value::Object).collect();
        serde_json::from_value(Value::Array(raw)).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Number of entries in the file. Only fails if it is not a JSON array of
    /// objects.
    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read_raw()?.len())
    }

    /// Adds `record` to the end of the list and rewrites the file.
    pub fn append(&self, record: &EventRecord) -> Result<usize, StoreError> {
        let mut events = match self.read_raw() {
            Ok(events) => events,
            Err(StoreError::Corrupt { source, .. })
                if self.policy == CorruptStorePolicy::Backup =>
            {
                let backup = self.backup_path();
                fs::rename(&self.path, &backup)
                    .map_err(|err| StoreError::io(&self.path, err))?;
                log::warn!(
                    "store {:?} was unreadable ({source}); moved it to {:?}",
                    self.path,
                    backup
                );
                Vec::new()
            }
            Err(err) => return Err(err),
        };

        let entry: RawEvent = serde_json::from_value(serde_json::to_value(record)?)?;
        events.push(entry);
        self.write_all(&events)?;
        Ok(events.len())
    }

    fn read_raw(&self) -> Result<Vec<RawEvent>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };

        let events: Vec<RawEvent> =
            serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        log::debug!("read {} events from {:?}", events.len(), self.path);
        Ok(events)
    }

    fn write_all(&self, events: &[RawEvent]) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(events)?;
        utils::ensure_parent(&self.path).map_err(|err| StoreError::io(&self.path, err))?;

        let staging = self.sibling("tmp");
        fs::write(&staging, contents).map_err(|err| StoreError::io(&staging, err))?;
        if let Err(err) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(StoreError::io(&self.path, err));
        }
        log::debug!("wrote {} events to {:?}", events.len(), self.path);
        Ok(())
    }

    fn backup_path(&self) -> PathBuf {
        self.sibling(&format!("corrupt-{}", Utc::now().format("%Y%m%dT%H%M%S%.3fZ")))
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "events.json".into());
        name.push(".");
        name.push(suffix);
        self.path.with_file_name(name)
    }
}
