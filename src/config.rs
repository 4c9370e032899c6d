use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::utils;

pub const DEFAULT_DESCRIPTION_LIMIT: usize = 500;

/// What to do when the existing store file cannot be parsed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CorruptStorePolicy {
    /// Move the unreadable file aside and start a fresh list.
    #[default]
    Backup,
    /// Refuse to save until the file is fixed by hand.
    Fail,
}

impl CorruptStorePolicy {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "backup" => Some(CorruptStorePolicy::Backup),
            "fail" => Some(CorruptStorePolicy::Fail),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub store_path: Option<PathBuf>,
    pub on_corrupt_store: CorruptStorePolicy,
    pub description_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            on_corrupt_store: CorruptStorePolicy::default(),
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
        }
    }
}

impl AppConfig {
    /// Reads `config.json` from the data root, then applies `EVENT_FORM_*`
    /// overrides. A missing or broken file yields the defaults.
    pub fn load() -> Self {
        let path = utils::config_path();
        let mut config = match read_config(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring config at {:?}: {err}", path);
                AppConfig::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(store) = lookup("EVENT_FORM_STORE").filter(|s| !s.trim().is_empty()) {
            self.store_path = Some(PathBuf::from(store.trim()));
        }
        if let Some(raw) = lookup("EVENT_FORM_ON_CORRUPT") {
            match CorruptStorePolicy::parse(&raw) {
                Some(policy) => self.on_corrupt_store = policy,
                None => log::warn!("unknown EVENT_FORM_ON_CORRUPT value {raw:?}"),
            }
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(utils::default_store_path)
    }
}

pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
