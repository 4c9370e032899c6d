use std::{fmt, io, path::PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Text fields that must be filled before a record is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    EventName,
    EventDescription,
}

impl RequiredField {
    pub fn prompt(self) -> &'static str {
        match self {
            RequiredField::EventName => "Please enter an event name",
            RequiredField::EventDescription => "Please enter an event description",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredField::EventName => f.write_str("event_name"),
            RequiredField::EventDescription => f.write_str("event_description"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a valid event list: {}", .path.display(), .source)]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("event encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("missing required field: {0}")]
    MissingField(RequiredField),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FormError {
    /// Message shown to the user when a submission is rejected.
    pub fn user_message(&self) -> String {
        match self {
            FormError::MissingField(field) => field.prompt().to_string(),
            FormError::Store(err) => format!("Failed to save event: {err}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config read failed: {0}")]
    Io(#[from] io::Error),
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}
