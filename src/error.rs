use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ReadingField {
    Systolic,
    Diastolic,
    Pulse,
}

impl ReadingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingField::Systolic => "systolic",
            ReadingField::Diastolic => "diastolic",
            ReadingField::Pulse => "pulse",
        }
    }
}

impl fmt::Display for ReadingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures surfaced by the write path. Read-path computations never fail.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("no complete reading in range; nothing was saved")]
    EmptySession,

    #[error("override average {field} out of range: {value:?}")]
    InvalidOverride {
        field: ReadingField,
        value: Option<u32>,
    },

    #[error("reading {field} out of range: {value:?}")]
    InvalidReading {
        field: ReadingField,
        value: Option<u32>,
    },

    #[error("failed to write to reading store")]
    StoreWrite(#[source] anyhow::Error),

    #[error("failed to read from reading store")]
    StoreRead(#[source] anyhow::Error),
}

impl TrackerError {
    /// Validation errors are the caller's to fix; store errors may be retried.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TrackerError::EmptySession
                | TrackerError::InvalidOverride { .. }
                | TrackerError::InvalidReading { .. }
        )
    }

    /// Key for the single generic message shown to the user.
    pub fn label_key(&self) -> &'static str {
        if self.is_validation() {
            "entry.validationError"
        } else {
            "entry.saveError"
        }
    }
}

pub type TrackerResult<T> = std::result::Result<T, TrackerError>;
