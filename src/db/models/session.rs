//! Session data models.
//!
//! A session is a group of readings captured together and summarised by one
//! average. Linked readings point back at it through `session_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reading::{BpValues, Reading};

/// Session row ready to be written. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    pub session_at: DateTime<Utc>,
    pub reading_count: u32,
    pub average: BpValues,
    pub photo_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub session_at: DateTime<Utc>,
    pub reading_count: u32,
    pub avg_systolic: Option<u32>,
    pub avg_diastolic: Option<u32>,
    pub avg_pulse: Option<u32>,
    pub photo_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A session together with its linked readings, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionWithReadings {
    #[serde(flatten)]
    pub session: Session,
    pub readings: Vec<Reading>,
}
