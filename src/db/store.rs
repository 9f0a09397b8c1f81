//! Persistence collaborator consumed by the tracker.
//!
//! The tracker only needs success or failure from these calls; query language
//! and wire format stay behind the implementation. `Database` is the SQLite
//! implementation shipped with the crate.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{NewReading, NewSession, Reading, Session};

#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Persist a session summary and return its store-assigned id.
    async fn insert_session(&self, record: &NewSession) -> Result<String>;

    /// Persist a batch of readings. Either every record is written or none.
    async fn insert_readings(&self, records: &[NewReading]) -> Result<()>;

    /// Remove a session and the readings linked to it. Missing ids are not an error.
    async fn delete_session(&self, session_id: &str) -> Result<()>;

    async fn delete_reading(&self, reading_id: &str) -> Result<()>;

    /// Newest sessions first.
    async fn list_sessions(&self, limit: usize) -> Result<Vec<Session>>;

    /// Newest readings without a session first.
    async fn list_standalone_readings(&self, limit: usize) -> Result<Vec<Reading>>;

    /// Readings linked to one session, oldest first.
    async fn list_session_readings(&self, session_id: &str) -> Result<Vec<Reading>>;
}
