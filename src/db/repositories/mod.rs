mod readings;
mod sessions;

use anyhow::Result;
use async_trait::async_trait;

use super::{
    connection::Database,
    models::{NewReading, NewSession, Reading, Session},
    store::ReadingStore,
};

#[async_trait]
impl ReadingStore for Database {
    async fn insert_session(&self, record: &NewSession) -> Result<String> {
        Database::insert_session(self, record).await
    }

    async fn insert_readings(&self, records: &[NewReading]) -> Result<()> {
        Database::insert_readings(self, records).await.map(|_| ())
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        Database::delete_session(self, session_id).await
    }

    async fn delete_reading(&self, reading_id: &str) -> Result<()> {
        Database::delete_reading(self, reading_id).await
    }

    async fn list_sessions(&self, limit: usize) -> Result<Vec<Session>> {
        Database::list_sessions(self, limit).await
    }

    async fn list_standalone_readings(&self, limit: usize) -> Result<Vec<Reading>> {
        Database::list_standalone_readings(self, limit).await
    }

    async fn list_session_readings(&self, session_id: &str) -> Result<Vec<Reading>> {
        Database::get_readings_for_session(self, session_id).await
    }
}
