use anyhow::{Context, Result};
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, to_i64, to_optional_u32, to_u32},
    models::{NewSession, Session},
};

fn row_to_session(row: &Row) -> Result<Session> {
    let session_at: String = row.get("session_at")?;
    let created_at: String = row.get("created_at")?;
    let reading_count: i64 = row.get("reading_count")?;

    Ok(Session {
        id: row.get("id")?,
        session_at: parse_datetime(&session_at, "session_at")?,
        reading_count: to_u32(reading_count, "reading_count")?,
        avg_systolic: to_optional_u32(row.get("avg_systolic")?, "avg_systolic")?,
        avg_diastolic: to_optional_u32(row.get("avg_diastolic")?, "avg_diastolic")?,
        avg_pulse: to_optional_u32(row.get("avg_pulse")?, "avg_pulse")?,
        photo_ref: row.get("photo_ref")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl Database {
    /// Insert a session summary and return the generated id.
    pub async fn insert_session(&self, session: &NewSession) -> Result<String> {
        let record = session.clone();
        self.execute(move |conn| {
            let id = Uuid::new_v4().to_string();
            conn.execute(
                "INSERT INTO bp_sessions (id, session_at, reading_count, avg_systolic, avg_diastolic, avg_pulse, photo_ref, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    id,
                    record.session_at.to_rfc3339(),
                    record.reading_count,
                    record.average.systolic,
                    record.average.diastolic,
                    record.average.pulse,
                    record.photo_ref,
                    record.created_at.to_rfc3339(),
                ],
            )
            .with_context(|| "failed to insert session")?;
            Ok(id)
        })
        .await
    }

    pub async fn get_session(&self, session_id: &str) -> Result<Option<Session>> {
        let session_id = session_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, session_at, reading_count, avg_systolic, avg_diastolic, avg_pulse, photo_ref, created_at
                 FROM bp_sessions
                 WHERE id = ?1",
            )?;

            let mut rows = stmt.query(params![session_id])?;
            let session = match rows.next()? {
                Some(row) => Some(row_to_session(row)?),
                None => None,
            };
            Ok(session)
        })
        .await
    }

    pub async fn list_sessions(&self, limit: usize) -> Result<Vec<Session>> {
        let limit = to_i64(limit)?;
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, session_at, reading_count, avg_systolic, avg_diastolic, avg_pulse, photo_ref, created_at
                 FROM bp_sessions
                 ORDER BY session_at DESC
                 LIMIT ?1",
            )?;

            let mut rows = stmt.query(params![limit])?;
            let mut sessions = Vec::new();
            while let Some(row) = rows.next()? {
                sessions.push(row_to_session(row)?);
            }

            Ok(sessions)
        })
        .await
    }

    /// Delete a session and its linked readings.
    ///
    /// Readings would also go through `ON DELETE CASCADE`; they are removed
    /// explicitly so the outcome does not depend on the foreign_keys pragma.
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        let session_id = session_id.to_string();
        self.execute(move |conn| {
            let tx = conn.transaction()?;

            tx.execute(
                "DELETE FROM bp_readings WHERE session_id = ?1",
                params![session_id],
            )?;

            // Already-gone sessions are fine: this also runs as a compensating action.
            tx.execute("DELETE FROM bp_sessions WHERE id = ?1", params![session_id])?;

            tx.commit()?;
            Ok(())
        })
        .await
    }
}
