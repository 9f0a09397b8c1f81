use anyhow::{Context, Result};
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, to_i64, to_optional_u32},
    models::{NewReading, Reading},
};

fn row_to_reading(row: &Row) -> Result<Reading> {
    let taken_at: String = row.get("taken_at")?;
    let created_at: String = row.get("created_at")?;

    Ok(Reading {
        id: row.get("id")?,
        systolic: to_optional_u32(row.get("systolic")?, "systolic")?,
        diastolic: to_optional_u32(row.get("diastolic")?, "diastolic")?,
        pulse: to_optional_u32(row.get("pulse")?, "pulse")?,
        taken_at: parse_datetime(&taken_at, "taken_at")?,
        session_id: row.get("session_id")?,
        photo_ref: row.get("photo_ref")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl Database {
    /// Batch insert readings in one transaction.
    pub async fn insert_readings(&self, readings: &[NewReading]) -> Result<Vec<String>> {
        let readings = readings.to_vec();
        self.execute(move |conn| {
            let tx = conn.transaction()?;
            let mut ids = Vec::with_capacity(readings.len());

            for reading in &readings {
                let id = Uuid::new_v4().to_string();
                tx.execute(
                    "INSERT INTO bp_readings (
                        id,
                        session_id,
                        taken_at,
                        systolic,
                        diastolic,
                        pulse,
                        photo_ref,
                        created_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        id,
                        reading.session_id,
                        reading.taken_at.to_rfc3339(),
                        reading.values.systolic,
                        reading.values.diastolic,
                        reading.values.pulse,
                        reading.photo_ref,
                        reading.created_at.to_rfc3339(),
                    ],
                )
                .with_context(|| "failed to insert reading")?;
                ids.push(id);
            }

            tx.commit()?;
            Ok(ids)
        })
        .await
    }

    pub async fn list_standalone_readings(&self, limit: usize) -> Result<Vec<Reading>> {
        let limit = to_i64(limit)?;
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, session_id, taken_at, systolic, diastolic, pulse, photo_ref, created_at
                 FROM bp_readings
                 WHERE session_id IS NULL
                 ORDER BY taken_at DESC
                 LIMIT ?1",
            )?;

            let mut rows = stmt.query(params![limit])?;
            let mut readings = Vec::new();
            while let Some(row) = rows.next()? {
                readings.push(row_to_reading(row)?);
            }

            Ok(readings)
        })
        .await
    }

    pub async fn get_readings_for_session(&self, session_id: &str) -> Result<Vec<Reading>> {
        let session_id = session_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, session_id, taken_at, systolic, diastolic, pulse, photo_ref, created_at
                 FROM bp_readings
                 WHERE session_id = ?1
                 ORDER BY taken_at ASC, created_at ASC",
            )?;

            let mut rows = stmt.query(params![session_id])?;
            let mut readings = Vec::new();
            while let Some(row) = rows.next()? {
                readings.push(row_to_reading(row)?);
            }

            Ok(readings)
        })
        .await
    }

    pub async fn delete_reading(&self, reading_id: &str) -> Result<()> {
        let reading_id = reading_id.to_string();
        self.execute(move |conn| {
            conn.execute("DELETE FROM bp_readings WHERE id = ?1", params![reading_id])?;
            Ok(())
        })
        .await
    }
}
