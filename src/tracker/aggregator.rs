//! Turns a locked batch of raw readings into one persisted session.
//!
//! The session row is written first so linked readings can reference its id.
//! If the readings batch then fails, the session row is deleted again so the
//! store never holds a session without its readings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    analysis::average,
    db::{
        models::{validation, BpValues, NewReading, NewSession, RawReading, Session},
        ReadingStore,
    },
    error::{TrackerError, TrackerResult},
    log_info, log_warn,
};

const ENABLE_LOGS: bool = true;

/// Caller-provided metadata for a session save.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionMeta {
    pub timestamp: DateTime<Utc>,
    pub photo_ref: Option<String>,
    /// User-corrected average. Replaces the computed values but never the count.
    pub override_average: Option<RawReading>,
}

impl SessionMeta {
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }
}

/// Readings that take part in the session: complete and within the accepted ranges.
pub fn accepted_readings(readings: &[RawReading]) -> Vec<BpValues> {
    readings
        .iter()
        .filter_map(|raw| validation::validate_reading(raw).ok())
        .collect()
}

/// Validate, average and persist a session together with its linked readings.
///
/// Incomplete or out-of-range rows are dropped before averaging. The returned
/// session always has `reading_count` equal to the number of readings written.
/// `recorded_at` stamps `created_at` on every row written.
pub async fn save_session(
    store: &dyn ReadingStore,
    meta: &SessionMeta,
    readings: &[RawReading],
    recorded_at: DateTime<Utc>,
) -> TrackerResult<Session> {
    let accepted = accepted_readings(readings);
    if accepted.len() < readings.len() {
        log_warn!(
            "Dropping {} of {} session rows that are incomplete or out of range",
            readings.len() - accepted.len(),
            readings.len()
        );
    }

    let as_raw: Vec<RawReading> = accepted.iter().copied().map(RawReading::from).collect();
    let computed = average(&as_raw).ok_or(TrackerError::EmptySession)?;

    let effective = match &meta.override_average {
        Some(raw) => validation::validate_with(raw, |field, value| {
            TrackerError::InvalidOverride { field, value }
        })?,
        None => computed.values(),
    };

    let reading_count =
        u32::try_from(accepted.len()).map_err(|err| TrackerError::StoreWrite(err.into()))?;

    let record = NewSession {
        session_at: meta.timestamp,
        reading_count,
        average: effective,
        photo_ref: meta.photo_ref.clone(),
        created_at: recorded_at,
    };

    let session_id = store
        .insert_session(&record)
        .await
        .map_err(TrackerError::StoreWrite)?;

    let linked: Vec<NewReading> = accepted
        .iter()
        .map(|values| NewReading {
            values: *values,
            taken_at: meta.timestamp,
            session_id: Some(session_id.clone()),
            photo_ref: None,
            created_at: recorded_at,
        })
        .collect();

    if let Err(err) = store.insert_readings(&linked).await {
        if let Err(cleanup_err) = store.delete_session(&session_id).await {
            log::error!(
                "Failed to remove session {} after its readings were rejected: {:#}",
                session_id,
                cleanup_err
            );
        }
        return Err(TrackerError::StoreWrite(err));
    }

    log_info!(
        "Saved session {} with {} readings ({}/{} pulse {})",
        session_id,
        reading_count,
        effective.systolic,
        effective.diastolic,
        effective.pulse
    );

    Ok(Session {
        id: session_id,
        session_at: record.session_at,
        reading_count,
        avg_systolic: Some(effective.systolic),
        avg_diastolic: Some(effective.diastolic),
        avg_pulse: Some(effective.pulse),
        photo_ref: record.photo_ref,
        created_at: record.created_at,
    })
}
