//! Merged history: sessions and standalone readings behind one accessor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{reading::BpValues, Reading, Session};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Session,
    Single,
}

/// One point of history. Sessions report their averages and `session_at`,
/// single readings their own values and `taken_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HistoryEntry {
    Session(Session),
    Single(Reading),
}

fn present(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}

impl HistoryEntry {
    pub fn kind(&self) -> EntryKind {
        match self {
            HistoryEntry::Session(_) => EntryKind::Session,
            HistoryEntry::Single(_) => EntryKind::Single,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            HistoryEntry::Session(session) => &session.id,
            HistoryEntry::Single(reading) => &reading.id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            HistoryEntry::Session(session) => session.session_at,
            HistoryEntry::Single(reading) => reading.taken_at,
        }
    }

    pub fn systolic(&self) -> Option<u32> {
        present(match self {
            HistoryEntry::Session(session) => session.avg_systolic,
            HistoryEntry::Single(reading) => reading.systolic,
        })
    }

    pub fn diastolic(&self) -> Option<u32> {
        present(match self {
            HistoryEntry::Session(session) => session.avg_diastolic,
            HistoryEntry::Single(reading) => reading.diastolic,
        })
    }

    pub fn pulse(&self) -> Option<u32> {
        present(match self {
            HistoryEntry::Session(session) => session.avg_pulse,
            HistoryEntry::Single(reading) => reading.pulse,
        })
    }

    /// All three effective values, when every one is present.
    pub fn values(&self) -> Option<BpValues> {
        Some(BpValues {
            systolic: self.systolic()?,
            diastolic: self.diastolic()?,
            pulse: self.pulse()?,
        })
    }

    pub fn photo_ref(&self) -> Option<&str> {
        match self {
            HistoryEntry::Session(session) => session.photo_ref.as_deref(),
            HistoryEntry::Single(reading) => reading.photo_ref.as_deref(),
        }
    }
}

/// Merge sessions and standalone readings, newest first.
pub fn merge_history(sessions: Vec<Session>, readings: Vec<Reading>) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = sessions
        .into_iter()
        .map(HistoryEntry::Session)
        .chain(readings.into_iter().map(HistoryEntry::Single))
        .collect();

    entries.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    entries
}
