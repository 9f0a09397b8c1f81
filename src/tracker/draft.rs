use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    analysis::average,
    db::models::{Average, RawReading},
};

use super::aggregator::SessionMeta;

pub const DEFAULT_MAX_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DraftRow {
    pub reading: RawReading,
    /// When the row was last edited. Display only; the session timestamp is what gets stored.
    pub captured_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DraftStatus {
    Editing,
    Locked,
}

/// Rows being entered for one session before it is saved.
///
/// Starts with a single empty row. Rows can be added up to `max_rows` and
/// removed down to one. Once locked the draft rejects edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDraft {
    rows: Vec<DraftRow>,
    max_rows: usize,
    status: DraftStatus,
}

impl Default for SessionDraft {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROWS)
    }
}

impl SessionDraft {
    pub fn new(max_rows: usize) -> Self {
        Self {
            rows: vec![DraftRow::default()],
            max_rows: max_rows.max(1),
            status: DraftStatus::Editing,
        }
    }

    pub fn rows(&self) -> &[DraftRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.complete_count() == 0
    }

    pub fn status(&self) -> DraftStatus {
        self.status
    }

    pub fn is_locked(&self) -> bool {
        self.status == DraftStatus::Locked
    }

    pub fn can_add_row(&self) -> bool {
        !self.is_locked() && self.rows.len() < self.max_rows
    }

    /// Append an empty row. Returns false when full or locked.
    pub fn add_row(&mut self) -> bool {
        if !self.can_add_row() {
            return false;
        }
        self.rows.push(DraftRow::default());
        true
    }

    /// Remove a row, keeping at least one.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.is_locked() || self.rows.len() <= 1 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    pub fn set_row(&mut self, index: usize, reading: RawReading, at: DateTime<Utc>) -> bool {
        if self.is_locked() {
            return false;
        }
        match self.rows.get_mut(index) {
            Some(row) => {
                row.reading = reading;
                row.captured_at = Some(at);
                true
            }
            None => false,
        }
    }

    pub fn complete_count(&self) -> usize {
        self.rows.iter().filter(|row| row.reading.is_complete()).count()
    }

    /// Live average over the complete rows, or `None` while nothing is complete.
    pub fn preview(&self) -> Option<Average> {
        let readings: Vec<RawReading> = self.rows.iter().map(|row| row.reading).collect();
        average(&readings)
    }

    /// Freeze the draft and hand back what the aggregator needs to save it.
    pub fn lock(
        &mut self,
        timestamp: DateTime<Utc>,
        photo_ref: Option<String>,
        override_average: Option<RawReading>,
    ) -> (SessionMeta, Vec<RawReading>) {
        self.status = DraftStatus::Locked;
        let meta = SessionMeta {
            timestamp,
            photo_ref,
            override_average,
        };
        let readings = self.rows.iter().map(|row| row.reading).collect();
        (meta, readings)
    }

    /// Back to editing, e.g. after a failed save.
    pub fn unlock(&mut self) {
        self.status = DraftStatus::Editing;
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.max_rows);
    }
}
