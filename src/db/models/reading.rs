//! Reading data models.
//!
//! `RawReading` is what the capture form holds before validation, `NewReading`
//! is what gets written, and `Reading` is what comes back from the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One capture row as typed by the user. Any field may still be missing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawReading {
    pub systolic: Option<u32>,
    pub diastolic: Option<u32>,
    pub pulse: Option<u32>,
}

impl RawReading {
    pub fn new(systolic: u32, diastolic: u32, pulse: u32) -> Self {
        Self {
            systolic: Some(systolic),
            diastolic: Some(diastolic),
            pulse: Some(pulse),
        }
    }

    /// Build from form text. Blank or non-numeric fields become `None`.
    pub fn parse(systolic: &str, diastolic: &str, pulse: &str) -> Self {
        fn field(raw: &str) -> Option<u32> {
            raw.trim().parse().ok()
        }

        Self {
            systolic: field(systolic),
            diastolic: field(diastolic),
            pulse: field(pulse),
        }
    }

    /// All three values, if every one is present and non-zero.
    pub fn values(&self) -> Option<BpValues> {
        match (self.systolic, self.diastolic, self.pulse) {
            (Some(systolic), Some(diastolic), Some(pulse))
                if systolic > 0 && diastolic > 0 && pulse > 0 =>
            {
                Some(BpValues { systolic, diastolic, pulse })
            }
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.values().is_some()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BpValues {
    pub systolic: u32,
    pub diastolic: u32,
    pub pulse: u32,
}

impl From<BpValues> for RawReading {
    fn from(values: BpValues) -> Self {
        RawReading::new(values.systolic, values.diastolic, values.pulse)
    }
}

/// Mean of a set of readings plus how many readings contributed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Average {
    pub systolic: u32,
    pub diastolic: u32,
    pub pulse: u32,
    pub count: usize,
}

impl Average {
    pub fn values(&self) -> BpValues {
        BpValues {
            systolic: self.systolic,
            diastolic: self.diastolic,
            pulse: self.pulse,
        }
    }
}

/// Reading row ready to be written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReading {
    pub values: BpValues,
    pub taken_at: DateTime<Utc>,
    pub session_id: Option<String>,
    pub photo_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Persisted reading. Values are optional because rows written by older
/// clients may lack them; such rows are skipped by every aggregate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub id: String,
    pub systolic: Option<u32>,
    pub diastolic: Option<u32>,
    pub pulse: Option<u32>,
    pub taken_at: DateTime<Utc>,
    pub session_id: Option<String>,
    pub photo_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Reading {
    pub fn raw(&self) -> RawReading {
        RawReading {
            systolic: self.systolic,
            diastolic: self.diastolic,
            pulse: self.pulse,
        }
    }
}

/// Accepted value ranges for a reading and for a session average.
pub mod validation {
    use super::{BpValues, RawReading};
    use crate::error::{ReadingField, TrackerError};

    pub const SYSTOLIC_RANGE: (u32, u32) = (50, 250);
    pub const DIASTOLIC_RANGE: (u32, u32) = (30, 150);
    pub const PULSE_RANGE: (u32, u32) = (30, 200);

    fn check(value: Option<u32>, (min, max): (u32, u32)) -> Result<u32, Option<u32>> {
        match value {
            Some(v) if v >= min && v <= max => Ok(v),
            other => Err(other),
        }
    }

    /// Range-check each field, reporting the first one out of range.
    ///
    /// `make_error` picks the error variant so the same checks serve both
    /// readings and override averages.
    pub fn validate_with(
        raw: &RawReading,
        make_error: impl Fn(ReadingField, Option<u32>) -> TrackerError,
    ) -> Result<BpValues, TrackerError> {
        let systolic = check(raw.systolic, SYSTOLIC_RANGE)
            .map_err(|v| make_error(ReadingField::Systolic, v))?;
        let diastolic = check(raw.diastolic, DIASTOLIC_RANGE)
            .map_err(|v| make_error(ReadingField::Diastolic, v))?;
        let pulse = check(raw.pulse, PULSE_RANGE)
            .map_err(|v| make_error(ReadingField::Pulse, v))?;

        Ok(BpValues { systolic, diastolic, pulse })
    }

    pub fn validate_reading(raw: &RawReading) -> Result<BpValues, TrackerError> {
        validate_with(raw, |field, value| TrackerError::InvalidReading { field, value })
    }

    pub fn is_valid_reading(raw: &RawReading) -> bool {
        validate_reading(raw).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::validation::{is_valid_reading, validate_reading};
    use super::*;
    use crate::error::{ReadingField, TrackerError};

    #[test]
    fn parse_treats_blank_and_garbage_as_missing() {
        let raw = RawReading::parse(" 128 ", "", "7x");
        assert_eq!(raw.systolic, Some(128));
        assert_eq!(raw.diastolic, None);
        assert_eq!(raw.pulse, None);
        assert!(!raw.is_complete());
    }

    #[test]
    fn zero_is_not_a_value() {
        assert_eq!(RawReading::new(120, 0, 70).values(), None);
    }

    #[test]
    fn range_edges_are_inclusive() {
        assert!(is_valid_reading(&RawReading::new(50, 30, 30)));
        assert!(is_valid_reading(&RawReading::new(250, 150, 200)));
        assert!(!is_valid_reading(&RawReading::new(49, 80, 70)));
        assert!(!is_valid_reading(&RawReading::new(120, 151, 70)));
        assert!(!is_valid_reading(&RawReading::new(120, 80, 201)));
    }

    #[test]
    fn validation_reports_first_bad_field() {
        let err = validate_reading(&RawReading::new(120, 20, 500)).unwrap_err();
        match err {
            TrackerError::InvalidReading { field, value } => {
                assert_eq!(field, ReadingField::Diastolic);
                assert_eq!(value, Some(20));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
