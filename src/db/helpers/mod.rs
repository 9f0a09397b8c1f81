use std::convert::TryFrom;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};

pub fn to_i64(value: usize) -> Result<i64> {
    i64::try_from(value).map_err(|_| anyhow!("value {value} exceeds SQLite INTEGER range"))
}

pub fn to_u32(value: i64, field: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| anyhow!("{field} contains out-of-range value {value}"))
}

pub fn to_optional_u32(value: Option<i64>, field: &str) -> Result<Option<u32>> {
    value.map(|v| to_u32(v, field)).transpose()
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_counts() {
        assert!(to_u32(-1, "reading_count").is_err());
        assert_eq!(to_optional_u32(Some(72), "pulse").unwrap(), Some(72));
        assert_eq!(to_optional_u32(None, "pulse").unwrap(), None);
    }

    #[test]
    fn parses_offsets_into_utc() {
        let dt = parse_datetime("2026-03-10T09:30:00+05:30", "taken_at").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-03-10T04:00:00+00:00");
        assert!(parse_datetime("yesterday", "taken_at").is_err());
    }
}
