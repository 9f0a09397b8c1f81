use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::HistoryEntry;

/// Lookback options offered by the trend chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ChartRange {
    Today,
    FiveDays,
    TenDays,
    ThirtyDays,
}

impl ChartRange {
    pub const ALL: [ChartRange; 4] = [
        ChartRange::Today,
        ChartRange::FiveDays,
        ChartRange::TenDays,
        ChartRange::ThirtyDays,
    ];

    pub fn days(&self) -> u32 {
        match self {
            ChartRange::Today => 0,
            ChartRange::FiveDays => 5,
            ChartRange::TenDays => 10,
            ChartRange::ThirtyDays => 30,
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            ChartRange::Today => "chart.range.today",
            ChartRange::FiveDays => "chart.range.5d",
            ChartRange::TenDays => "chart.range.10d",
            ChartRange::ThirtyDays => "chart.range.30d",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub systolic: u32,
    pub diastolic: u32,
    pub pulse: u32,
}

/// Start of the window. `0` days means local midnight of `now`'s day.
pub fn window_cutoff<Tz: TimeZone>(range_days: u32, now: &DateTime<Tz>) -> DateTime<Utc> {
    if range_days == 0 {
        let midnight = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .and_then(|midnight| now.timezone().from_local_datetime(&midnight).earliest());
        // A DST gap at midnight has no local 00:00; fall back to a plain 24h window.
        return match midnight {
            Some(dt) => dt.with_timezone(&Utc),
            None => now.with_timezone(&Utc) - Duration::hours(24),
        };
    }
    now.with_timezone(&Utc) - Duration::days(i64::from(range_days))
}

/// One point per complete entry in `[cutoff, now]`, oldest first.
pub fn windowed_series<Tz: TimeZone>(
    history: &[HistoryEntry],
    range_days: u32,
    now: &DateTime<Tz>,
) -> Vec<ChartPoint> {
    let cutoff = window_cutoff(range_days, now);
    let now = now.with_timezone(&Utc);

    let mut points: Vec<ChartPoint> = history
        .iter()
        .filter(|entry| {
            let ts = entry.timestamp();
            ts >= cutoff && ts <= now
        })
        .filter_map(|entry| {
            let values = entry.values()?;
            Some(ChartPoint {
                timestamp: entry.timestamp(),
                systolic: values.systolic,
                diastolic: values.diastolic,
                pulse: values.pulse,
            })
        })
        .collect();

    points.sort_by_key(|point| point.timestamp);
    points
}
