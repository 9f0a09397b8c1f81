//! Trailing-week summary compared with the week before it.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::{
    averaging::rounded_mean,
    category::{classify, Category},
    config::InsightConfig,
};
use crate::db::models::{BpValues, HistoryEntry};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeekMean {
    pub systolic: u32,
    pub diastolic: u32,
    pub pulse: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeekDelta {
    pub systolic: i64,
    pub diastolic: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub this_week: WeekMean,
    pub last_week: Option<WeekMean>,
    pub delta: Option<WeekDelta>,
    pub category: Category,
    pub entry_count: usize,
}

fn week_mean(values: &[BpValues]) -> Option<WeekMean> {
    Some(WeekMean {
        systolic: rounded_mean(values.iter().map(|v| v.systolic))?,
        diastolic: rounded_mean(values.iter().map(|v| v.diastolic))?,
        pulse: rounded_mean(values.iter().map(|v| v.pulse))?,
    })
}

/// Summarise the trailing window and compare it with the window before it.
///
/// Only entries with all three values count. `None` when the trailing
/// window is empty.
pub fn weekly_summary<Tz: TimeZone>(
    history: &[HistoryEntry],
    now: &DateTime<Tz>,
    config: &InsightConfig,
) -> Option<WeeklySummary> {
    let now = now.with_timezone(&Utc);
    let window = Duration::days(config.weekly_window_days);
    let cutoff = now - window;
    let previous_cutoff = cutoff - window;

    let mut this_week = Vec::new();
    let mut last_week = Vec::new();
    for entry in history {
        let Some(values) = entry.values() else {
            continue;
        };
        let ts = entry.timestamp();
        if ts >= cutoff {
            this_week.push(values);
        } else if ts >= previous_cutoff {
            last_week.push(values);
        }
    }

    let current = week_mean(&this_week)?;
    let previous = week_mean(&last_week);
    let delta = previous.map(|prev| WeekDelta {
        systolic: i64::from(current.systolic) - i64::from(prev.systolic),
        diastolic: i64::from(current.diastolic) - i64::from(prev.diastolic),
    });

    Some(WeeklySummary {
        this_week: current,
        last_week: previous,
        delta,
        category: classify(current.systolic, current.diastolic),
        entry_count: this_week.len(),
    })
}
