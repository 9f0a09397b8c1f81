//! Day-level insights over the merged history.
//!
//! Every day boundary is derived by stepping `now` back in fixed 24h steps
//! and taking the local calendar date in `now`'s timezone.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use super::{
    averaging::rounded_mean,
    category::{classify, Category},
    config::InsightConfig,
};
use crate::db::models::HistoryEntry;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Better,
    Same,
    Worse,
}

impl Trend {
    /// Compare today's mean systolic with yesterday's.
    ///
    /// Each side is a `(sum, count)` pair. The means are compared exactly,
    /// scaled by both counts, so rounding never moves the band edge. `None`
    /// when either day is empty.
    pub fn from_totals(today: (u64, u64), yesterday: (u64, u64), band: u32) -> Option<Self> {
        let (today_sum, today_count) = today;
        let (yesterday_sum, yesterday_count) = yesterday;
        if today_count == 0 || yesterday_count == 0 {
            return None;
        }

        let scaled_delta = i128::from(today_sum) * i128::from(yesterday_count)
            - i128::from(yesterday_sum) * i128::from(today_count);
        let scaled_band =
            i128::from(band) * i128::from(today_count) * i128::from(yesterday_count);

        let trend = if scaled_delta < -scaled_band {
            Trend::Better
        } else if scaled_delta > scaled_band {
            Trend::Worse
        } else {
            Trend::Same
        };
        Some(trend)
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            Trend::Better => "insights.trend.better",
            Trend::Same => "insights.trend.same",
            Trend::Worse => "insights.trend.worse",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimePattern {
    Morning,
    Evening,
}

impl TimePattern {
    pub fn label_key(&self) -> &'static str {
        match self {
            TimePattern::Morning => "insights.pattern.morning",
            TimePattern::Evening => "insights.pattern.evening",
        }
    }
}

/// Mean values and category for one calendar day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub systolic: u32,
    pub diastolic: u32,
    pub pulse: Option<u32>,
    pub category: Category,
    pub entry_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub today: Option<DaySummary>,
    pub yesterday: Option<DaySummary>,
    pub trend: Option<Trend>,
    pub streak: u32,
    pub time_pattern: Option<TimePattern>,
}

impl Insights {
    /// Today's category, or yesterday's while nothing is logged today.
    pub fn display_category(&self) -> Option<Category> {
        self.today.or(self.yesterday).map(|day| day.category)
    }
}

/// An entry reduced to what the insight rules look at, in local time.
struct Point<Tz: TimeZone> {
    at: DateTime<Tz>,
    systolic: u32,
    diastolic: u32,
    pulse: Option<u32>,
}

fn local_points<Tz: TimeZone>(history: &[HistoryEntry], tz: &Tz) -> Vec<Point<Tz>> {
    history
        .iter()
        .filter_map(|entry| {
            Some(Point {
                at: entry.timestamp().with_timezone(tz),
                systolic: entry.systolic()?,
                diastolic: entry.diastolic()?,
                pulse: entry.pulse(),
            })
        })
        .collect()
}

fn day_at<Tz: TimeZone>(now: &DateTime<Tz>, days_back: i64) -> NaiveDate {
    (now.clone() - Duration::days(days_back)).date_naive()
}

fn systolic_totals<Tz: TimeZone>(points: &[&Point<Tz>]) -> (u64, u64) {
    let sum = points.iter().map(|p| u64::from(p.systolic)).sum();
    (sum, points.len() as u64)
}

fn summarize_day<Tz: TimeZone>(points: &[&Point<Tz>]) -> Option<DaySummary> {
    let systolic = rounded_mean(points.iter().map(|p| p.systolic))?;
    let diastolic = rounded_mean(points.iter().map(|p| p.diastolic))?;

    Some(DaySummary {
        systolic,
        diastolic,
        pulse: rounded_mean(points.iter().filter_map(|p| p.pulse)),
        category: classify(systolic, diastolic),
        entry_count: points.len(),
    })
}

/// Consecutive logged days ending today, or ending yesterday when today is
/// still empty.
fn streak<Tz: TimeZone>(points: &[Point<Tz>], now: &DateTime<Tz>) -> u32 {
    let logged: HashSet<NaiveDate> = points.iter().map(|p| p.at.date_naive()).collect();

    let mut days_back = if logged.contains(&day_at(now, 0)) { 0 } else { 1 };
    let mut streak = 0;
    while logged.contains(&day_at(now, days_back)) {
        streak += 1;
        days_back += 1;
    }
    streak
}

fn time_pattern<Tz: TimeZone>(
    points: &[Point<Tz>],
    now: &DateTime<Tz>,
    config: &InsightConfig,
) -> Option<TimePattern> {
    let cutoff = now.clone() - Duration::days(config.pattern_window_days);
    let recent = points.iter().filter(|p| p.at >= cutoff && p.at <= *now);

    let (mut morning, mut evening) = (0usize, 0usize);
    for point in recent {
        let hour = point.at.hour();
        if config.morning_hours.contains(&hour) {
            morning += 1;
        } else if config.evening_hours.contains(&hour) {
            evening += 1;
        }
    }

    if morning + evening <= config.pattern_min_samples {
        return None;
    }
    if morning >= evening {
        Some(TimePattern::Morning)
    } else {
        Some(TimePattern::Evening)
    }
}

pub fn compute_insights<Tz: TimeZone>(
    history: &[HistoryEntry],
    now: &DateTime<Tz>,
) -> Option<Insights> {
    compute_insights_with(history, now, &InsightConfig::default())
}

/// Returns `None` when neither today nor yesterday has a usable entry.
pub fn compute_insights_with<Tz: TimeZone>(
    history: &[HistoryEntry],
    now: &DateTime<Tz>,
    config: &InsightConfig,
) -> Option<Insights> {
    let points = local_points(history, &now.timezone());

    let today_date = day_at(now, 0);
    let yesterday_date = day_at(now, 1);
    let today_points: Vec<&Point<Tz>> = points
        .iter()
        .filter(|p| p.at.date_naive() == today_date)
        .collect();
    let yesterday_points: Vec<&Point<Tz>> = points
        .iter()
        .filter(|p| p.at.date_naive() == yesterday_date)
        .collect();

    if today_points.is_empty() && yesterday_points.is_empty() {
        return None;
    }

    let today = summarize_day(&today_points);
    let yesterday = summarize_day(&yesterday_points);

    let trend = Trend::from_totals(
        systolic_totals(&today_points),
        systolic_totals(&yesterday_points),
        config.trend_band,
    );

    Some(Insights {
        today,
        yesterday,
        trend,
        streak: streak(&points, now),
        time_pattern: time_pattern(&points, now, config),
    })
}
