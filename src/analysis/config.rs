use std::ops::Range;

/// Tunable thresholds for insight and summary computations.
#[derive(Debug, Clone)]
pub struct InsightConfig {
    /// |today - yesterday| mean systolic at or below this is "same"
    pub trend_band: u32,

    /// Trailing window for the time-of-day pattern
    pub pattern_window_days: i64,

    /// Pattern is reported only when morning + evening exceeds this
    pub pattern_min_samples: usize,

    /// Local hours counted as morning / evening
    pub morning_hours: Range<u32>,
    pub evening_hours: Range<u32>,

    /// Window length for the weekly summary and its comparison week
    pub weekly_window_days: i64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            trend_band: 3,
            pattern_window_days: 7,
            pattern_min_samples: 2,
            morning_hours: 5..12,
            evening_hours: 17..22,
            weekly_window_days: 7,
        }
    }
}
