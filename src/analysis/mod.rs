pub mod averaging;
pub mod category;
pub mod chart;
pub mod config;
pub mod insights;
pub mod weekly;

pub use averaging::{average, rounded_mean};
pub use category::{classify, classify_optional, Category};
pub use chart::{windowed_series, ChartPoint, ChartRange};
pub use config::InsightConfig;
pub use insights::{compute_insights, compute_insights_with, DaySummary, Insights, TimePattern, Trend};
pub use weekly::{weekly_summary, WeeklySummary};
