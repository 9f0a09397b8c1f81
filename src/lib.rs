//! Blood-pressure reading sessions: capture, averaging, categorization and
//! day-level insights over a persisted history.
//!
//! `BpTracker` is the usual entry point. It writes through a `ReadingStore`
//! (SQLite via `Database` out of the box) and derives every view from the
//! merged history against an injected `Clock`.

pub mod analysis;
pub mod clock;
pub mod db;
pub mod error;
pub mod i18n;
pub mod settings;
pub mod tracker;
pub mod utils;

pub use analysis::{
    average, classify, compute_insights, weekly_summary, windowed_series, Category, ChartPoint,
    ChartRange, InsightConfig, Insights, Trend, WeeklySummary,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use db::{
    models::{Average, BpValues, RawReading},
    Database, HistoryEntry, Reading, ReadingStore, Session,
};
pub use error::{ReadingField, TrackerError, TrackerResult};
pub use i18n::{BuiltinLabels, LabelProvider, Locale};
pub use settings::{SettingsStore, TrackerSettings};
pub use tracker::{BpTracker, SessionDraft, SessionMeta};
pub use utils::init_logging;
