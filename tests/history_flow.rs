use std::sync::Arc;

use bp_tracker::{
    analysis::TimePattern, BpTracker, Category, ChartRange, Database, FixedClock, HistoryEntry,
    Locale, RawReading, SessionMeta, SettingsStore, TrackerSettings, Trend,
};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use uuid::Uuid;

fn offset() -> FixedOffset {
    FixedOffset::west_opt(4 * 3600).unwrap()
}

/// 2026-03-10 19:00 local
fn now() -> DateTime<FixedOffset> {
    offset().with_ymd_and_hms(2026, 3, 10, 19, 0, 0).unwrap()
}

fn local(day: u32, hour: u32) -> DateTime<Utc> {
    offset()
        .with_ymd_and_hms(2026, 3, day, hour, 0, 0)
        .unwrap()
        .with_timezone(&Utc)
}

fn tracker_for(db: Database) -> BpTracker<FixedClock<FixedOffset>> {
    bp_tracker::init_logging();
    let settings = SettingsStore::ephemeral(TrackerSettings {
        locale: Locale::En,
        ..TrackerSettings::default()
    });
    BpTracker::new(Arc::new(db), FixedClock(now()), Arc::new(settings))
}

#[tokio::test]
async fn week_of_entries_drives_every_view() {
    let tracker = tracker_for(Database::in_memory().unwrap());

    // evenings on the 6th..9th, elevated to stage 1
    for day in 6..10 {
        tracker
            .save_session(
                &SessionMeta::at(local(day, 19)),
                &[RawReading::new(134, 86, 78), RawReading::new(136, 88, 80)],
            )
            .await
            .unwrap();
    }
    // today a morning single plus an evening session, both lower
    tracker
        .save_reading(&RawReading::new(124, 78, 70), Some(local(10, 7)), None)
        .await
        .unwrap();
    tracker
        .save_session(
            &SessionMeta::at(local(10, 18)),
            &[
                RawReading::new(120, 76, 68),
                RawReading::parse("", "", ""),
                RawReading::new(122, 78, 70),
            ],
        )
        .await
        .unwrap();

    let history = tracker.load_history().await.unwrap();
    assert_eq!(history.len(), 6);
    assert!(matches!(history[0], HistoryEntry::Session(_)));
    assert!(matches!(history[1], HistoryEntry::Single(_)));

    let insights = tracker.insights(&history).unwrap();
    let today = insights.today.unwrap();
    // (124 + 121) / 2 rounds half up
    assert_eq!(today.systolic, 123);
    assert_eq!(today.diastolic, 78);
    assert_eq!(today.category, Category::Elevated);
    assert_eq!(insights.yesterday.unwrap().category, Category::Stage1);
    assert_eq!(insights.trend, Some(Trend::Better));
    assert_eq!(insights.streak, 5);
    assert_eq!(insights.time_pattern, Some(TimePattern::Evening));

    let series = tracker.chart(&history, ChartRange::Today);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].timestamp, local(10, 7));

    let five_days = tracker.chart(&history, ChartRange::FiveDays);
    assert_eq!(five_days.len(), 6);

    let weekly = tracker.weekly_summary(&history).unwrap();
    assert_eq!(weekly.entry_count, 6);
    assert!(weekly.last_week.is_none());
}

#[tokio::test]
async fn history_survives_reopening_the_database() {
    let path = std::env::temp_dir()
        .join(format!("bp-tracker-it-{}", Uuid::new_v4()))
        .join("readings.db");

    let saved = {
        let tracker = tracker_for(Database::new(path.clone()).unwrap());
        tracker
            .save_session(
                &SessionMeta::at(local(10, 8)),
                &[RawReading::new(150, 95, 90), RawReading::new(146, 93, 86)],
            )
            .await
            .unwrap()
    };

    let tracker = tracker_for(Database::new(path.clone()).unwrap());
    let history = tracker.load_history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id(), saved.id);
    assert_eq!(history[0].systolic(), Some(148));
    assert_eq!(history[0].diastolic(), Some(94));

    let labels = tracker.labels();
    let insights = tracker.insights(&history).unwrap();
    assert_eq!(
        bp_tracker::i18n::category_label(&labels, insights.display_category().unwrap()),
        "High BP Stage 2"
    );

    drop(tracker);
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
