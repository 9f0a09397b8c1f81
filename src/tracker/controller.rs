use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    analysis::{
        compute_insights_with, weekly_summary, windowed_series, ChartPoint, ChartRange,
        InsightConfig, Insights, WeeklySummary,
    },
    clock::{Clock, SystemClock},
    db::{
        models::{merge_history, validation, NewReading, RawReading},
        HistoryEntry, ReadingStore, Session, SessionWithReadings,
    },
    error::{TrackerError, TrackerResult},
    i18n::{describe_insights, BuiltinLabels, InsightLabels},
    log_info, log_warn,
    settings::SettingsStore,
};

use super::{
    aggregator::{self, SessionMeta},
    draft::SessionDraft,
};

const ENABLE_LOGS: bool = true;

/// Everything the home screen shows, computed against one instant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub entries: Vec<HistoryEntry>,
    pub insights: Option<Insights>,
    pub insight_labels: Option<InsightLabels>,
    pub weekly: Option<WeeklySummary>,
    pub range: ChartRange,
    pub series: Vec<ChartPoint>,
}

/// Entry point for saving readings and deriving views from history.
///
/// Holds no history of its own; every read goes to the store so views always
/// reflect what was actually persisted. Day boundaries follow the clock's
/// timezone.
pub struct BpTracker<C: Clock = SystemClock> {
    store: Arc<dyn ReadingStore>,
    clock: Arc<C>,
    settings: Arc<SettingsStore>,
    config: InsightConfig,
}

impl<C: Clock> Clone for BpTracker<C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            settings: Arc::clone(&self.settings),
            config: self.config.clone(),
        }
    }
}

impl<C: Clock> BpTracker<C> {
    pub fn new(store: Arc<dyn ReadingStore>, clock: C, settings: Arc<SettingsStore>) -> Self {
        Self::with_config(store, clock, settings, InsightConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn ReadingStore>,
        clock: C,
        settings: Arc<SettingsStore>,
        config: InsightConfig,
    ) -> Self {
        Self {
            store,
            clock: Arc::new(clock),
            settings,
            config,
        }
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now().with_timezone(&Utc)
    }

    /// Labels for the currently selected locale.
    pub fn labels(&self) -> BuiltinLabels {
        BuiltinLabels::new(self.settings.locale())
    }

    pub fn new_draft(&self) -> SessionDraft {
        SessionDraft::new(self.settings.snapshot().max_readings_per_session)
    }

    pub async fn save_session(
        &self,
        meta: &SessionMeta,
        readings: &[RawReading],
    ) -> TrackerResult<Session> {
        aggregator::save_session(self.store.as_ref(), meta, readings, self.now()).await
    }

    /// Lock the draft and save it at the current instant.
    ///
    /// On failure the draft is unlocked again so the user can fix it and retry.
    pub async fn save_draft(
        &self,
        draft: &mut SessionDraft,
        photo_ref: Option<String>,
        override_average: Option<RawReading>,
    ) -> TrackerResult<Session> {
        let (meta, readings) = draft.lock(self.now(), photo_ref, override_average);
        match self.save_session(&meta, &readings).await {
            Ok(session) => Ok(session),
            Err(err) => {
                draft.unlock();
                Err(err)
            }
        }
    }

    /// Save one standalone reading. `taken_at` defaults to now.
    pub async fn save_reading(
        &self,
        raw: &RawReading,
        taken_at: Option<DateTime<Utc>>,
        photo_ref: Option<String>,
    ) -> TrackerResult<()> {
        let values = validation::validate_reading(raw)?;
        let now = self.now();
        let record = NewReading {
            values,
            taken_at: taken_at.unwrap_or(now),
            session_id: None,
            photo_ref,
            created_at: now,
        };

        self.store
            .insert_readings(std::slice::from_ref(&record))
            .await
            .map_err(TrackerError::StoreWrite)?;

        log_info!(
            "Saved reading {}/{} pulse {}",
            values.systolic, values.diastolic, values.pulse
        );
        Ok(())
    }

    /// Sessions and standalone readings merged newest first.
    pub async fn load_history(&self) -> TrackerResult<Vec<HistoryEntry>> {
        let settings = self.settings.snapshot();
        let sessions = self
            .store
            .list_sessions(settings.session_history_limit)
            .await
            .map_err(TrackerError::StoreRead)?;
        let readings = self
            .store
            .list_standalone_readings(settings.reading_history_limit)
            .await
            .map_err(TrackerError::StoreRead)?;

        Ok(merge_history(sessions, readings))
    }

    /// Recent sessions each with their linked readings.
    ///
    /// A session whose readings cannot be loaded is still listed, with none.
    pub async fn sessions_with_readings(&self) -> TrackerResult<Vec<SessionWithReadings>> {
        let limit = self.settings.snapshot().session_history_limit;
        let sessions = self
            .store
            .list_sessions(limit)
            .await
            .map_err(TrackerError::StoreRead)?;

        let mut expanded = Vec::with_capacity(sessions.len());
        for session in sessions {
            let readings = match self.store.list_session_readings(&session.id).await {
                Ok(readings) => readings,
                Err(err) => {
                    log_warn!("Failed to load readings for session {}: {err:#}", session.id);
                    Vec::new()
                }
            };
            expanded.push(SessionWithReadings { session, readings });
        }
        Ok(expanded)
    }

    pub async fn delete_session(&self, session_id: &str) -> TrackerResult<()> {
        self.store
            .delete_session(session_id)
            .await
            .map_err(TrackerError::StoreWrite)?;
        log_info!("Deleted session {session_id}");
        Ok(())
    }

    pub async fn delete_reading(&self, reading_id: &str) -> TrackerResult<()> {
        self.store
            .delete_reading(reading_id)
            .await
            .map_err(TrackerError::StoreWrite)?;
        log_info!("Deleted reading {reading_id}");
        Ok(())
    }

    pub fn insights(&self, history: &[HistoryEntry]) -> Option<Insights> {
        compute_insights_with(history, &self.clock.now(), &self.config)
    }

    pub fn weekly_summary(&self, history: &[HistoryEntry]) -> Option<WeeklySummary> {
        weekly_summary(history, &self.clock.now(), &self.config)
    }

    pub fn chart(&self, history: &[HistoryEntry], range: ChartRange) -> Vec<ChartPoint> {
        windowed_series(history, range.days(), &self.clock.now())
    }

    /// Load history once and derive every view from it.
    pub async fn overview(&self, range: ChartRange) -> TrackerResult<Overview> {
        let entries = self.load_history().await?;
        let now = self.clock.now();

        let insights = compute_insights_with(&entries, &now, &self.config);
        let insight_labels = insights
            .as_ref()
            .map(|insights| describe_insights(&self.labels(), insights));
        let weekly = weekly_summary(&entries, &now, &self.config);
        let series = windowed_series(&entries, range.days(), &now);

        Ok(Overview {
            entries,
            insights,
            insight_labels,
            weekly,
            range,
            series,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::*;
    use crate::{
        analysis::{Category, Trend},
        clock::FixedClock,
        db::Database,
        i18n::Locale,
        settings::TrackerSettings,
        tracker::aggregator::tests::FlakyStore,
    };

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(5 * 3600 + 1800)
            .unwrap()
            .with_ymd_and_hms(2026, 3, 10, 14, 0, 0)
            .unwrap()
    }

    fn local(day: u32, hour: u32) -> DateTime<Utc> {
        now()
            .timezone()
            .with_ymd_and_hms(2026, 3, day, hour, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    type TestTracker = BpTracker<FixedClock<FixedOffset>>;

    fn tracker_with(store: Arc<dyn ReadingStore>, settings: TrackerSettings) -> TestTracker {
        BpTracker::new(
            store,
            FixedClock(now()),
            Arc::new(SettingsStore::ephemeral(settings)),
        )
    }

    fn tracker() -> TestTracker {
        tracker_with(
            Arc::new(Database::in_memory().unwrap()),
            TrackerSettings::default(),
        )
    }

    #[tokio::test]
    async fn standalone_reading_is_validated() {
        let tracker = tracker();
        let err = tracker
            .save_reading(&RawReading::new(120, 80, 20), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::InvalidReading { .. }));
        assert_eq!(err.label_key(), "entry.validationError");

        tracker
            .save_reading(&RawReading::new(120, 80, 70), None, Some("photos/r.jpg".into()))
            .await
            .unwrap();
        let history = tracker.load_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].timestamp(), now().with_timezone(&Utc));
        assert_eq!(history[0].photo_ref(), Some("photos/r.jpg"));
    }

    #[tokio::test]
    async fn rows_are_stamped_with_the_clock() {
        let tracker = tracker();
        let at = now().with_timezone(&Utc);
        tracker
            .save_reading(&RawReading::new(118, 76, 64), Some(local(9, 8)), None)
            .await
            .unwrap();
        let session = tracker
            .save_session(&SessionMeta::at(local(10, 7)), &[RawReading::new(120, 80, 70)])
            .await
            .unwrap();
        assert_eq!(session.created_at, at);

        for entry in tracker.load_history().await.unwrap() {
            match entry {
                HistoryEntry::Session(session) => assert_eq!(session.created_at, at),
                HistoryEntry::Single(reading) => {
                    assert_eq!(reading.created_at, at);
                    assert_eq!(reading.taken_at, local(9, 8));
                }
            }
        }
        let expanded = tracker.sessions_with_readings().await.unwrap();
        assert!(expanded[0].readings.iter().all(|r| r.created_at == at));
    }

    #[tokio::test]
    async fn views_use_the_clock_zone_across_dst() {
        use chrono_tz::America::New_York;

        let tracker = BpTracker::new(
            Arc::new(Database::in_memory().unwrap()),
            FixedClock(New_York.with_ymd_and_hms(2026, 3, 8, 14, 0, 0).unwrap()),
            Arc::new(SettingsStore::ephemeral(TrackerSettings::default())),
        );
        // 23:30 EST on the 7th, which the post-switch offset alone would place on the 8th
        let late = Utc.with_ymd_and_hms(2026, 3, 8, 4, 30, 0).unwrap();
        tracker
            .save_reading(&RawReading::new(150, 95, 80), Some(late), None)
            .await
            .unwrap();

        let history = tracker.load_history().await.unwrap();
        let insights = tracker.insights(&history).unwrap();
        assert_eq!(insights.today, None);
        assert_eq!(insights.yesterday.unwrap().category, Category::Stage2);
        assert!(tracker.chart(&history, ChartRange::Today).is_empty());
        assert_eq!(tracker.chart(&history, ChartRange::FiveDays).len(), 1);
    }

    #[tokio::test]
    async fn history_merges_sessions_and_readings_newest_first() {
        let tracker = tracker();
        tracker
            .save_reading(&RawReading::new(118, 76, 64), Some(local(9, 8)), None)
            .await
            .unwrap();
        tracker
            .save_session(
                &SessionMeta::at(local(10, 7)),
                &[RawReading::new(120, 80, 70), RawReading::new(130, 90, 80)],
            )
            .await
            .unwrap();
        tracker
            .save_reading(&RawReading::new(122, 78, 66), Some(local(10, 9)), None)
            .await
            .unwrap();

        let history = tracker.load_history().await.unwrap();
        let stamps: Vec<_> = history.iter().map(|e| e.timestamp()).collect();
        assert_eq!(stamps, vec![local(10, 9), local(10, 7), local(9, 8)]);
        assert_eq!(history[1].systolic(), Some(125));
    }

    #[tokio::test]
    async fn history_respects_configured_limits() {
        let tracker = tracker_with(
            Arc::new(Database::in_memory().unwrap()),
            TrackerSettings {
                reading_history_limit: 2,
                ..TrackerSettings::default()
            },
        );
        for hour in 6..10 {
            tracker
                .save_reading(&RawReading::new(120, 80, 70), Some(local(10, hour)), None)
                .await
                .unwrap();
        }
        let history = tracker.load_history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].timestamp(), local(10, 9));
    }

    #[tokio::test]
    async fn failed_draft_save_unlocks_the_draft() {
        let store = Arc::new(FlakyStore {
            fail_sessions: true,
            ..FlakyStore::default()
        });
        let tracker = tracker_with(store, TrackerSettings::default());
        let mut draft = tracker.new_draft();
        draft.set_row(0, RawReading::new(120, 80, 70), tracker.now());

        let err = tracker.save_draft(&mut draft, None, None).await.unwrap_err();
        assert!(matches!(err, TrackerError::StoreWrite(_)));
        assert_eq!(err.label_key(), "entry.saveError");
        assert!(!draft.is_locked());
    }

    #[tokio::test]
    async fn draft_save_uses_current_instant() {
        let tracker = tracker();
        let mut draft = tracker.new_draft();
        draft.add_row();
        draft.set_row(0, RawReading::new(150, 95, 88), tracker.now());
        draft.set_row(1, RawReading::new(146, 91, 84), tracker.now());

        let session = tracker.save_draft(&mut draft, None, None).await.unwrap();
        assert!(draft.is_locked());
        assert_eq!(session.session_at, now().with_timezone(&Utc));
        assert_eq!(session.reading_count, 2);
        assert_eq!(session.avg_systolic, Some(148));
        assert_eq!(session.avg_diastolic, Some(93));
    }

    #[tokio::test]
    async fn sessions_are_expanded_and_deletable() {
        let tracker = tracker();
        let session = tracker
            .save_session(
                &SessionMeta::at(local(10, 7)),
                &[RawReading::new(120, 80, 70), RawReading::new(124, 82, 72)],
            )
            .await
            .unwrap();

        let expanded = tracker.sessions_with_readings().await.unwrap();
        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded[0].session, session);
        assert_eq!(expanded[0].readings.len(), 2);

        tracker.delete_session(&session.id).await.unwrap();
        assert!(tracker.load_history().await.unwrap().is_empty());
        assert!(tracker.sessions_with_readings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn overview_derives_views_from_one_history() {
        let tracker = tracker();
        tracker.settings().set_locale(Locale::En).unwrap();
        tracker
            .save_reading(&RawReading::new(150, 95, 80), Some(local(9, 8)), None)
            .await
            .unwrap();
        tracker
            .save_reading(&RawReading::new(118, 76, 70), Some(local(10, 8)), None)
            .await
            .unwrap();

        let overview = tracker.overview(ChartRange::FiveDays).await.unwrap();
        assert_eq!(overview.entries.len(), 2);

        let insights = overview.insights.unwrap();
        assert_eq!(insights.today.unwrap().category, Category::Normal);
        assert_eq!(insights.yesterday.unwrap().category, Category::Stage2);
        assert_eq!(insights.trend, Some(Trend::Better));
        assert_eq!(insights.streak, 2);

        let labels = overview.insight_labels.unwrap();
        assert!(labels.category.is_some());
        assert!(labels.trend.is_some());

        assert_eq!(overview.series.len(), 2);
        assert!(overview.series[0].timestamp < overview.series[1].timestamp);
        assert_eq!(overview.weekly.unwrap().entry_count, 2);
    }

    #[tokio::test]
    async fn read_failures_surface_as_store_read() {
        struct Broken;

        #[async_trait::async_trait]
        impl ReadingStore for Broken {
            async fn insert_session(&self, _: &crate::db::NewSession) -> anyhow::Result<String> {
                Ok("x".into())
            }
            async fn insert_readings(&self, _: &[NewReading]) -> anyhow::Result<()> {
                Ok(())
            }
            async fn delete_session(&self, _: &str) -> anyhow::Result<()> {
                Ok(())
            }
            async fn delete_reading(&self, _: &str) -> anyhow::Result<()> {
                Ok(())
            }
            async fn list_sessions(&self, _: usize) -> anyhow::Result<Vec<Session>> {
                Err(anyhow::anyhow!("disk gone"))
            }
            async fn list_standalone_readings(
                &self,
                _: usize,
            ) -> anyhow::Result<Vec<crate::db::Reading>> {
                Ok(Vec::new())
            }
            async fn list_session_readings(
                &self,
                _: &str,
            ) -> anyhow::Result<Vec<crate::db::Reading>> {
                Ok(Vec::new())
            }
        }

        let tracker = tracker_with(Arc::new(Broken), TrackerSettings::default());
        let err = tracker.load_history().await.unwrap_err();
        assert!(matches!(err, TrackerError::StoreRead(_)));
        assert!(!err.is_validation());
    }
}
