//! Top-level application shell.
//!
//! # Responsibility
//! - Decide once at startup whether the user must onboard.
//! - Own the connection and the collaborators (advisor, notifier, pulse).
//! - Hand out feature services bound to the shell's connection.
//!
//! # Invariants
//! - The chime pulse only runs between `activate()` and `teardown()`, and
//!   only in the active phase.
//! - Advice results arriving after `teardown()` are discarded.

use crate::advisor::{advisor_from_config, AdviceBoard, StudyAdvisor};
use crate::config::AppConfig;
use crate::model::profile::Profile;
use crate::notify::{ChimePulse, Notifier, Permission, ONBOARDING_BODY, ONBOARDING_TITLE};
use crate::repo::kv_repo::{KvStore, SqliteKvStore};
use crate::repo::storage::Storage;
use crate::service::dashboard::HomeDashboard;
use crate::service::marks_service::MarksService;
use crate::service::note_service::NoteService;
use crate::service::onboarding_service::OnboardingService;
use crate::service::settings_service::SettingsService;
use crate::service::task_service::TaskService;
use crate::service::timetable_service::TimetableService;
use crate::service::ServiceResult;
use crate::views::text::advice_for_display;
use chrono::NaiveDate;
use log::info;
use rusqlite::Connection;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Whether a profile exists yet.
#[derive(Debug, Clone, PartialEq)]
pub enum AppPhase {
    Onboarding,
    Active(Profile),
}

impl AppPhase {
    pub fn detect<S: KvStore>(storage: &Storage<S>) -> ServiceResult<Self> {
        Ok(match storage.load_profile()? {
            Some(profile) => Self::Active(profile),
            None => Self::Onboarding,
        })
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::Onboarding => None,
            Self::Active(profile) => Some(profile),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}

pub struct AppShell {
    conn: Connection,
    phase: AppPhase,
    advisor: Arc<dyn StudyAdvisor>,
    notifier: Arc<dyn Notifier>,
    pulse: Option<ChimePulse>,
    advice: Arc<AdviceBoard>,
    active: bool,
}

impl AppShell {
    /// Builds a shell over `conn`. `chime_period` of `None` disables the
    /// background chime.
    pub fn new(
        conn: Connection,
        advisor: Arc<dyn StudyAdvisor>,
        notifier: Arc<dyn Notifier>,
        chime_period: Option<Duration>,
    ) -> ServiceResult<Self> {
        let phase = AppPhase::detect(&Storage::new(SqliteKvStore::new(&conn)))?;
        let pulse = chime_period.map(|period| ChimePulse::new(Arc::clone(&notifier), period));
        info!(
            "event=shell_init module=app status=ok phase={} advisor={} chime={}",
            if phase.is_active() { "active" } else { "onboarding" },
            advisor.name(),
            pulse.is_some()
        );
        Ok(Self {
            conn,
            phase,
            advisor,
            notifier,
            pulse,
            advice: Arc::new(AdviceBoard::new()),
            active: false,
        })
    }

    pub fn from_config(
        conn: Connection,
        config: &AppConfig,
        notifier: Arc<dyn Notifier>,
    ) -> ServiceResult<Self> {
        let chime_period = config
            .notifications
            .enabled
            .then(|| config.notifications.chime_interval());
        Self::new(conn, advisor_from_config(&config.advisor), notifier, chime_period)
    }

    pub fn phase(&self) -> &AppPhase {
        &self.phase
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.phase.profile()
    }

    pub fn advisor(&self) -> &Arc<dyn StudyAdvisor> {
        &self.advisor
    }

    pub fn advice_board(&self) -> &Arc<AdviceBoard> {
        &self.advice
    }

    pub fn storage(&self) -> Storage<SqliteKvStore<'_>> {
        Storage::new(SqliteKvStore::new(&self.conn))
    }

    pub fn timetable(&self) -> ServiceResult<TimetableService<SqliteKvStore<'_>>> {
        TimetableService::open(self.storage())
    }

    pub fn tasks(&self) -> ServiceResult<TaskService<SqliteKvStore<'_>>> {
        TaskService::open(self.storage())
    }

    pub fn marks(&self) -> ServiceResult<MarksService<SqliteKvStore<'_>>> {
        MarksService::open(self.storage())
    }

    pub fn notes(&self) -> ServiceResult<NoteService<SqliteKvStore<'_>>> {
        NoteService::open(self.storage())
    }

    pub fn settings(&self) -> ServiceResult<SettingsService<SqliteKvStore<'_>>> {
        SettingsService::open(self.storage())
    }

    /// Saves the first profile and moves to the active phase.
    pub fn complete_onboarding(&mut self, profile: Profile) -> ServiceResult<Profile> {
        let saved = OnboardingService::new(self.storage()).complete(profile)?;
        self.phase = AppPhase::Active(saved.clone());
        self.notifier.notify(ONBOARDING_TITLE, ONBOARDING_BODY);
        Ok(saved)
    }

    pub fn update_profile(&mut self, profile: Profile) -> ServiceResult<Profile> {
        let saved = self.settings()?.update_profile(profile)?;
        self.phase = AppPhase::Active(saved.clone());
        Ok(saved)
    }

    /// Wipes all stored data and returns to onboarding.
    pub fn clear_all_data(&mut self) -> ServiceResult<()> {
        self.settings()?.clear_all_data()?;
        self.teardown();
        self.phase = AppPhase::Onboarding;
        Ok(())
    }

    /// Starts the chime pulse and asks for notification permission.
    ///
    /// Returns `false` while onboarding is still pending.
    pub fn activate(&mut self) -> bool {
        if !self.phase.is_active() {
            return false;
        }
        if self.active {
            return true;
        }
        self.active = true;
        self.advice.reopen();
        let permission = self.notifier.request_permission();
        if let Some(pulse) = self.pulse.as_mut() {
            pulse.start();
        }
        info!(
            "event=shell_activate module=app status=ok permission={}",
            if permission == Permission::Granted { "granted" } else { "denied" }
        );
        true
    }

    /// Stops the pulse and stops accepting advice results.
    pub fn teardown(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(pulse) = self.pulse.as_mut() {
            pulse.stop();
        }
        self.advice.close();
        info!("event=shell_teardown module=app status=ok");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_chiming(&self) -> bool {
        self.pulse.as_ref().is_some_and(ChimePulse::is_running)
    }

    pub fn dashboard(&self, date: NaiveDate) -> ServiceResult<Option<HomeDashboard>> {
        match self.phase.profile() {
            Some(profile) => HomeDashboard::load(&self.storage(), profile, date).map(Some),
            None => Ok(None),
        }
    }

    /// Requests advice for `dashboard` and waits for it.
    ///
    /// Returns the display text when it was published to the board.
    pub async fn refresh_advice(&self, dashboard: &HomeDashboard) -> Option<String> {
        let profile = self.phase.profile()?.clone();
        let ticket = self.advice.begin();
        let raw = self.advisor.advice(&profile, &dashboard.advice_topics).await;
        let text = advice_for_display(&raw);
        self.advice.publish(ticket, text.clone()).then_some(text)
    }

    /// Starts an advice request in the background; the result lands on the
    /// advice board unless superseded or torn down first.
    pub fn spawn_advice_refresh(&self, dashboard: &HomeDashboard) -> Option<JoinHandle<bool>> {
        let profile = self.phase.profile()?.clone();
        let runtime = tokio::runtime::Handle::try_current().ok()?;
        let advisor = Arc::clone(&self.advisor);
        let board = Arc::clone(&self.advice);
        let topics = dashboard.advice_topics.clone();
        let ticket = board.begin();
        Some(runtime.spawn(async move {
            let raw = advisor.advice(&profile, &topics).await;
            board.publish(ticket, advice_for_display(&raw))
        }))
    }

    /// Summary text for one note; never fails.
    pub async fn summarize_note(&self, content: &str) -> String {
        self.advisor.summarize(content).await
    }
}

impl Drop for AppShell {
    fn drop(&mut self) {
        self.teardown();
    }
}
