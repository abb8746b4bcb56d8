use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use studydesk_core::advisor::ADVICE_PLACEHOLDER;
use studydesk_core::db::{open_db, open_db_in_memory};
use studydesk_core::model::profile::{Profile, Stream};
use studydesk_core::model::task::TaskDraft;
use studydesk_core::notify::{ONBOARDING_BODY, ONBOARDING_TITLE};
use studydesk_core::{AppPhase, AppShell, Notifier, Permission, StaticAdvisor, StudyAdvisor};

#[derive(Debug, Default)]
struct RecordingNotifier {
    permission_requests: Mutex<usize>,
    sent: Mutex<Vec<(String, String)>>,
}

impl Notifier for RecordingNotifier {
    fn request_permission(&self) -> Permission {
        *self.permission_requests.lock().unwrap() += 1;
        Permission::Denied
    }

    fn notify(&self, title: &str, body: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
    }

    fn play_chime(&self) {}
}

#[derive(Debug)]
struct ScriptedAdvisor {
    reply: String,
    seen_topics: Mutex<Vec<Vec<String>>>,
}

impl ScriptedAdvisor {
    fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            seen_topics: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl StudyAdvisor for ScriptedAdvisor {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn advice(&self, _profile: &Profile, pending_titles: &[String]) -> String {
        self.seen_topics.lock().unwrap().push(pending_titles.to_vec());
        self.reply.clone()
    }

    async fn summarize(&self, content: &str) -> String {
        format!("summary of {} chars", content.len())
    }
}

fn student() -> Profile {
    Profile::new("Asha", "11th", Stream::Science, 3)
}

fn shell_with(
    conn: rusqlite::Connection,
    advisor: Arc<dyn StudyAdvisor>,
    notifier: Arc<RecordingNotifier>,
) -> AppShell {
    AppShell::new(conn, advisor, notifier, Some(Duration::from_secs(60))).unwrap()
}

#[test]
fn fresh_store_starts_in_onboarding() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut shell = shell_with(
        open_db_in_memory().unwrap(),
        Arc::new(StaticAdvisor),
        notifier.clone(),
    );

    assert_eq!(shell.phase(), &AppPhase::Onboarding);
    assert!(!shell.activate());
    assert_eq!(*notifier.permission_requests.lock().unwrap(), 0);
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    assert_eq!(shell.dashboard(today).unwrap(), None);
}

#[test]
fn onboarding_persists_profile_and_notifies() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.sqlite3");
    let notifier = Arc::new(RecordingNotifier::default());

    {
        let mut shell = shell_with(open_db(&path).unwrap(), Arc::new(StaticAdvisor), notifier.clone());
        shell.complete_onboarding(student()).unwrap();
        assert_eq!(shell.phase(), &AppPhase::Active(student()));
    }
    assert_eq!(
        notifier.sent.lock().unwrap().as_slice(),
        &[(ONBOARDING_TITLE.to_string(), ONBOARDING_BODY.to_string())]
    );

    let reopened = shell_with(open_db(&path).unwrap(), Arc::new(StaticAdvisor), notifier);
    assert_eq!(reopened.profile(), Some(&student()));
}

#[test]
fn invalid_profile_keeps_onboarding_phase() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut shell = shell_with(
        open_db_in_memory().unwrap(),
        Arc::new(StaticAdvisor),
        notifier.clone(),
    );

    let err = shell
        .complete_onboarding(Profile::new("Asha", "8th", Stream::Arts, 2))
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(shell.phase(), &AppPhase::Onboarding);
    assert!(notifier.sent.lock().unwrap().is_empty());
    assert_eq!(shell.storage().load_profile().unwrap(), None);
}

#[test]
fn profile_edit_updates_active_phase() {
    let mut shell = shell_with(
        open_db_in_memory().unwrap(),
        Arc::new(StaticAdvisor),
        Arc::new(RecordingNotifier::default()),
    );
    shell.complete_onboarding(student()).unwrap();

    let edited = Profile::new("Asha R", "12th", Stream::Science, 4);
    shell.update_profile(edited.clone()).unwrap();
    assert_eq!(shell.profile(), Some(&edited));
    assert_eq!(shell.storage().load_profile().unwrap(), Some(edited));
}

#[tokio::test]
async fn activate_and_teardown_are_idempotent() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut shell = shell_with(
        open_db_in_memory().unwrap(),
        Arc::new(StaticAdvisor),
        notifier.clone(),
    );
    shell.complete_onboarding(student()).unwrap();

    assert!(shell.activate());
    assert!(shell.activate());
    assert!(shell.is_chiming());
    assert_eq!(*notifier.permission_requests.lock().unwrap(), 1);

    shell.teardown();
    shell.teardown();
    assert!(!shell.is_active());
    assert!(!shell.is_chiming());
    assert!(!shell.advice_board().is_open());
}

#[tokio::test]
async fn clear_all_data_returns_to_onboarding() {
    let mut shell = shell_with(
        open_db_in_memory().unwrap(),
        Arc::new(StaticAdvisor),
        Arc::new(RecordingNotifier::default()),
    );
    shell.complete_onboarding(student()).unwrap();
    shell.tasks().unwrap().create(TaskDraft::new("Homework")).unwrap();
    shell.activate();

    shell.clear_all_data().unwrap();

    assert_eq!(shell.phase(), &AppPhase::Onboarding);
    assert!(!shell.is_chiming());
    assert!(shell.tasks().unwrap().tasks().is_empty());
    assert_eq!(shell.storage().load_profile().unwrap(), None);
}

#[tokio::test]
async fn dashboard_advice_uses_first_pending_task_and_is_truncated() {
    let long_reply = (1..=40)
        .map(|n| format!("word{n}"))
        .collect::<Vec<_>>()
        .join(" ");
    let advisor = Arc::new(ScriptedAdvisor::replying(&long_reply));
    let mut shell = shell_with(
        open_db_in_memory().unwrap(),
        advisor.clone(),
        Arc::new(RecordingNotifier::default()),
    );
    shell.complete_onboarding(student()).unwrap();
    {
        let mut tasks = shell.tasks().unwrap();
        for title in ["Essay", "Lab report", "Flashcards", "Past paper"] {
            tasks.create(TaskDraft::new(title)).unwrap();
        }
    }

    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let dashboard = shell.dashboard(today).unwrap().unwrap();
    assert_eq!(dashboard.greeting_name, "Asha");
    assert_eq!(dashboard.pending_total, 4);
    assert_eq!(dashboard.pending_preview.len(), 3);

    let advice = shell.refresh_advice(&dashboard).await.unwrap();
    assert_eq!(
        advisor.seen_topics.lock().unwrap().as_slice(),
        &[vec!["Essay".to_string()]]
    );
    assert_eq!(advice.split_whitespace().count(), 28);
    assert!(advice.ends_with("word28..."));
    assert_eq!(shell.advice_board().current(), advice);
}

#[tokio::test]
async fn advice_arriving_after_teardown_is_discarded() {
    let mut shell = shell_with(
        open_db_in_memory().unwrap(),
        Arc::new(ScriptedAdvisor::replying("Keep going")),
        Arc::new(RecordingNotifier::default()),
    );
    shell.complete_onboarding(student()).unwrap();
    shell.activate();
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let dashboard = shell.dashboard(today).unwrap().unwrap();

    let handle = shell.spawn_advice_refresh(&dashboard).unwrap();
    shell.teardown();

    assert!(!handle.await.unwrap());
    assert_eq!(shell.advice_board().current(), ADVICE_PLACEHOLDER);
}

#[tokio::test]
async fn summarize_delegates_to_advisor() {
    let shell = shell_with(
        open_db_in_memory().unwrap(),
        Arc::new(ScriptedAdvisor::replying("unused")),
        Arc::new(RecordingNotifier::default()),
    );
    assert_eq!(shell.summarize_note("cells").await, "summary of 5 chars");
}

#[tokio::test]
async fn advice_requested_after_teardown_waits_for_reactivation() {
    let mut shell = shell_with(
        open_db_in_memory().unwrap(),
        Arc::new(ScriptedAdvisor::replying("Plan the week")),
        Arc::new(RecordingNotifier::default()),
    );
    shell.complete_onboarding(student()).unwrap();
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let dashboard = shell.dashboard(today).unwrap().unwrap();

    shell.activate();
    shell.teardown();
    assert_eq!(shell.refresh_advice(&dashboard).await, None);
    let handle = shell.spawn_advice_refresh(&dashboard).unwrap();
    assert!(!handle.await.unwrap());
    assert_eq!(shell.advice_board().current(), ADVICE_PLACEHOLDER);

    shell.activate();
    assert_eq!(
        shell.refresh_advice(&dashboard).await.as_deref(),
        Some("Plan the week")
    );
}
