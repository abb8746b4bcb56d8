//! Home screen view model.

use super::ServiceResult;
use crate::model::exam::ExamRecord;
use crate::model::profile::Profile;
use crate::model::task::Task;
use crate::model::timetable::{ClassSession, Weekday};
use crate::repo::kv_repo::KvStore;
use crate::repo::storage::Storage;
use crate::views::calendar::{daily_motivation, todays_classes, weekday_of};
use crate::views::filters::pending_tasks;
use crate::views::grading::latest_exam;
use chrono::NaiveDate;

/// Pending tasks listed on the home screen.
pub const PENDING_PREVIEW_LIMIT: usize = 3;
/// Pending task titles sent along with an advice request.
pub const ADVICE_TOPIC_LIMIT: usize = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct HomeDashboard {
    pub greeting_name: String,
    pub weekday: Weekday,
    pub motivation: &'static str,
    /// Ordered by start time.
    pub todays_classes: Vec<ClassSession>,
    pub pending_total: usize,
    pub pending_preview: Vec<Task>,
    pub latest_exam: Option<ExamRecord>,
    /// Titles to ground the advice request on.
    pub advice_topics: Vec<String>,
}

impl HomeDashboard {
    /// Reads the timetable, tasks and marks snapshots and composes the view.
    pub fn load<S: KvStore>(
        storage: &Storage<S>,
        profile: &Profile,
        date: NaiveDate,
    ) -> ServiceResult<Self> {
        let classes = storage.load_collection::<ClassSession>()?;
        let tasks = storage.load_collection::<Task>()?;
        let exams = storage.load_collection::<ExamRecord>()?;
        Ok(compose_dashboard(profile, &classes, &tasks, &exams, date))
    }
}

pub fn compose_dashboard(
    profile: &Profile,
    classes: &[ClassSession],
    tasks: &[Task],
    exams: &[ExamRecord],
    date: NaiveDate,
) -> HomeDashboard {
    let pending = pending_tasks(tasks);
    HomeDashboard {
        greeting_name: profile.name.clone(),
        weekday: weekday_of(date),
        motivation: daily_motivation(date),
        todays_classes: todays_classes(classes, date).into_iter().cloned().collect(),
        pending_total: pending.len(),
        pending_preview: pending
            .iter()
            .take(PENDING_PREVIEW_LIMIT)
            .map(|task| (*task).clone())
            .collect(),
        latest_exam: latest_exam(exams).cloned(),
        advice_topics: pending
            .iter()
            .take(ADVICE_TOPIC_LIMIT)
            .map(|task| task.title.clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::compose_dashboard;
    use crate::model::profile::{Profile, Stream};
    use crate::model::task::TaskDraft;
    use crate::model::timetable::{ClassDraft, Weekday};
    use chrono::NaiveDate;

    #[test]
    fn dashboard_previews_pending_work_for_today() {
        let profile = Profile::new("Asha", "12th", Stream::Science, 4);
        let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let classes = vec![
            ClassDraft::new("Physics", Weekday::Sunday).into_session(),
            ClassDraft::new("Maths", Weekday::Monday).into_session(),
        ];
        let mut tasks: Vec<_> = ["Essay", "Lab", "Quiz", "Poster"]
            .into_iter()
            .map(|title| TaskDraft::new(title).into_task())
            .collect();
        tasks[0].is_completed = true;

        let dashboard = compose_dashboard(&profile, &classes, &tasks, &[], sunday);

        assert_eq!(dashboard.greeting_name, "Asha");
        assert_eq!(dashboard.weekday, Weekday::Sunday);
        assert_eq!(dashboard.todays_classes.len(), 1);
        assert_eq!(dashboard.pending_total, 3);
        assert_eq!(dashboard.pending_preview.len(), 3);
        assert_eq!(dashboard.advice_topics, ["Lab"]);
        assert!(dashboard.latest_exam.is_none());
    }
}
