use studydesk_core::db::open_db_in_memory;
use studydesk_core::model::exam::{ExamDraft, ExamPatch, Grade, SubjectMark};
use studydesk_core::model::ValidationError;
use studydesk_core::service::marks_service::MarksService;
use studydesk_core::{KvStore, ServiceError, SqliteKvStore, Storage};

#[test]
fn invalid_subjects_are_dropped_before_aggregation() {
    let conn = open_db_in_memory().unwrap();
    let mut marks = MarksService::open(Storage::new(SqliteKvStore::new(&conn))).unwrap();

    let exam = marks
        .create(ExamDraft::new(
            "Mid Term",
            vec![
                SubjectMark::new("Maths", 45.0, 50.0),
                SubjectMark::new("", 0.0, 0.0),
            ],
        ))
        .unwrap();

    assert_eq!(exam.subjects.len(), 1);
    assert_eq!(exam.total_percentage, 90.0);
    assert_eq!(exam.grade, Grade::APlus);
}

#[test]
fn exam_without_valid_subjects_is_rejected_and_store_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);
    let mut marks = MarksService::open(Storage::new(store)).unwrap();

    let err = marks
        .create(ExamDraft::new(
            "Unit Test",
            vec![
                SubjectMark::new("  ", 10.0, 20.0),
                SubjectMark::new("Chemistry", 5.0, 0.0),
            ],
        ))
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::NoValidSubjects)
    ));
    assert!(marks.exams().is_empty());
    assert_eq!(store.get_value("marks").unwrap(), None);
}

#[test]
fn non_finite_marks_never_reach_storage() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);
    let mut marks = MarksService::open(Storage::new(store)).unwrap();
    let mid = marks
        .create(ExamDraft::new(
            "Mid",
            vec![SubjectMark::new("Maths", 45.0, 50.0)],
        ))
        .unwrap();

    for bad in [
        SubjectMark::new("Physics", "NaN".parse().unwrap(), 50.0),
        SubjectMark::new("Physics", 40.0, "inf".parse().unwrap()),
    ] {
        let err = marks.create(ExamDraft::new("Bad", vec![bad])).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::NoValidSubjects)
        ));
    }

    let mixed = marks
        .create(ExamDraft::new(
            "Mixed",
            vec![
                SubjectMark::new("Chemistry", 30.0, 40.0),
                SubjectMark::new("Physics", f64::NAN, 50.0),
            ],
        ))
        .unwrap();
    assert_eq!(mixed.subjects.len(), 1);
    assert_eq!(mixed.total_percentage, 75.0);

    let reopened = MarksService::open(Storage::new(store)).unwrap();
    let ids: Vec<&str> = reopened.exams().iter().map(|exam| exam.id.as_str()).collect();
    assert_eq!(ids, [mid.id.as_str(), mixed.id.as_str()]);
    assert!(!store.get_value("marks").unwrap().unwrap().contains("null"));
}

#[test]
fn stored_record_uses_camel_case_shape() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);
    let mut marks = MarksService::open(Storage::new(store)).unwrap();
    marks
        .create(ExamDraft::new(
            "Unit Test",
            vec![SubjectMark::new("Biology", 30.0, 40.0)],
        ))
        .unwrap();

    let raw = store.get_value("marks").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let record = &value[0];
    assert_eq!(record["type"], "Unit Test");
    assert_eq!(record["totalPercentage"], 75.0);
    assert_eq!(record["grade"], "B");
    assert_eq!(record["subjects"][0]["name"], "Biology");
}

#[test]
fn patching_subjects_recomputes_grade() {
    let conn = open_db_in_memory().unwrap();
    let mut marks = MarksService::open(Storage::new(SqliteKvStore::new(&conn))).unwrap();
    let exam = marks
        .create(ExamDraft::new(
            "Unit Test",
            vec![SubjectMark::new("History", 20.0, 50.0)],
        ))
        .unwrap();
    assert_eq!(exam.grade, Grade::F);

    let updated = marks
        .update(
            &exam.id,
            ExamPatch {
                subjects: Some(vec![SubjectMark::new("History", 40.0, 50.0)]),
                ..ExamPatch::default()
            },
        )
        .unwrap()
        .unwrap();
    assert_eq!(updated.total_percentage, 80.0);
    assert_eq!(updated.grade, Grade::A);
}

#[test]
fn chart_and_latest_follow_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let mut marks = MarksService::open(Storage::new(SqliteKvStore::new(&conn))).unwrap();
    for (label, obtained) in [("T1", 50.0), ("T2", 60.0), ("T3", 70.0), ("T4", 80.0), ("T5", 90.0), ("T6", 100.0)] {
        marks
            .create(ExamDraft::new(label, vec![SubjectMark::new("Maths", obtained, 100.0)]))
            .unwrap();
    }

    let chart = marks.chart();
    assert_eq!(chart.len(), 5);
    assert_eq!(chart[0].label, "T2");
    assert_eq!(chart[4].value, 100);
    assert_eq!(marks.latest().unwrap().exam_type, "T6");

    let first_id = marks.exams()[0].id.clone();
    marks.delete(&first_id).unwrap();
    assert_eq!(marks.exams().len(), 5);
}
