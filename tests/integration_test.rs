use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use course_survey::models::{questions, CourseField, FieldPath, TextField};
use course_survey::{
    FieldUpdate, FormValues, Status, SubmissionController, SubmitOutcome, SurveyPayload,
    Transport, TransportError,
};
use futures::future::BoxFuture;
use tokio::sync::Notify;
use tokio_test::{assert_pending, assert_ready, task};

/// 记录调用的提交通道替身
struct RecordingTransport {
    calls: AtomicUsize,
    sent: Mutex<Vec<(SurveyPayload, DateTime<Utc>)>>,
    fail: bool,
    gate: Option<Arc<Notify>>,
}

impl RecordingTransport {
    fn succeeding() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
            fail: false,
            gate: None,
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::succeeding()
        }
    }

    fn gated(gate: Arc<Notify>, fail: bool) -> Self {
        Self {
            fail,
            gate: Some(gate),
            ..Self::succeeding()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn sent(&self) -> Vec<(SurveyPayload, DateTime<Utc>)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    fn submit<'a>(&'a self, payload: &'a SurveyPayload) -> BoxFuture<'a, Result<(), TransportError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sent
                .lock()
                .unwrap()
                .push((payload.clone(), Utc::now()));

            if let Some(gate) = &self.gate {
                gate.notified().await;
            }

            if self.fail {
                Err(TransportError::other("connection reset by peer"))
            } else {
                Ok(())
            }
        })
    }
}

/// 每道题评分为 (index % 5) + 1
fn score_for(index: usize) -> u8 {
    (index % 5) as u8 + 1
}

async fn fill_valid<T: Transport>(controller: &SubmissionController<T>) {
    let course = [
        (CourseField::AcademicYear, "2025/2026"),
        (CourseField::Semester, "First"),
        (CourseField::CourseName, "Data Structures"),
        (CourseField::CourseCode, "CS201"),
        (CourseField::Instructor, "Dr. Mona Adel"),
        (CourseField::TeachingAssistant, "Omar Khaled"),
    ];
    for (field, value) in course {
        controller
            .set_field(FieldUpdate::Course(field, value.to_string()))
            .await
            .unwrap();
    }
    for index in 0..questions().len() {
        controller
            .set_field(FieldUpdate::Score {
                index,
                value: score_for(index),
            })
            .await
            .unwrap();
    }
    controller
        .set_field(FieldUpdate::Comment {
            index: 3,
            text: "Office hours were hard to find".to_string(),
        })
        .await
        .unwrap();
    controller
        .set_field(FieldUpdate::ImprovementSuggestions(
            "More worked examples".to_string(),
        ))
        .await
        .unwrap();
    controller
        .set_field(FieldUpdate::OtherSuggestions("Nothing else".to_string()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_empty_course_info_blocks_submission() {
    let transport = Arc::new(RecordingTransport::succeeding());
    let controller = SubmissionController::new(transport.clone());
    fill_valid(&controller).await;
    for field in CourseField::ALL {
        controller
            .set_field(FieldUpdate::Course(field, String::new()))
            .await
            .unwrap();
    }

    let outcome = controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(transport.calls(), 0);

    let errors = controller.errors().await;
    let messages: Vec<(FieldPath, String)> = errors
        .iter()
        .map(|(path, message)| (path, message.to_string()))
        .collect();
    let expected: Vec<(FieldPath, String)> = CourseField::ALL
        .into_iter()
        .map(|field| {
            (
                FieldPath::Text(TextField::Course(field)),
                format!("{} required", field.label()),
            )
        })
        .collect();
    assert_eq!(messages, expected);
    assert_ne!(controller.status().await, Status::Submitting);
}

#[tokio::test]
async fn test_valid_submission_sends_one_ordered_payload() {
    let transport = Arc::new(RecordingTransport::succeeding());
    let controller = SubmissionController::new(transport.clone());
    fill_valid(&controller).await;

    let outcome = controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert!(controller.errors().await.is_empty());
    assert_eq!(transport.calls(), 1);

    let sent = transport.sent();
    let payload = &sent[0].0;
    assert_eq!(payload.responses.len(), 12);
    for (i, (entry, descriptor)) in payload.responses.iter().zip(questions()).enumerate() {
        assert_eq!(entry.question_id, descriptor.id);
        assert_eq!(entry.score.value(), score_for(i));
    }
    assert_eq!(payload.responses[3].comment, "Office hours were hard to find");
    assert_eq!(payload.course_info.course_code, "CS201");
}

#[tokio::test]
async fn test_success_resets_form() {
    let transport = Arc::new(RecordingTransport::succeeding());
    let controller = SubmissionController::new(transport.clone());
    fill_valid(&controller).await;

    controller.submit().await;

    assert_eq!(controller.status().await, Status::Success);
    assert_eq!(controller.values().await, FormValues::empty());
    assert!(controller.errors().await.is_empty());
    assert_eq!(
        controller.notice().await,
        Some(course_survey::models::status::SUCCESS_NOTICE)
    );
}

#[tokio::test]
async fn test_failure_keeps_values() {
    let transport = Arc::new(RecordingTransport::failing());
    let controller = SubmissionController::new(transport.clone());
    fill_valid(&controller).await;
    let before = controller.values().await;

    let outcome = controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(controller.status().await, Status::Error);
    assert_eq!(controller.values().await, before);

    let notice = controller.notice().await.unwrap();
    assert_eq!(notice, course_survey::models::status::FAILURE_NOTICE);
    assert!(!notice.contains("connection reset"));
}

#[tokio::test]
async fn test_failure_allows_resubmit() {
    let transport = Arc::new(RecordingTransport::failing());
    let controller = SubmissionController::new(transport.clone());
    fill_valid(&controller).await;
    assert_eq!(controller.submit().await, SubmitOutcome::Failed);

    // Error 之后无需重新填写即可再次进入 Submitting
    assert_eq!(controller.submit().await, SubmitOutcome::Failed);
    assert_eq!(transport.calls(), 2);

    let sent = transport.sent();
    assert_eq!(sent[0].0.responses, sent[1].0.responses);
    assert!(sent[0].0.submitted_at <= sent[1].0.submitted_at);
}

#[tokio::test]
async fn test_controller_with_existing_store() {
    let mut store = course_survey::FormStore::mount();
    store
        .set_field(FieldUpdate::Score { index: 0, value: 4 })
        .unwrap();
    let controller = SubmissionController::with_store(
        Arc::new(RecordingTransport::succeeding()),
        store,
    );

    assert_eq!(controller.values().await.answered_count(), 1);
    assert_eq!(controller.submit().await, SubmitOutcome::Invalid);
    assert_eq!(controller.transport().calls(), 0);
}

#[tokio::test]
async fn test_invalid_after_success_clears_notice() {
    let transport = Arc::new(RecordingTransport::succeeding());
    let controller = SubmissionController::new(transport.clone());
    fill_valid(&controller).await;
    controller.submit().await;
    assert!(controller.notice().await.is_some());

    // 成功后表单已清空，再次提交必然校验失败
    assert_eq!(controller.submit().await, SubmitOutcome::Invalid);
    assert_eq!(controller.notice().await, None);
    assert_eq!(transport.calls(), 1);
}

#[test]
fn test_second_submit_while_submitting_is_ignored() {
    let gate = Arc::new(Notify::new());
    let transport = Arc::new(RecordingTransport::gated(gate.clone(), false));
    let controller = SubmissionController::new(transport.clone());
    tokio_test::block_on(fill_valid(&controller));

    let mut first = task::spawn(controller.submit());
    assert_pending!(first.poll());
    assert_eq!(transport.calls(), 1);
    assert_eq!(tokio_test::block_on(controller.status()), Status::Submitting);

    let second = tokio_test::block_on(controller.submit());
    assert_eq!(second, SubmitOutcome::AlreadySubmitting);
    assert_eq!(transport.calls(), 1);

    gate.notify_one();
    let outcome = assert_ready!(first.poll());
    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(transport.calls(), 1);
    assert_eq!(tokio_test::block_on(controller.status()), Status::Success);
}

#[test]
fn test_edits_during_flight_do_not_touch_sent_payload() {
    let gate = Arc::new(Notify::new());
    let transport = Arc::new(RecordingTransport::gated(gate.clone(), true));
    let controller = SubmissionController::new(transport.clone());
    tokio_test::block_on(fill_valid(&controller));

    let mut first = task::spawn(controller.submit());
    assert_pending!(first.poll());

    tokio_test::block_on(controller.set_field(FieldUpdate::Course(
        CourseField::CourseName,
        "Algorithms".to_string(),
    )))
    .unwrap();

    gate.notify_one();
    assert_eq!(assert_ready!(first.poll()), SubmitOutcome::Failed);

    let sent = transport.sent();
    assert_eq!(sent[0].0.course_info.course_name, "Data Structures");
    let values = tokio_test::block_on(controller.values());
    assert_eq!(values.course_info.course_name, "Algorithms");
}

#[tokio::test]
async fn test_submitted_at_is_between_mount_and_transport_call() {
    let transport = Arc::new(RecordingTransport::succeeding());
    let controller = SubmissionController::new(transport.clone());
    let mounted_at = controller.mounted_at().await;
    fill_valid(&controller).await;

    controller.submit().await;

    let (payload, invoked_at) = transport.sent().remove(0);
    assert!(payload.submitted_at >= mounted_at);
    assert!(payload.submitted_at <= invoked_at);

    let json = serde_json::to_value(&payload).unwrap();
    let raw = json["submitted_at"].as_str().unwrap();
    let parsed = DateTime::parse_from_rfc3339(raw).unwrap();
    assert_eq!(parsed.with_timezone(&Utc), payload.submitted_at);
}

/// 永不返回、只计数的提交通道
#[derive(Default)]
struct StalledTransport {
    calls: AtomicUsize,
}

impl Transport for StalledTransport {
    fn submit<'a>(&'a self, _payload: &'a SurveyPayload) -> BoxFuture<'a, Result<(), TransportError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(futures::future::pending())
    }
}

#[tokio::test]
async fn test_timed_out_submit_can_be_retried() {
    let transport = Arc::new(StalledTransport::default());
    let controller = SubmissionController::new(transport.clone());
    fill_valid(&controller).await;
    let before = controller.values().await;

    let first = tokio::time::timeout(Duration::from_millis(50), controller.submit()).await;
    assert!(first.is_err());

    assert_eq!(controller.status().await, Status::Error);
    assert_eq!(controller.values().await, before);
    assert!(controller.notice().await.is_some());

    // 不再卡在 Submitting，第二次提交会真正调用提交通道
    let second = tokio::time::timeout(Duration::from_millis(50), controller.submit()).await;
    assert!(second.is_err());
    assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    assert_eq!(controller.status().await, Status::Error);
}
