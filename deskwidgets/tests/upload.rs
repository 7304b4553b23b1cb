use std::sync::{Arc, Mutex};

use deskwidgets::upload::{DRAG_ACTIVE_CLASS, file_info, to_upload_file};
use deskwidgets::{Notifier, ProgressIndicator, ProgressState, UploadBinding};
use deskwidgets::prelude::{bind_drop_zone, bind_file_input, upload_with_progress};
use gateway_lib::{FileInfo, GatewayClient, UploadError, UploadOptions, UploadPolicy};
use tokio::net::TcpListener;
use widgetdom::{Document, DomError, DroppedFile, Element, Event, ROOT_ID};

#[derive(Default)]
struct Recorder {
    accepted: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl Recorder {
    fn accepted(&self) -> Vec<String> {
        self.accepted.lock().unwrap().clone()
    }

    fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for Recorder {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

fn document() -> Document {
    let doc = Document::new();
    doc.append(ROOT_ID, Element::div().id("zone")).unwrap();
    doc.append(ROOT_ID, Element::file_input().id("picker")).unwrap();
    doc.append(ROOT_ID, Element::div().id("uploads")).unwrap();
    doc
}

fn bind_zone(doc: &Document, policy: UploadPolicy) -> (Arc<Recorder>, UploadBinding) {
    let recorder = Arc::new(Recorder::default());
    let sink = recorder.clone();
    let binding = bind_drop_zone(doc, "zone", policy, recorder.clone(), move |file| {
        sink.accepted.lock().unwrap().push(file.name);
    })
    .unwrap();
    (recorder, binding)
}

fn drop_on(target: &str, files: Vec<DroppedFile>) -> Event {
    Event::Drop {
        target: Some(target.into()),
        x: 0,
        y: 0,
        files,
    }
}

fn pdf() -> DroppedFile {
    DroppedFile::new("report.pdf", "application/pdf", vec![0; 2048])
}

// ============================================================================
// Drop Zone
// ============================================================================

#[test]
fn test_drag_toggles_active_class() {
    let doc = document();
    let (_recorder, _binding) = bind_zone(&doc, UploadPolicy::default());

    let outcome = doc.dispatch(Event::DragEnter {
        target: Some("zone".into()),
        x: 0,
        y: 0,
    });
    assert!(outcome.default_prevented);
    assert!(doc.has_class("zone", DRAG_ACTIVE_CLASS));

    let outcome = doc.dispatch(Event::DragOver {
        target: Some("zone".into()),
        x: 1,
        y: 1,
    });
    assert!(outcome.default_prevented);

    doc.dispatch(Event::DragLeave {
        target: Some("zone".into()),
        x: 0,
        y: 0,
    });
    assert!(!doc.has_class("zone", DRAG_ACTIVE_CLASS));
}

#[test]
fn test_valid_drop_reaches_callback() {
    let doc = document();
    let (recorder, _binding) = bind_zone(&doc, UploadPolicy::default());
    doc.add_class("zone", DRAG_ACTIVE_CLASS).unwrap();

    let outcome = doc.dispatch(drop_on("zone", vec![pdf()]));

    assert!(outcome.default_prevented);
    assert!(!doc.has_class("zone", DRAG_ACTIVE_CLASS));
    assert_eq!(recorder.accepted(), vec!["report.pdf"]);
    assert!(recorder.alerts().is_empty());
}

#[test]
fn test_only_first_file_is_considered() {
    let doc = document();
    let (recorder, _binding) = bind_zone(&doc, UploadPolicy::default());

    let second = DroppedFile::new("notes.txt", "text/plain", b"hi".to_vec());
    doc.dispatch(drop_on("zone", vec![pdf(), second]));

    assert_eq!(recorder.accepted(), vec!["report.pdf"]);
}

#[test]
fn test_rejected_drop_alerts_user() {
    let doc = document();
    let (recorder, _binding) = bind_zone(&doc, UploadPolicy::default());

    let archive = DroppedFile::new("backup.zip", "application/zip", vec![1, 2, 3]);
    doc.dispatch(drop_on("zone", vec![archive]));

    assert!(recorder.accepted().is_empty());
    assert_eq!(
        recorder.alerts(),
        vec!["File type not supported: application/zip"]
    );
}

#[test]
fn test_oversized_drop_alerts_user() {
    let doc = document();
    let (recorder, _binding) = bind_zone(&doc, UploadPolicy::default().with_max_size(1024));

    doc.dispatch(drop_on("zone", vec![pdf()]));

    assert!(recorder.accepted().is_empty());
    assert_eq!(
        recorder.alerts(),
        vec!["File size 2.0 KB exceeds the maximum of 1.0 KB"]
    );
}

#[test]
fn test_empty_drop_is_ignored() {
    let doc = document();
    let (recorder, _binding) = bind_zone(&doc, UploadPolicy::default());

    doc.dispatch(drop_on("zone", Vec::new()));

    assert!(recorder.accepted().is_empty());
    assert!(recorder.alerts().is_empty());
}

#[test]
fn test_unbind_detaches_listeners() {
    let doc = document();
    let (recorder, binding) = bind_zone(&doc, UploadPolicy::default());
    assert_eq!(doc.listener_count_for("zone"), 4);
    doc.add_class("zone", DRAG_ACTIVE_CLASS).unwrap();

    binding.unbind();
    binding.unbind();

    assert!(!binding.is_bound());
    assert_eq!(doc.listener_count_for("zone"), 0);
    assert!(!doc.has_class("zone", DRAG_ACTIVE_CLASS));
    doc.dispatch(drop_on("zone", vec![pdf()]));
    assert!(recorder.accepted().is_empty());
}

#[test]
fn test_bind_to_missing_node_fails() {
    let doc = document();
    let err = bind_drop_zone(
        &doc,
        "nowhere",
        UploadPolicy::default(),
        Arc::new(|_: &str| {}),
        |_| {},
    )
    .unwrap_err();
    assert_eq!(err, DomError::NodeNotFound("nowhere".into()));
}

// ============================================================================
// File Input
// ============================================================================

#[test]
fn test_file_input_validates_selection() {
    let doc = document();
    let recorder = Arc::new(Recorder::default());
    let sink = recorder.clone();
    let binding = bind_file_input(
        &doc,
        "picker",
        UploadPolicy::default(),
        recorder.clone(),
        move |file| sink.accepted.lock().unwrap().push(file.name),
    )
    .unwrap();

    doc.dispatch(Event::Change {
        target: "picker".into(),
        files: vec![pdf()],
    });
    doc.dispatch(Event::Change {
        target: "picker".into(),
        files: vec![DroppedFile::new("a.exe", "application/x-msdownload", vec![0])],
    });

    assert_eq!(recorder.accepted(), vec!["report.pdf"]);
    assert_eq!(recorder.alerts().len(), 1);

    binding.unbind();
    assert_eq!(doc.listener_count_for("picker"), 0);
}

#[test]
fn test_dropped_file_conversions() {
    let info = file_info(&pdf());
    assert_eq!(info, FileInfo::new("report.pdf", "application/pdf", 2048));

    let upload = to_upload_file(pdf());
    assert_eq!(upload.name, "report.pdf");
    assert_eq!(upload.size(), 2048);
}

// ============================================================================
// Progress Indicator
// ============================================================================

fn indicator(doc: &Document) -> ProgressIndicator {
    let info = FileInfo::new("report.pdf", "application/pdf", 2048);
    ProgressIndicator::mount(doc, "uploads", &info).unwrap()
}

fn label_of(doc: &Document, progress: &ProgressIndicator) -> String {
    let children = doc.children(progress.id());
    doc.inner_markup(children.last().unwrap()).unwrap()
}

#[test]
fn test_progress_renders_file_details() {
    let doc = document();
    let progress = indicator(&doc);

    let markup = doc.outer_markup(progress.id()).unwrap();
    assert!(markup.contains("report.pdf"));
    assert!(markup.contains("PDF · 2.0 KB"));
    assert!(markup.contains("width: 0%"));
    assert_eq!(progress.state(), ProgressState::InProgress(0));
}

#[test]
fn test_progress_update_clamps() {
    let doc = document();
    let progress = indicator(&doc);

    assert!(progress.update(42.4));
    assert_eq!(progress.state(), ProgressState::InProgress(42));
    assert_eq!(label_of(&doc, &progress), "42%");
    assert_eq!(doc.attr(progress.id(), "aria-valuenow").as_deref(), Some("42"));

    progress.update(250.0);
    assert_eq!(progress.state(), ProgressState::InProgress(100));
    progress.update(-3.0);
    assert_eq!(progress.state(), ProgressState::InProgress(0));
}

#[test]
fn test_progress_completion_is_write_once() {
    let doc = document();
    let progress = indicator(&doc);
    progress.update(30.0);

    assert!(progress.complete(true, None));
    assert_eq!(progress.state(), ProgressState::Succeeded);
    assert!(doc.has_class(progress.id(), "success"));
    assert_eq!(label_of(&doc, &progress), "Upload complete");
    assert!(doc.outer_markup(progress.id()).unwrap().contains("width: 100%"));

    assert!(!progress.complete(false, Some("late failure")));
    assert!(!progress.update(10.0));
    assert_eq!(progress.state(), ProgressState::Succeeded);
    assert!(!doc.has_class(progress.id(), "error"));
    assert_eq!(label_of(&doc, &progress), "Upload complete");
}

#[test]
fn test_progress_failure_fills_bar() {
    let doc = document();
    let progress = indicator(&doc);

    progress.complete(false, Some("Disk full"));

    assert_eq!(progress.state(), ProgressState::Failed);
    assert!(doc.has_class(progress.id(), "error"));
    assert_eq!(label_of(&doc, &progress), "Disk full");
    assert!(doc.outer_markup(progress.id()).unwrap().contains("width: 100%"));
}

#[test]
fn test_progress_remove() {
    let doc = document();
    let progress = indicator(&doc);
    progress.remove().unwrap();
    assert!(doc.children("uploads").is_empty());
}

// ============================================================================
// Upload With Progress
// ============================================================================

#[tokio::test]
async fn test_rejected_upload_marks_progress_failed() {
    let doc = document();
    let progress = indicator(&doc);
    let client = GatewayClient::builder()
        .policy(UploadPolicy::default().with_max_size(1024))
        .build()
        .unwrap();

    let result =
        upload_with_progress(&client, &to_upload_file(pdf()), &UploadOptions::new(), &progress)
            .await;

    assert!(matches!(result, Err(UploadError::Rejected(_))));
    assert_eq!(progress.state(), ProgressState::Failed);
    assert_eq!(
        label_of(&doc, &progress),
        "File size 2.0 KB exceeds the maximum of 1.0 KB"
    );
}

#[tokio::test]
async fn test_transport_failure_marks_progress_failed() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let doc = document();
    let progress = indicator(&doc);
    let client = GatewayClient::builder()
        .base_url(format!("http://{addr}"))
        .build()
        .unwrap();

    let result =
        upload_with_progress(&client, &to_upload_file(pdf()), &UploadOptions::new(), &progress)
            .await;

    assert!(result.unwrap_err().is_transport());
    assert_eq!(progress.state(), ProgressState::Failed);
    assert!(doc.has_class(progress.id(), "error"));
}
