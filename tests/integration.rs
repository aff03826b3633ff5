// SPDX-License-Identifier: MPL-2.0
//! End-to-end editing flows through the public API.

use image_rs::{ImageFormat, Rgba, RgbaImage};
use pixel_studio::app::{script, App};
use pixel_studio::application::port::{ImageProcessor, OperationDescriptor};
use pixel_studio::config::Config;
use pixel_studio::domain::editing::{Operation, OperationParams};
use pixel_studio::domain::error::ProcessingError;
use pixel_studio::media::{ImageKind, ImageRef};
use pixel_studio::session::{Event, InteractionMode, Message, SourcePolicy};
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    RgbaImage::from_pixel(width, height, Rgba([200, 100, 50, 255]))
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("encode png");
    bytes.into_inner()
}

/// Returns a derived copy of the source and records what it was asked to do.
#[derive(Clone, Default)]
struct RecordingProcessor {
    calls: Arc<Mutex<Vec<(u64, OperationDescriptor)>>>,
    reject_with: Option<u16>,
}

impl RecordingProcessor {
    fn calls(&self) -> Vec<(u64, OperationDescriptor)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ImageProcessor for RecordingProcessor {
    async fn submit(
        &self,
        image: &ImageRef,
        descriptor: &OperationDescriptor,
        _timeout: Duration,
    ) -> Result<ImageRef, ProcessingError> {
        self.calls
            .lock()
            .unwrap()
            .push((image.id(), descriptor.clone()));
        if let Some(status) = self.reject_with {
            return Err(ProcessingError::ServerRejected(status));
        }
        ImageRef::derived(image.bytes().to_vec())
            .map_err(|err| ProcessingError::MalformedResponse(err.to_string()))
    }
}

async fn run_script(app: &mut App<RecordingProcessor>, specs: &[&str]) -> Vec<Event> {
    let mut events = Vec::new();
    for spec in specs {
        for message in script::parse(spec).expect("valid spec") {
            events.push(app.dispatch(message).await);
        }
    }
    events
}

#[tokio::test]
async fn scripted_session_builds_expected_history() {
    let processor = RecordingProcessor::default();
    let mut app = App::new(processor.clone(), &Config::default());
    let source = ImageRef::original(png(40, 30)).unwrap();
    app.dispatch(Message::SelectSource(source.clone())).await;

    run_script(&mut app, &["gray", "negative", "undo", "rotate:angle=90"]).await;

    let session = app.session();
    let ops: Vec<_> = session
        .ledger()
        .entries()
        .iter()
        .map(|entry| entry.operation().clone())
        .collect();
    assert_eq!(ops, vec![Operation::Gray, Operation::Rotate]);
    assert_eq!(session.ledger().cursor(), Some(1));
    assert_eq!(
        session.current_image().map(ImageRef::kind),
        Some(ImageKind::Derived)
    );

    let calls = processor.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].0, source.id());
    let gray_id = session.ledger().entries()[0].image().id();
    assert_eq!(calls[2].0, gray_id, "rotate composes on the gray result");
    assert_eq!(calls[2].1.params, OperationParams::Rotate { angle: 90.0 });
}

#[tokio::test]
async fn perspective_always_uses_original() {
    let processor = RecordingProcessor::default();
    let mut app = App::new(processor.clone(), &Config::default());
    let source = ImageRef::original(png(1000, 800)).unwrap();
    app.dispatch(Message::SelectSource(source.clone())).await;

    run_script(
        &mut app,
        &["gray", "perspective:0.25,0.25;0.75,0.25;0.75,0.75;0.25,0.75"],
    )
    .await;

    let calls = processor.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].0, source.id());
    let fields = calls[1].1.fields();
    let points = fields
        .iter()
        .find(|(name, _)| *name == "points")
        .map(|(_, value)| value.clone())
        .expect("points field");
    let parsed: Vec<[f64; 2]> = serde_json::from_str(&points).unwrap();
    assert_eq!(
        parsed,
        vec![[250.0, 200.0], [750.0, 200.0], [750.0, 600.0], [250.0, 600.0]]
    );
    assert_eq!(app.session().interaction_mode(), &InteractionMode::Idle);
    assert_eq!(app.session().ledger().len(), 2);
}

#[tokio::test]
async fn rejected_requests_keep_history_and_surface_error() {
    let processor = RecordingProcessor {
        reject_with: Some(422),
        ..RecordingProcessor::default()
    };
    let mut app = App::new(processor, &Config::default());
    let source = ImageRef::original(png(10, 10)).unwrap();
    app.dispatch(Message::SelectSource(source.clone())).await;

    let events = run_script(&mut app, &["gray"]).await;

    assert!(matches!(
        events.as_slice(),
        [Event::ProcessingFailed(ProcessingError::ServerRejected(422))]
    ));
    assert!(app.session().ledger().is_empty());
    assert_eq!(app.session().current_image(), Some(&source));
    assert_eq!(
        app.session().last_error(),
        Some(&ProcessingError::ServerRejected(422))
    );
}

#[tokio::test]
async fn config_drives_source_policy_and_preserve_flag() {
    let mut config = Config::default();
    config.editing.source_policy = SourcePolicy::AlwaysOriginal;
    config.editing.preserve_original = false;

    let processor = RecordingProcessor::default();
    let mut app = App::new(processor.clone(), &config);
    let source = ImageRef::original(png(10, 10)).unwrap();
    app.dispatch(Message::SelectSource(source.clone())).await;

    run_script(&mut app, &["gray", "sobel"]).await;

    for (image_id, descriptor) in processor.calls() {
        assert_eq!(image_id, source.id());
        assert!(!descriptor.preserve_original);
    }
}

#[tokio::test]
async fn invalid_parameters_never_reach_the_processor() {
    let processor = RecordingProcessor::default();
    let mut app = App::new(processor.clone(), &Config::default());
    app.dispatch(Message::SelectSource(ImageRef::original(png(10, 10)).unwrap()))
        .await;

    let events = run_script(&mut app, &["rotate:sigma=2", "rotate:angle=wide"]).await;

    assert!(events
        .iter()
        .all(|event| matches!(event, Event::ParameterRejected(_))));
    assert!(processor.calls().is_empty());
}

#[test]
fn current_image_can_be_saved() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("out").join("result.png");
    let image = ImageRef::derived(png(3, 3)).unwrap();

    image.save_to_path(&path).expect("save");
    let reopened = ImageRef::open(&path).expect("reopen");
    assert_eq!((reopened.width(), reopened.height()), (3, 3));
    assert_eq!(reopened.kind(), ImageKind::Original);
}
