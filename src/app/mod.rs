// SPDX-License-Identifier: MPL-2.0
//! Application driver: the single logical event queue.
//!
//! [`App`] feeds messages to the [`EditingSession`], runs any request the
//! session hands back against the [`ImageProcessor`], and routes the
//! completion back as [`Message::RequestFinished`]. This is the only place
//! that awaits; the session itself never suspends.

pub mod script;

use crate::application::port::ImageProcessor;
use crate::config::{Config, ServiceConfig};
use crate::session::{EditingSession, Event, Message, PendingRequest};
use std::time::Duration;
use tracing::debug;

/// Session plus the processor that serves its requests.
pub struct App<P> {
    session: EditingSession,
    processor: P,
    service: ServiceConfig,
}

impl<P: ImageProcessor> App<P> {
    /// Creates a driver with a fresh session configured from `config`.
    pub fn new(processor: P, config: &Config) -> Self {
        Self {
            session: EditingSession::new(config.editing.session_options()),
            processor,
            service: config.service.clone(),
        }
    }

    /// Handles one message to completion.
    ///
    /// When the message dispatches a request, it is awaited and settled
    /// before returning, so the returned event describes the outcome
    /// ([`Event::HistoryChanged`] or [`Event::ProcessingFailed`]).
    pub async fn dispatch(&mut self, message: Message) -> Event {
        match self.session.update(message) {
            Event::ProcessingRequested(request) => self.run(request).await,
            event => event,
        }
    }

    async fn run(&mut self, request: PendingRequest) -> Event {
        let timeout = self.timeout_for(&request);
        debug!(
            request = %request.id,
            operation = %request.descriptor.operation,
            timeout_secs = timeout.as_secs(),
            "submitting"
        );
        let result = self
            .processor
            .submit(&request.source, &request.descriptor, timeout)
            .await;
        self.session.update(Message::RequestFinished {
            id: request.id,
            result,
        })
    }

    fn timeout_for(&self, request: &PendingRequest) -> Duration {
        self.service
            .timeout_for(request.descriptor.operation.weight())
    }

    #[must_use]
    pub fn session(&self) -> &EditingSession {
        &self.session
    }

    #[must_use]
    pub fn processor(&self) -> &P {
        &self.processor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::editing::{NormalizedPoint, Operation, OperationParams, ParamValue};
    use crate::domain::error::ProcessingError;
    use crate::session::InteractionMode;
    use crate::test_utils::{original, MockProcessor};

    fn app() -> App<MockProcessor> {
        App::new(MockProcessor::new(), &Config::default())
    }

    async fn place_corners(app: &mut App<MockProcessor>) -> Vec<Event> {
        let mut events = Vec::new();
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            let point = NormalizedPoint::new(x, y).unwrap();
            events.push(app.dispatch(Message::AddPerspectivePoint(point)).await);
        }
        events
    }

    #[tokio::test]
    async fn apply_runs_request_and_records_history() {
        let mut app = app();
        app.dispatch(Message::SelectSource(original(20, 10))).await;

        let event = app
            .dispatch(Message::ApplyOperation {
                operation: Operation::Gray,
                overrides: Vec::new(),
            })
            .await;

        assert!(matches!(event, Event::HistoryChanged));
        assert_eq!(app.session().ledger().len(), 1);
        assert!(!app.session().is_busy());
        let submissions = app.processor().submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].timeout, Duration::from_secs(15));
        assert!(submissions[0].descriptor.preserve_original);
    }

    #[tokio::test]
    async fn heavy_operations_get_the_heavy_timeout() {
        let mut app = app();
        app.dispatch(Message::SelectSource(original(8, 8))).await;
        app.dispatch(Message::ApplyOperation {
            operation: Operation::LowPass,
            overrides: vec![("radius".to_string(), ParamValue::from(40))],
        })
        .await;

        let submissions = app.processor().submissions();
        assert_eq!(submissions[0].timeout, Duration::from_secs(30));
        assert_eq!(
            submissions[0].descriptor.params,
            OperationParams::Cutoff { radius: 40.0 }
        );
    }

    #[tokio::test]
    async fn streaming_never_submits() {
        let mut app = app();
        app.dispatch(Message::SelectSource(original(8, 8))).await;
        app.dispatch(Message::SelectOperation(Operation::Rotate)).await;
        for angle in [10, 20, 30, 45] {
            app.dispatch(Message::StreamAdjustment {
                key: "angle".into(),
                value: ParamValue::from(angle),
            })
            .await;
        }
        assert!(app.processor().submissions().is_empty());

        app.dispatch(Message::CommitAdjustment).await;
        let submissions = app.processor().submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(
            submissions[0].descriptor.params,
            OperationParams::Rotate { angle: 45.0 }
        );
    }

    #[tokio::test]
    async fn four_points_on_1000x800_send_one_scaled_request() {
        let mut app = app();
        let source = original(1000, 800);
        app.dispatch(Message::SelectSource(source.clone())).await;
        app.dispatch(Message::ApplyOperation {
            operation: Operation::Perspective,
            overrides: Vec::new(),
        })
        .await;

        let events = place_corners(&mut app).await;

        assert!(matches!(events[3], Event::HistoryChanged));
        let submissions = app.processor().submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].source, source);
        assert_eq!(submissions[0].timeout, Duration::from_secs(30));
        let OperationParams::Perspective { points } = &submissions[0].descriptor.params else {
            panic!("expected perspective params");
        };
        let pairs: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            pairs,
            vec![(0.0, 0.0), (1000.0, 0.0), (1000.0, 800.0), (0.0, 800.0)]
        );
        assert_eq!(app.session().interaction_mode(), &InteractionMode::Idle);
    }

    #[tokio::test]
    async fn failed_perspective_still_returns_to_idle() {
        let mut app = app();
        app.dispatch(Message::SelectSource(original(1000, 800))).await;
        app.dispatch(Message::ApplyOperation {
            operation: Operation::Perspective,
            overrides: Vec::new(),
        })
        .await;
        app.processor()
            .fail_next(ProcessingError::Network("timed out".into()));

        let events = place_corners(&mut app).await;

        assert!(matches!(
            events[3],
            Event::ProcessingFailed(ProcessingError::Network(_))
        ));
        assert_eq!(app.session().interaction_mode(), &InteractionMode::Idle);
        assert!(app.session().ledger().is_empty());
        assert!(app.session().last_error().is_some());
    }

    #[tokio::test]
    async fn stacked_edits_use_previous_result() {
        let mut app = app();
        let source = original(8, 8);
        app.dispatch(Message::SelectSource(source.clone())).await;
        for operation in [Operation::Gray, Operation::Negative] {
            app.dispatch(Message::ApplyOperation {
                operation,
                overrides: Vec::new(),
            })
            .await;
        }

        let submissions = app.processor().submissions();
        assert_eq!(submissions[0].source, source);
        assert_eq!(
            &submissions[1].source,
            app.session().ledger().entries()[0].image()
        );
    }
}
