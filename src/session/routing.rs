// SPDX-License-Identifier: MPL-2.0
//! Message routing: one entry point for every caller-driven change.

use super::{EditingSession, PendingRequest, RequestId, SessionError};
use crate::domain::editing::{NormalizedPoint, Operation, Overrides, ParamValue};
use crate::domain::error::ProcessingError;
use crate::media::ImageRef;
use tracing::debug;

/// Inputs the session reacts to.
#[derive(Debug, Clone)]
pub enum Message {
    SelectSource(ImageRef),
    SelectOperation(Operation),
    ApplyOperation {
        operation: Operation,
        overrides: Overrides,
    },
    StreamAdjustment {
        key: String,
        value: ParamValue,
    },
    CommitAdjustment,
    AddPerspectivePoint(NormalizedPoint),
    CancelPerspective,
    Undo,
    Redo,
    Reset,
    RequestFinished {
        id: RequestId,
        result: Result<ImageRef, ProcessingError>,
    },
    DismissError,
}

/// What the caller has to do after a message.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// Run this request and send back [`Message::RequestFinished`].
    ProcessingRequested(PendingRequest),
    /// The current image or history moved; re-render.
    HistoryChanged,
    /// An input was refused before any request; show it next to the control.
    ParameterRejected(SessionError),
    /// A request failed; show a dismissible message.
    ProcessingFailed(ProcessingError),
}

impl EditingSession {
    /// Routes `message` to the matching operation.
    ///
    /// Refusals caused by mode or missing history are handled here and yield
    /// [`Event::None`]; a UI reflects them as disabled affordances.
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::SelectSource(image) => changed(self.select_source(image)),
            Message::SelectOperation(operation) => {
                settled(self.select_operation(operation), Event::None)
            }
            Message::ApplyOperation {
                operation,
                overrides,
            } => requested(self.apply_operation(operation, &overrides)),
            Message::StreamAdjustment { key, value } => {
                settled(self.stream_adjustment(&key, value), Event::None)
            }
            Message::CommitAdjustment => requested(self.commit_adjustment()),
            Message::AddPerspectivePoint(point) => requested(self.add_perspective_point(point)),
            Message::CancelPerspective => settled(self.cancel_perspective(), Event::None),
            Message::Undo => changed(self.undo()),
            Message::Redo => changed(self.redo()),
            Message::Reset => changed(self.reset()),
            Message::RequestFinished { id, result } => {
                changed(self.complete_request(id, result))
            }
            Message::DismissError => {
                self.dismiss_error();
                Event::None
            }
        }
    }
}

fn requested(result: Result<Option<PendingRequest>, SessionError>) -> Event {
    match result {
        Ok(Some(request)) => Event::ProcessingRequested(request),
        Ok(None) => Event::None,
        Err(err) => rejected(err),
    }
}

fn changed<T>(result: Result<T, SessionError>) -> Event {
    settled(result, Event::HistoryChanged)
}

fn settled<T>(result: Result<T, SessionError>, on_success: Event) -> Event {
    match result {
        Ok(_) => on_success,
        Err(err) => rejected(err),
    }
}

fn rejected(err: SessionError) -> Event {
    match err {
        SessionError::InvalidParameter(_) => Event::ParameterRejected(err),
        SessionError::Processing(err) => Event::ProcessingFailed(err),
        SessionError::NoHistory | SessionError::InvalidState(_) => {
            debug!(error = %err, "refused");
            Event::None
        }
    }
}
