// SPDX-License-Identifier: MPL-2.0
//! Request dispatch and completion.

use super::{EditingSession, HistoryEntry, InteractionMode, SessionError, SourcePolicy};
use crate::application::port::OperationDescriptor;
use crate::domain::editing::{Operation, OperationParams, ParamValue, PendingParameters};
use crate::domain::error::ProcessingError;
use crate::media::ImageRef;
use std::fmt;
use tracing::{info, warn};

/// Identifies one dispatched request within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl RequestId {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A request the caller must run against the processing service and then
/// settle with [`EditingSession::complete_request`].
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub id: RequestId,
    /// Image to send.
    pub source: ImageRef,
    pub descriptor: OperationDescriptor,
}

#[derive(Debug)]
pub(crate) struct InFlight {
    pub(crate) id: RequestId,
    descriptor: OperationDescriptor,
    snapshot: PendingParameters,
}

impl EditingSession {
    /// Applies `operation`, merging `overrides` over the pending values.
    ///
    /// Perspective correction does not send anything here: it enters point
    /// capture and returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// - [`SessionError::InvalidState`] without a source image, while a
    ///   request is in flight, or during point capture
    /// - [`SessionError::InvalidParameter`] if an override key does not belong
    ///   to `operation` or its value is not numeric; nothing is changed
    pub fn apply_operation(
        &mut self,
        operation: Operation,
        overrides: &[(String, ParamValue)],
    ) -> Result<Option<PendingRequest>, SessionError> {
        let original = self.require_source()?;
        self.ensure_idle_request()?;
        if self.mode != InteractionMode::Idle {
            return Err(SessionError::invalid_state(
                "perspective capture in progress",
            ));
        }

        if operation.is_perspective() {
            if !overrides.is_empty() {
                return Err(SessionError::invalid_state(
                    "perspective takes points, not adjustments",
                ));
            }
            info!("perspective capture started");
            self.active_operation = operation;
            self.pending.reset();
            self.mode = InteractionMode::AwaitingPoints {
                collected: Vec::new(),
            };
            return Ok(None);
        }

        let mut staged = self.pending.clone();
        staged.merge(&operation, overrides)?;
        let params = OperationParams::from_pending(&operation, &staged).ok_or_else(|| {
            SessionError::invalid_state("operation has no adjustable parameters")
        })?;

        self.active_operation = operation.clone();
        self.pending = staged;

        let source = match self.options.source_policy {
            SourcePolicy::StackOnCurrent => self.current.clone().unwrap_or(original),
            SourcePolicy::AlwaysOriginal => original,
        };
        Ok(Some(self.dispatch(operation, params, source)))
    }

    /// Settles the in-flight request.
    ///
    /// On success the result is appended to history and becomes the current
    /// image. On failure history and the current image are untouched and the
    /// error is recorded in [`last_error`](Self::last_error). Either way a
    /// perspective capture returns to idle.
    ///
    /// # Errors
    ///
    /// - [`SessionError::InvalidState`] if `id` is not the request in flight;
    ///   the result is dropped
    /// - [`SessionError::Processing`] carrying the failure
    pub fn complete_request(
        &mut self,
        id: RequestId,
        result: Result<ImageRef, ProcessingError>,
    ) -> Result<(), SessionError> {
        let in_flight = match self.in_flight.take() {
            Some(in_flight) if in_flight.id == id => in_flight,
            other => {
                self.in_flight = other;
                warn!(request = %id, "dropping stale completion");
                return Err(SessionError::invalid_state(
                    "completion does not match the request in flight",
                ));
            }
        };

        let InFlight {
            descriptor,
            snapshot,
            ..
        } = in_flight;
        if descriptor.operation.is_perspective() {
            self.mode = InteractionMode::Idle;
        }

        match result {
            Ok(image) => {
                info!(
                    request = %id,
                    operation = %descriptor.operation,
                    width = image.width(),
                    height = image.height(),
                    "request settled"
                );
                self.ledger.append(HistoryEntry::new(
                    image.clone(),
                    descriptor.operation,
                    snapshot,
                    descriptor.params,
                ));
                self.current = Some(image);
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(
                    request = %id,
                    operation = %descriptor.operation,
                    error = %err,
                    "request failed"
                );
                self.last_error = Some(err.clone());
                Err(SessionError::Processing(err))
            }
        }
    }

    pub(super) fn dispatch(
        &mut self,
        operation: Operation,
        params: OperationParams,
        source: ImageRef,
    ) -> PendingRequest {
        self.next_request += 1;
        let id = RequestId(self.next_request);
        let descriptor = OperationDescriptor {
            operation,
            params,
            preserve_original: self.options.preserve_original,
        };
        info!(
            request = %id,
            operation = %descriptor.operation,
            source = source.id(),
            "dispatching request"
        );
        self.in_flight = Some(InFlight {
            id,
            descriptor: descriptor.clone(),
            snapshot: self.pending.clone(),
        });
        PendingRequest {
            id,
            source,
            descriptor,
        }
    }
}
