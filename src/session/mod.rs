// SPDX-License-Identifier: MPL-2.0
//! Editing session state machine.
//!
//! [`EditingSession`] owns the original and current image, the active
//! operation, pending adjustment values and the [`HistoryLedger`]. Every
//! mutating request goes through it; it never awaits. Operations that need
//! the processing service hand back a [`PendingRequest`] which the caller runs
//! and settles with [`EditingSession::complete_request`].
//!
//! At most one request is in flight at a time. While one is, operations that
//! would start another (or move through history) are refused with
//! [`SessionError::InvalidState`].

pub mod adjustment;
pub mod history;
pub mod perspective;
pub mod request;
pub mod routing;

pub use history::{HistoryEntry, HistoryLedger};
pub use request::{PendingRequest, RequestId};
pub use routing::{Event, Message};

use crate::domain::editing::{Operation, PendingParameters, PixelPoint};
use crate::domain::error::{ParameterError, ProcessingError};
use crate::media::ImageRef;
use request::InFlight;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

// =============================================================================
// Errors
// =============================================================================

/// Why a session operation was refused or did not produce an edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Nothing to undo or redo.
    #[error("no history in that direction")]
    NoHistory,

    /// A key or value was refused before any request was sent.
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ParameterError),

    /// The operation is not valid in the current mode.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The processing request failed.
    #[error(transparent)]
    Processing(#[from] ProcessingError),
}

impl SessionError {
    /// Returns the i18n message key for this error type.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            SessionError::NoHistory => "error-session-no-history",
            SessionError::InvalidParameter(_) => "error-session-invalid-parameter",
            SessionError::InvalidState(_) => "error-session-invalid-state",
            SessionError::Processing(err) => err.i18n_key(),
        }
    }

    fn invalid_state(reason: &str) -> Self {
        SessionError::InvalidState(reason.to_string())
    }
}

// =============================================================================
// Options and modes
// =============================================================================

/// Which image a non-perspective operation is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourcePolicy {
    /// Compose on the most recent result.
    #[default]
    StackOnCurrent,
    /// Always start from the unmodified photo.
    AlwaysOriginal,
}

/// Settings injected into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Forwarded verbatim in every request.
    pub preserve_original: bool,
    pub source_policy: SourcePolicy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            preserve_original: true,
            source_policy: SourcePolicy::default(),
        }
    }
}

/// Multi-step input sub-state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    /// Collecting perspective corners, already scaled to original-image pixels.
    AwaitingPoints { collected: Vec<PixelPoint> },
}

// =============================================================================
// EditingSession
// =============================================================================

/// The editing session state machine.
#[derive(Debug, Default)]
pub struct EditingSession {
    options: SessionOptions,
    original: Option<ImageRef>,
    current: Option<ImageRef>,
    active_operation: Operation,
    pending: PendingParameters,
    ledger: HistoryLedger,
    mode: InteractionMode,
    in_flight: Option<InFlight>,
    last_error: Option<ProcessingError>,
    next_request: u64,
}

impl EditingSession {
    #[must_use]
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Starts over with a new photo.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidState`] while a request is in flight.
    pub fn select_source(&mut self, image: ImageRef) -> Result<(), SessionError> {
        self.ensure_idle_request()?;
        info!(
            image = image.id(),
            width = image.width(),
            height = image.height(),
            "source selected"
        );
        self.current = Some(image.clone());
        self.original = Some(image);
        self.ledger.reset();
        self.active_operation = Operation::Original;
        self.pending.reset();
        self.mode = InteractionMode::Idle;
        self.last_error = None;
        Ok(())
    }

    /// Steps back one edit, restoring its image, operation and parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoHistory`] at the first entry and
    /// [`SessionError::InvalidState`] while a request is in flight.
    pub fn undo(&mut self) -> Result<(), SessionError> {
        self.ensure_idle_request()?;
        let entry = self.ledger.undo()?.clone();
        debug!(cursor = ?self.ledger.cursor(), "undo");
        self.restore(entry);
        Ok(())
    }

    /// Steps forward one edit.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoHistory`] at the last entry and
    /// [`SessionError::InvalidState`] while a request is in flight.
    pub fn redo(&mut self) -> Result<(), SessionError> {
        self.ensure_idle_request()?;
        let entry = self.ledger.redo()?.clone();
        debug!(cursor = ?self.ledger.cursor(), "redo");
        self.restore(entry);
        Ok(())
    }

    /// Returns to the original photo and drops all history.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidState`] while a request is in flight.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.ensure_idle_request()?;
        info!(dropped = self.ledger.len(), "session reset");
        self.current = self.original.clone();
        self.ledger.reset();
        self.active_operation = Operation::Original;
        self.pending.reset();
        self.mode = InteractionMode::Idle;
        Ok(())
    }

    /// Clears the recorded processing error.
    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    fn restore(&mut self, entry: HistoryEntry) {
        self.current = Some(entry.image().clone());
        self.pending = entry.parameters().clone();
        self.active_operation = entry.operation().clone();
        self.mode = InteractionMode::Idle;
    }

    fn ensure_idle_request(&self) -> Result<(), SessionError> {
        if self.in_flight.is_some() {
            Err(SessionError::invalid_state("a request is already in flight"))
        } else {
            Ok(())
        }
    }

    fn require_source(&self) -> Result<ImageRef, SessionError> {
        self.original
            .clone()
            .ok_or_else(|| SessionError::invalid_state("no source image selected"))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn options(&self) -> SessionOptions {
        self.options
    }

    #[must_use]
    pub fn original_image(&self) -> Option<&ImageRef> {
        self.original.as_ref()
    }

    /// The image currently shown: the entry at the ledger cursor, or the
    /// original when the ledger is empty.
    #[must_use]
    pub fn current_image(&self) -> Option<&ImageRef> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn active_operation(&self) -> &Operation {
        &self.active_operation
    }

    #[must_use]
    pub fn pending(&self) -> &PendingParameters {
        &self.pending
    }

    #[must_use]
    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    #[must_use]
    pub fn interaction_mode(&self) -> &InteractionMode {
        &self.mode
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&ProcessingError> {
        self.last_error.as_ref()
    }

    /// Id of the request awaiting completion, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight.as_ref().map(|in_flight| in_flight.id)
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.is_busy() && self.ledger.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.is_busy() && self.ledger.can_redo()
    }

    /// Returns true once at least one edit has been applied.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.ledger.is_empty()
    }
}
