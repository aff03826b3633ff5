// SPDX-License-Identifier: MPL-2.0
//! Operation selection and adjustment streaming.
//!
//! Streaming only updates pending values; a commit is the single point where
//! a drag gesture turns into a request.

use super::{EditingSession, InteractionMode, PendingRequest, SessionError};
use crate::domain::editing::adjustment::checked_key;
use crate::domain::editing::{Operation, OperationParams, ParamValue};
use tracing::debug;

impl EditingSession {
    /// Makes `operation` active. Switching to a different operation restores
    /// its default adjustment values.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidState`] during point capture.
    pub fn select_operation(&mut self, operation: Operation) -> Result<(), SessionError> {
        if self.mode != InteractionMode::Idle {
            return Err(SessionError::invalid_state(
                "perspective capture in progress",
            ));
        }
        if operation != self.active_operation {
            debug!(operation = %operation, "operation selected");
            self.active_operation = operation;
            self.pending.reset();
        }
        Ok(())
    }

    /// Updates one pending value while a control is being dragged.
    ///
    /// Returns the stored (clamped) value. Never sends a request.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidParameter`] if the active operation has
    /// no such key or the value is not numeric.
    pub fn stream_adjustment(
        &mut self,
        key: &str,
        value: impl Into<ParamValue>,
    ) -> Result<f64, SessionError> {
        let key = checked_key(&self.active_operation, key)?;
        let value = value.into().coerce(key)?;
        self.pending.set(key, value);
        Ok(value)
    }

    /// Applies the active operation with the pending values.
    ///
    /// Committing the same operation and values as the most recent history
    /// entry is a no-op returning `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Same as [`apply_operation`](Self::apply_operation); perspective cannot
    /// be committed.
    pub fn commit_adjustment(&mut self) -> Result<Option<PendingRequest>, SessionError> {
        if self.active_operation.is_perspective() {
            return Err(SessionError::invalid_state(
                "perspective is applied by placing points",
            ));
        }
        let params = OperationParams::from_pending(&self.active_operation, &self.pending);
        let unchanged = self.ledger.current().is_some_and(|entry| {
            entry.operation() == &self.active_operation && Some(entry.params()) == params.as_ref()
        });
        if unchanged && !self.is_busy() {
            debug!(operation = %self.active_operation, "commit unchanged, skipped");
            return Ok(None);
        }
        self.apply_operation(self.active_operation.clone(), &[])
    }
}
