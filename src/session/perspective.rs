// SPDX-License-Identifier: MPL-2.0
//! Two-phase perspective capture.
//!
//! [`apply_operation`](EditingSession::apply_operation) with
//! [`Operation::Perspective`] enters point capture. Each point is scaled from
//! normalized coordinates to the original image's natural pixel size. The
//! fourth point dispatches the request against the original image; the mode
//! stays `AwaitingPoints` until that request settles.

use super::{EditingSession, InteractionMode, PendingRequest, SessionError};
use crate::domain::editing::{
    NormalizedPoint, Operation, OperationParams, PixelPoint, PERSPECTIVE_POINTS,
};
use tracing::debug;

impl EditingSession {
    /// Adds one corner.
    ///
    /// Returns the request to run once the fourth point is placed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidState`] outside point capture or when
    /// all four points are already placed; `collected` is left unchanged.
    pub fn add_perspective_point(
        &mut self,
        point: NormalizedPoint,
    ) -> Result<Option<PendingRequest>, SessionError> {
        let original = self.require_source()?;
        let InteractionMode::AwaitingPoints { collected } = &mut self.mode else {
            return Err(SessionError::invalid_state("not capturing perspective points"));
        };
        if collected.len() >= PERSPECTIVE_POINTS {
            return Err(SessionError::invalid_state(
                "all perspective points already placed",
            ));
        }

        let pixel = point.to_pixels(original.width(), original.height());
        collected.push(pixel);
        debug!(
            index = collected.len(),
            x = pixel.x,
            y = pixel.y,
            "perspective point captured"
        );
        if collected.len() < PERSPECTIVE_POINTS {
            return Ok(None);
        }

        let points: [PixelPoint; PERSPECTIVE_POINTS] = collected
            .as_slice()
            .try_into()
            .map_err(|_| SessionError::invalid_state("perspective point count mismatch"))?;
        let request = self.dispatch(
            Operation::Perspective,
            OperationParams::Perspective { points },
            original,
        );
        Ok(Some(request))
    }

    /// Leaves point capture without sending anything.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidState`] outside point capture or once
    /// the request has been dispatched.
    pub fn cancel_perspective(&mut self) -> Result<(), SessionError> {
        if !matches!(self.mode, InteractionMode::AwaitingPoints { .. }) {
            return Err(SessionError::invalid_state("not capturing perspective points"));
        }
        self.ensure_idle_request()?;
        debug!("perspective capture cancelled");
        self.mode = InteractionMode::Idle;
        self.active_operation = self
            .ledger
            .current()
            .map_or(Operation::Original, |entry| entry.operation().clone());
        Ok(())
    }
}
