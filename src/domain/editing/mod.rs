// SPDX-License-Identifier: MPL-2.0
//! Editing domain types.
//!
//! This module provides pure domain types for image editing operations:
//! - [`Operation`]: The catalog of remote transforms
//! - [`AdjustmentKey`] / [`AdjustmentSpec`]: Continuously variable parameters
//! - [`PendingParameters`]: Adjustment values waiting for the next request
//! - [`OperationParams`]: Typed request payload, one variant per shape
//! - [`NormalizedPoint`] / [`PixelPoint`]: Perspective capture coordinates

pub mod adjustment;
pub mod newtypes;
pub mod operation;
pub mod params;

pub use adjustment::{
    adjustments_for, AdjustmentKey, AdjustmentSpec, Overrides, ParamValue, PendingParameters,
};
pub use newtypes::{NormalizedPoint, PixelPoint};
pub use operation::{Operation, OperationFamily, OperationWeight};
pub use params::{OperationParams, PERSPECTIVE_POINTS};
