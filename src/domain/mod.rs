// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core editing rules without any I/O.
//!
//! This module contains pure domain types, value objects, and business rules.
//! Nothing here touches the network or the filesystem.
//!
//! # Modules
//!
//! - [`editing`]: Operations, adjustments and capture coordinates
//!   ([`Operation`](editing::Operation), [`AdjustmentKey`](editing::AdjustmentKey),
//!   [`OperationParams`](editing::OperationParams))
//! - [`error`]: Domain error types ([`ProcessingError`](error::ProcessingError),
//!   [`ParameterError`](error::ParameterError))

pub mod editing;
pub mod error;
