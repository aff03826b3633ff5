// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the session remains independent
//! of the concrete transport.
//!
//! # Available Ports
//!
//! - [`processing`]: Remote image processing
//!
//! # Design Notes
//!
//! - Traits use domain types only (no HTTP types)
//! - Traits are `Send + Sync` so the driver can run them on any executor
//! - The editing session itself never awaits; only the app driver does

pub mod processing;

pub use processing::{ImageProcessor, OperationDescriptor};
