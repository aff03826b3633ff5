// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Service**: Processing service address
//! - **Timeouts**: Per-weight request budgets and their bounds
//! - **Editing**: Request preferences

// ==========================================================================
// Service Defaults
// ==========================================================================

/// Default processing service base URL.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

/// Default route of the processing handler, joined onto the endpoint.
pub const DEFAULT_ROUTE: &str = "/process-image";

// ==========================================================================
// Timeout Defaults
// ==========================================================================

/// Budget for tone, geometry and edge operations (in seconds).
pub const DEFAULT_LIGHT_TIMEOUT_SECS: u64 = 15;

/// Budget for frequency-domain, morphological and perspective operations
/// (in seconds).
pub const DEFAULT_HEAVY_TIMEOUT_SECS: u64 = 30;

/// Minimum request timeout (in seconds).
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout (in seconds).
pub const MAX_TIMEOUT_SECS: u64 = 300;

// ==========================================================================
// Editing Defaults
// ==========================================================================

/// Whether the service is asked to keep the original upload.
pub const DEFAULT_PRESERVE_ORIGINAL: bool = true;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(!DEFAULT_ENDPOINT.is_empty());
    assert!(!DEFAULT_ROUTE.is_empty());

    assert!(MIN_TIMEOUT_SECS > 0);
    assert!(MAX_TIMEOUT_SECS >= MIN_TIMEOUT_SECS);
    assert!(DEFAULT_LIGHT_TIMEOUT_SECS >= MIN_TIMEOUT_SECS);
    assert!(DEFAULT_LIGHT_TIMEOUT_SECS <= MAX_TIMEOUT_SECS);
    assert!(DEFAULT_HEAVY_TIMEOUT_SECS >= MIN_TIMEOUT_SECS);
    assert!(DEFAULT_HEAVY_TIMEOUT_SECS <= MAX_TIMEOUT_SECS);

    // Heavy operations never get a smaller budget than light ones
    assert!(DEFAULT_HEAVY_TIMEOUT_SECS >= DEFAULT_LIGHT_TIMEOUT_SECS);
};
