// SPDX-License-Identifier: MPL-2.0
//! Domain error types.
//!
//! - [`ProcessingError`]: why a remote processing request produced no image
//! - [`ParameterError`]: why an adjustment value was refused before sending

use thiserror::Error;

// =============================================================================
// ProcessingError
// =============================================================================

/// Failure of a single exchange with the processing service.
///
/// None of these are retried automatically; retrying is the user invoking
/// the same operation again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    /// Connection failed or the request timed out.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("server rejected the request with status {0}")]
    ServerRejected(u16),

    /// Success status, but no usable image in the response.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ProcessingError {
    /// Returns the i18n message key for this error type.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ProcessingError::Network(_) => "error-processing-network",
            ProcessingError::ServerRejected(_) => "error-processing-rejected",
            ProcessingError::MalformedResponse(_) => "error-processing-malformed",
        }
    }
}

// =============================================================================
// ParameterError
// =============================================================================

/// An adjustment value or key that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// The key is not part of the adjustment model.
    #[error("unknown adjustment `{0}`")]
    UnknownKey(String),

    /// The key exists but the operation does not expose it.
    #[error("`{operation}` has no adjustment `{key}`")]
    NotApplicable { key: String, operation: String },

    /// The value cannot be read as a finite number.
    #[error("`{value}` is not a valid number for `{key}`")]
    NotNumeric { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processing_error_display() {
        assert_eq!(
            ProcessingError::ServerRejected(503).to_string(),
            "server rejected the request with status 503"
        );
        assert!(ProcessingError::Network("timed out".into())
            .to_string()
            .contains("timed out"));
    }

    #[test]
    fn processing_error_i18n_keys() {
        assert_eq!(
            ProcessingError::Network(String::new()).i18n_key(),
            "error-processing-network"
        );
        assert_eq!(
            ProcessingError::ServerRejected(400).i18n_key(),
            "error-processing-rejected"
        );
        assert_eq!(
            ProcessingError::MalformedResponse(String::new()).i18n_key(),
            "error-processing-malformed"
        );
    }

    #[test]
    fn parameter_error_names_the_key() {
        let err = ParameterError::NotApplicable {
            key: "angle".into(),
            operation: "gray".into(),
        };
        assert_eq!(err.to_string(), "`gray` has no adjustment `angle`");
    }
}
