// SPDX-License-Identifier: MPL-2.0
//! Remote processing port definition.
//!
//! This module defines the [`ImageProcessor`] trait: send one image plus one
//! [`OperationDescriptor`], get back a processed image or a
//! [`ProcessingError`].
//!
//! # Design Notes
//!
//! - Exactly one exchange per call; implementations never retry
//! - Implementations hold no session state and mutate nothing
//! - The timeout is chosen by the caller per operation weight

use crate::domain::editing::{Operation, OperationParams};
use crate::domain::error::ProcessingError;
use crate::media::ImageRef;
use std::future::Future;
use std::time::Duration;

// =============================================================================
// OperationDescriptor
// =============================================================================

/// Everything the service needs to know about one requested edit.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    /// Which transform to run.
    pub operation: Operation,
    /// Typed parameters for that transform.
    pub params: OperationParams,
    /// The user's "keep the original" preference, forwarded verbatim.
    pub preserve_original: bool,
}

impl OperationDescriptor {
    /// Flattens the descriptor into string form fields: `filter`, the
    /// parameter fields, then `preserve_original`.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("filter", self.operation.id().to_string())];
        fields.extend(self.params.fields());
        fields.push(("preserve_original", self.preserve_original.to_string()));
        fields
    }
}

// =============================================================================
// ImageProcessor Trait
// =============================================================================

/// Port for the remote image-processing service.
///
/// # Example
///
/// ```ignore
/// use pixel_studio::application::port::ImageProcessor;
///
/// async fn run(processor: &impl ImageProcessor, request: &PendingRequest) {
///     match processor.submit(&request.source, &request.descriptor, timeout).await {
///         Ok(image) => println!("{}x{}", image.width(), image.height()),
///         Err(err) => eprintln!("{err}"),
///     }
/// }
/// ```
pub trait ImageProcessor: Send + Sync {
    /// Submits `image` for processing as described by `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessingError`] if the exchange fails, the service
    /// rejects the request, or the response carries no usable image.
    fn submit(
        &self,
        image: &ImageRef,
        descriptor: &OperationDescriptor,
        timeout: Duration,
    ) -> impl Future<Output = Result<ImageRef, ProcessingError>> + Send;
}
