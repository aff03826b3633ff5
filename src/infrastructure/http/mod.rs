// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter implementing the [`ImageProcessor`] port trait.
//!
//! Speaks the processing service's multipart protocol:
//!
//! - `POST {endpoint}{route}` with the image under the `image` part and the
//!   descriptor fields as text parts
//! - success body: JSON with a base64 image under `processed_image_base64`
//!
//! [`ImageProcessor`]: crate::application::port::ImageProcessor

use crate::application::port::{ImageProcessor, OperationDescriptor};
use crate::domain::error::ProcessingError;
use crate::error::{Error, Result};
use crate::media::ImageRef;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// User agent sent with every request.
const USER_AGENT: &str = concat!("PixelStudio/", env!("CARGO_PKG_VERSION"));

/// Success payload of the processing route.
///
/// The service also returns `processed_image_url`; only the inline payload
/// is used.
#[derive(Debug, Deserialize)]
struct ProcessResponse {
    #[serde(default)]
    processed_image_base64: Option<String>,
}

/// Processing client over HTTP.
///
/// The endpoint is injected at construction so tests (and users) can point it
/// anywhere.
///
/// # Example
///
/// ```ignore
/// use pixel_studio::infrastructure::http::HttpImageProcessor;
///
/// let processor = HttpImageProcessor::new("http://192.168.1.50:5000", "/process-image")?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpImageProcessor {
    client: reqwest::Client,
    url: Url,
}

impl HttpImageProcessor {
    /// Creates a client posting to `endpoint` joined with `route`.
    ///
    /// `route` is appended below any path the endpoint already carries, so
    /// `http://host/api` with `/process-image` posts to
    /// `http://host/api/process-image`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(endpoint: &str, route: &str) -> Result<Self> {
        let mut url = Url::parse(endpoint)
            .map_err(|e| Error::Config(format!("invalid endpoint `{endpoint}`: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("endpoint `{endpoint}` cannot carry a route")))?
            .pop_if_empty()
            .extend(route.split('/').filter(|segment| !segment.is_empty()));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self { client, url })
    }

    /// Full URL requests are posted to.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    fn build_form(
        image: &ImageRef,
        descriptor: &OperationDescriptor,
    ) -> std::result::Result<Form, ProcessingError> {
        let (mime, extension) = image_rs::guess_format(image.bytes()).map_or(
            ("image/jpeg", "jpg"),
            |format| {
                (
                    format.to_mime_type(),
                    format.extensions_str().first().copied().unwrap_or("jpg"),
                )
            },
        );
        let part = Part::bytes(image.bytes().to_vec())
            .file_name(format!("photo.{extension}"))
            .mime_str(mime)
            .map_err(|e| ProcessingError::Network(format!("invalid request: {e}")))?;

        let form = descriptor
            .fields()
            .into_iter()
            .fold(Form::new().part("image", part), |form, (name, value)| {
                form.text(name, value)
            });
        Ok(form)
    }
}

impl ImageProcessor for HttpImageProcessor {
    async fn submit(
        &self,
        image: &ImageRef,
        descriptor: &OperationDescriptor,
        timeout: Duration,
    ) -> std::result::Result<ImageRef, ProcessingError> {
        let form = Self::build_form(image, descriptor)?;
        debug!(
            url = %self.url,
            filter = descriptor.operation.id(),
            timeout_ms = timeout.as_millis() as u64,
            "posting image for processing"
        );

        let response = self
            .client
            .post(self.url.clone())
            .multipart(form)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "processing request failed");
                ProcessingError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "processing service rejected request");
            return Err(ProcessingError::ServerRejected(status.as_u16()));
        }

        let body: ProcessResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                ProcessingError::MalformedResponse(e.to_string())
            } else {
                ProcessingError::Network(e.to_string())
            }
        })?;

        decode_payload(body)
    }
}

fn decode_payload(body: ProcessResponse) -> std::result::Result<ImageRef, ProcessingError> {
    let encoded = body
        .processed_image_base64
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| {
            ProcessingError::MalformedResponse("missing processed_image_base64".to_string())
        })?;

    // Tolerate a data URL wrapper around the payload.
    let encoded = match encoded.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded.as_str(),
    };

    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| ProcessingError::MalformedResponse(format!("invalid base64: {e}")))?;

    ImageRef::derived(bytes)
        .map_err(|e| ProcessingError::MalformedResponse(format!("undecodable image: {e}")))
}
