// SPDX-License-Identifier: MPL-2.0
//! Test utilities: image fixtures and a scripted processor.

use crate::application::port::{ImageProcessor, OperationDescriptor};
use crate::domain::error::ProcessingError;
use crate::media::ImageRef;
use image_rs::{ImageFormat, Rgba, RgbaImage};
use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Encodes a solid `width` x `height` PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([40, 80, 120, 255]));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

/// An original image of the given size.
pub fn original(width: u32, height: u32) -> ImageRef {
    ImageRef::original(png_bytes(width, height)).expect("fixture image")
}

/// One call seen by [`MockProcessor`].
#[derive(Debug, Clone)]
pub struct Submission {
    pub source: ImageRef,
    pub descriptor: OperationDescriptor,
    pub timeout: Duration,
}

/// Processor that records submissions and replays scripted failures.
///
/// Without a scripted outcome it succeeds with a fresh derived image the same
/// size as the source.
#[derive(Debug, Clone, Default)]
pub struct MockProcessor {
    submissions: Arc<Mutex<Vec<Submission>>>,
    failures: Arc<Mutex<VecDeque<ProcessingError>>>,
}

impl MockProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next submission fail with `error`.
    pub fn fail_next(&self, error: ProcessingError) {
        self.failures.lock().unwrap().push_back(error);
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }
}

impl ImageProcessor for MockProcessor {
    async fn submit(
        &self,
        image: &ImageRef,
        descriptor: &OperationDescriptor,
        timeout: Duration,
    ) -> Result<ImageRef, ProcessingError> {
        self.submissions.lock().unwrap().push(Submission {
            source: image.clone(),
            descriptor: descriptor.clone(),
            timeout,
        });
        if let Some(error) = self.failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        Ok(ImageRef::derived(png_bytes(image.width(), image.height())).expect("fixture image"))
    }
}
