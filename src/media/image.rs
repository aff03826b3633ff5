// SPDX-License-Identifier: MPL-2.0
//! Immutable image handles shared between the session and its history.

use crate::error::Result;
use image_rs::{ImageError, ImageReader};
use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Where an image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// The photo picked by the user; fixed for the whole session.
    Original,
    /// Produced by an edit.
    Derived,
}

/// Opaque handle to encoded image bytes.
///
/// Handles are immutable. Cloning shares the buffer; the buffer is released
/// when the last handle (session field or history entry) is dropped.
/// Equality is identity: two handles are equal only if one is a clone of the
/// other, even when their bytes happen to match.
#[derive(Clone)]
pub struct ImageRef {
    id: u64,
    kind: ImageKind,
    width: u32,
    height: u32,
    bytes: Arc<[u8]>,
}

impl ImageRef {
    /// Wraps the bytes of a freshly picked photo.
    ///
    /// # Errors
    ///
    /// Returns an [`ImageError`] if the bytes are not a decodable image.
    pub fn original(bytes: impl Into<Arc<[u8]>>) -> std::result::Result<Self, ImageError> {
        Self::with_kind(bytes.into(), ImageKind::Original)
    }

    /// Wraps the bytes of a processing result.
    ///
    /// # Errors
    ///
    /// Returns an [`ImageError`] if the bytes are not a decodable image.
    pub fn derived(bytes: impl Into<Arc<[u8]>>) -> std::result::Result<Self, ImageError> {
        Self::with_kind(bytes.into(), ImageKind::Derived)
    }

    /// Reads a photo from disk as an original image.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not an image.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::original(bytes)?)
    }

    fn with_kind(bytes: Arc<[u8]>, kind: ImageKind) -> std::result::Result<Self, ImageError> {
        let (width, height) = ImageReader::new(Cursor::new(&*bytes))
            .with_guessed_format()
            .map_err(ImageError::IoError)?
            .into_dimensions()?;

        Ok(Self {
            id: NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed),
            kind,
            width,
            height,
            bytes,
        })
    }

    /// Process-unique identity of this handle.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    /// Natural pixel width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Natural pixel height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encoded image bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Writes the encoded bytes to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &self.bytes)?;
        Ok(())
    }
}

impl PartialEq for ImageRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ImageRef {}

impl fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageRef")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_utils::png_bytes;
    use tempfile::tempdir;

    #[test]
    fn probes_natural_dimensions() {
        let image = ImageRef::original(png_bytes(12, 7)).expect("valid png");
        assert_eq!((image.width(), image.height()), (12, 7));
        assert_eq!(image.kind(), ImageKind::Original);
    }

    #[test]
    fn rejects_bytes_that_are_not_an_image() {
        assert!(ImageRef::derived(b"not an image".to_vec()).is_err());
    }

    #[test]
    fn equality_is_identity() {
        let bytes = png_bytes(2, 2);
        let a = ImageRef::derived(bytes.clone()).unwrap();
        let b = ImageRef::derived(bytes).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn open_and_save_round_trip_bytes() {
        let dir = tempdir().expect("temp dir");
        let source = dir.path().join("photo.png");
        fs::write(&source, png_bytes(3, 5)).unwrap();

        let image = ImageRef::open(&source).expect("open");
        assert_eq!((image.width(), image.height()), (3, 5));

        let target = dir.path().join("nested").join("out.png");
        image.save_to_path(&target).expect("save");
        assert_eq!(fs::read(&target).unwrap(), image.bytes());
    }

    #[test]
    fn open_missing_file_is_io_error() {
        let dir = tempdir().expect("temp dir");
        let err = ImageRef::open(dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
