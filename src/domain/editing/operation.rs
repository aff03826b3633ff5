// SPDX-License-Identifier: MPL-2.0
//! Operation catalog.
//!
//! Every remote transform is identified on the wire by a string id. This module
//! maps those ids onto a closed [`Operation`] enum, keeping an escape hatch
//! ([`Operation::Custom`]) so that conversion from a string is total.

use std::fmt;

// =============================================================================
// OperationFamily
// =============================================================================

/// Broad family an operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationFamily {
    /// Per-pixel tone/color changes (gray, negative, ...).
    Tone,
    /// Geometric transforms (translate, rotate, perspective, ...).
    Geometry,
    /// Frequency-domain and smoothing filters.
    Frequency,
    /// Edge detectors.
    Edge,
    /// Morphological operations.
    Morphology,
}

// =============================================================================
// OperationWeight
// =============================================================================

/// Rough cost class of an operation, used to pick the request timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationWeight {
    Light,
    Heavy,
}

// =============================================================================
// Operation
// =============================================================================

/// A named image transform understood by the processing service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Operation {
    /// Unmodified photo. This is the active operation of a fresh session.
    #[default]
    Original,
    Gray,
    Negative,
    Equalize,
    Translate,
    Rotate,
    Scale,
    FlipHorizontal,
    FlipVertical,
    /// Four-point perspective correction (two-phase capture).
    Perspective,
    Gaussian,
    Median,
    LowPass,
    HighPass,
    Sobel,
    Canny,
    Laplacian,
    Erode,
    Dilate,
    Opening,
    Closing,
    /// Any id the catalog does not know; forwarded verbatim.
    Custom(String),
}

impl Operation {
    /// All catalog operations (excludes [`Operation::Custom`]).
    pub const KNOWN: [Operation; 21] = [
        Operation::Original,
        Operation::Gray,
        Operation::Negative,
        Operation::Equalize,
        Operation::Translate,
        Operation::Rotate,
        Operation::Scale,
        Operation::FlipHorizontal,
        Operation::FlipVertical,
        Operation::Perspective,
        Operation::Gaussian,
        Operation::Median,
        Operation::LowPass,
        Operation::HighPass,
        Operation::Sobel,
        Operation::Canny,
        Operation::Laplacian,
        Operation::Erode,
        Operation::Dilate,
        Operation::Opening,
        Operation::Closing,
    ];

    /// Wire id sent as the `filter` field.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Operation::Original => "original",
            Operation::Gray => "gray",
            Operation::Negative => "negative",
            Operation::Equalize => "equalize",
            Operation::Translate => "translate",
            Operation::Rotate => "rotate",
            Operation::Scale => "scale",
            Operation::FlipHorizontal => "flip_horizontal",
            Operation::FlipVertical => "flip_vertical",
            Operation::Perspective => "perspective",
            Operation::Gaussian => "gaussian",
            Operation::Median => "median",
            Operation::LowPass => "lowpass",
            Operation::HighPass => "highpass",
            Operation::Sobel => "sobel",
            Operation::Canny => "canny",
            Operation::Laplacian => "laplacian",
            Operation::Erode => "erode",
            Operation::Dilate => "dilate",
            Operation::Opening => "opening",
            Operation::Closing => "closing",
            Operation::Custom(id) => id,
        }
    }

    #[must_use]
    pub fn family(&self) -> OperationFamily {
        match self {
            Operation::Original
            | Operation::Gray
            | Operation::Negative
            | Operation::Equalize
            | Operation::Custom(_) => OperationFamily::Tone,
            Operation::Translate
            | Operation::Rotate
            | Operation::Scale
            | Operation::FlipHorizontal
            | Operation::FlipVertical
            | Operation::Perspective => OperationFamily::Geometry,
            Operation::Gaussian | Operation::Median | Operation::LowPass | Operation::HighPass => {
                OperationFamily::Frequency
            }
            Operation::Sobel | Operation::Canny | Operation::Laplacian => OperationFamily::Edge,
            Operation::Erode | Operation::Dilate | Operation::Opening | Operation::Closing => {
                OperationFamily::Morphology
            }
        }
    }

    /// Frequency-domain, morphological and perspective work is heavy on the
    /// server; everything else is light.
    #[must_use]
    pub fn weight(&self) -> OperationWeight {
        match self.family() {
            OperationFamily::Frequency | OperationFamily::Morphology => OperationWeight::Heavy,
            _ if *self == Operation::Perspective => OperationWeight::Heavy,
            _ => OperationWeight::Light,
        }
    }

    /// Returns true for the operation that needs four captured points.
    #[must_use]
    pub fn is_perspective(&self) -> bool {
        matches!(self, Operation::Perspective)
    }
}

impl From<&str> for Operation {
    fn from(id: &str) -> Self {
        Operation::KNOWN
            .iter()
            .find(|op| op.id() == id)
            .cloned()
            .unwrap_or_else(|| Operation::Custom(id.to_string()))
    }
}

impl From<String> for Operation {
    fn from(id: String) -> Self {
        Operation::from(id.as_str())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
