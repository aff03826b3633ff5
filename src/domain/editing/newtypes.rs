// SPDX-License-Identifier: MPL-2.0
//! Editing newtypes.
//!
//! This module provides type-safe wrappers for the coordinates used by
//! perspective capture, ensuring they are always within valid ranges.

use crate::domain::error::ParameterError;

// =============================================================================
// Normalized Bounds
// =============================================================================

/// Normalized coordinate bounds (0.0 to 1.0 across the image).
pub mod normalized_bounds {
    /// Left/top edge.
    pub const MIN: f64 = 0.0;
    /// Right/bottom edge.
    pub const MAX: f64 = 1.0;
}

// =============================================================================
// NormalizedPoint
// =============================================================================

/// A point expressed as a fraction of the image's width and height.
///
/// Independent of on-screen scaling: (0, 0) is the top-left pixel corner and
/// (1, 1) the bottom-right one, whatever size the image is displayed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPoint {
    x: f64,
    y: f64,
}

impl NormalizedPoint {
    /// Creates a point, clamping both coordinates into `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NotNumeric`] if a coordinate is NaN or infinite.
    pub fn new(x: f64, y: f64) -> Result<Self, ParameterError> {
        for (axis, value) in [("x", x), ("y", y)] {
            if !value.is_finite() {
                return Err(ParameterError::NotNumeric {
                    key: axis.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(Self {
            x: x.clamp(normalized_bounds::MIN, normalized_bounds::MAX),
            y: y.clamp(normalized_bounds::MIN, normalized_bounds::MAX),
        })
    }

    /// Converts a position inside a view of `view_width` x `view_height`
    /// (where the whole image is drawn) into a normalized point.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NotNumeric`] for a degenerate view or
    /// non-finite input.
    pub fn from_view(
        x: f64,
        y: f64,
        view_width: f64,
        view_height: f64,
    ) -> Result<Self, ParameterError> {
        if !(view_width > 0.0 && view_height > 0.0) {
            return Err(ParameterError::NotNumeric {
                key: "view".to_string(),
                value: format!("{view_width}x{view_height}"),
            });
        }
        Self::new(x / view_width, y / view_height)
    }

    #[must_use]
    pub fn x(self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn y(self) -> f64 {
        self.y
    }

    /// Scales onto an image with the given natural pixel dimensions.
    #[must_use]
    pub fn to_pixels(self, width: u32, height: u32) -> PixelPoint {
        PixelPoint {
            x: self.x * f64::from(width),
            y: self.y * f64::from(height),
        }
    }
}

// =============================================================================
// PixelPoint
// =============================================================================

/// A point in the natural pixel space of an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

// =============================================================================
// Tests
// =============================================================================
