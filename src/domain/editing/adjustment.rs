// SPDX-License-Identifier: MPL-2.0
//! Adjustment model.
//!
//! An adjustment is a continuously variable numeric parameter of an operation
//! (brightness factor, rotation angle, kernel size, ...). Each key carries a
//! fixed [`AdjustmentSpec`]; values coming from the outside are coerced to a
//! number and clamped into the key's range before the session uses them.

use super::operation::Operation;
use crate::domain::error::ParameterError;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// AdjustmentKey
// =============================================================================

/// Identifies one adjustable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AdjustmentKey {
    Brightness,
    Contrast,
    Tx,
    Ty,
    Angle,
    Scale,
    KernelSize,
    Sigma,
    Radius,
    Iterations,
    LowThreshold,
    HighThreshold,
}

impl AdjustmentKey {
    pub const ALL: [AdjustmentKey; 12] = [
        AdjustmentKey::Brightness,
        AdjustmentKey::Contrast,
        AdjustmentKey::Tx,
        AdjustmentKey::Ty,
        AdjustmentKey::Angle,
        AdjustmentKey::Scale,
        AdjustmentKey::KernelSize,
        AdjustmentKey::Sigma,
        AdjustmentKey::Radius,
        AdjustmentKey::Iterations,
        AdjustmentKey::LowThreshold,
        AdjustmentKey::HighThreshold,
    ];

    /// Field name used in request payloads.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            AdjustmentKey::Brightness => "brightness",
            AdjustmentKey::Contrast => "contrast",
            AdjustmentKey::Tx => "tx",
            AdjustmentKey::Ty => "ty",
            AdjustmentKey::Angle => "angle",
            AdjustmentKey::Scale => "scale",
            AdjustmentKey::KernelSize => "kernelSize",
            AdjustmentKey::Sigma => "sigma",
            AdjustmentKey::Radius => "radius",
            AdjustmentKey::Iterations => "iterations",
            AdjustmentKey::LowThreshold => "lowThreshold",
            AdjustmentKey::HighThreshold => "highThreshold",
        }
    }

    /// Range, step and default for this key.
    #[must_use]
    pub fn spec(self) -> AdjustmentSpec {
        match self {
            AdjustmentKey::Brightness | AdjustmentKey::Contrast => {
                AdjustmentSpec::new(0.0, 3.0, 0.1, 1.0)
            }
            AdjustmentKey::Tx | AdjustmentKey::Ty => {
                AdjustmentSpec::new(-1000.0, 1000.0, 1.0, 0.0)
            }
            AdjustmentKey::Angle => AdjustmentSpec::new(-180.0, 180.0, 1.0, 0.0),
            AdjustmentKey::Scale => AdjustmentSpec::new(0.1, 4.0, 0.1, 1.0),
            AdjustmentKey::KernelSize => AdjustmentSpec::new(1.0, 31.0, 2.0, 3.0),
            AdjustmentKey::Sigma => AdjustmentSpec::new(0.1, 10.0, 0.1, 1.0),
            AdjustmentKey::Radius => AdjustmentSpec::new(1.0, 200.0, 1.0, 30.0),
            AdjustmentKey::Iterations => AdjustmentSpec::new(1.0, 10.0, 1.0, 1.0),
            AdjustmentKey::LowThreshold => AdjustmentSpec::new(0.0, 255.0, 1.0, 50.0),
            AdjustmentKey::HighThreshold => AdjustmentSpec::new(0.0, 255.0, 1.0, 150.0),
        }
    }
}

impl FromStr for AdjustmentKey {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdjustmentKey::ALL
            .into_iter()
            .find(|key| key.wire_name() == s)
            .ok_or_else(|| ParameterError::UnknownKey(s.to_string()))
    }
}

impl fmt::Display for AdjustmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

// =============================================================================
// AdjustmentSpec
// =============================================================================

/// Numeric range of an adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl AdjustmentSpec {
    #[must_use]
    pub const fn new(min: f64, max: f64, step: f64, default: f64) -> Self {
        Self {
            min,
            max,
            step,
            default,
        }
    }

    /// Clamps a finite value into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

// =============================================================================
// Adjustment table
// =============================================================================

const TONE_KEYS: &[AdjustmentKey] = &[AdjustmentKey::Brightness, AdjustmentKey::Contrast];

/// Ordered adjustment keys exposed by `operation`.
///
/// Total: operations without their own parameters (including unknown ids)
/// fall back to brightness/contrast.
#[must_use]
pub fn adjustments_for(operation: &Operation) -> &'static [AdjustmentKey] {
    match operation {
        Operation::Translate => &[AdjustmentKey::Tx, AdjustmentKey::Ty],
        Operation::Rotate => &[AdjustmentKey::Angle],
        Operation::Scale => &[AdjustmentKey::Scale],
        Operation::Gaussian => &[AdjustmentKey::KernelSize, AdjustmentKey::Sigma],
        Operation::Median => &[AdjustmentKey::KernelSize],
        Operation::LowPass | Operation::HighPass => &[AdjustmentKey::Radius],
        Operation::Erode | Operation::Dilate | Operation::Opening | Operation::Closing => {
            &[AdjustmentKey::KernelSize, AdjustmentKey::Iterations]
        }
        Operation::Canny => &[AdjustmentKey::LowThreshold, AdjustmentKey::HighThreshold],
        Operation::Perspective => &[],
        _ => TONE_KEYS,
    }
}

// =============================================================================
// ParamValue
// =============================================================================

/// Externally supplied parameter value, before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl ParamValue {
    /// Coerces to a clamped number for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NotNumeric`] for non-numeric text and
    /// non-finite numbers.
    pub fn coerce(&self, key: AdjustmentKey) -> Result<f64, ParameterError> {
        let raw = match self {
            ParamValue::Number(n) => *n,
            ParamValue::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                ParameterError::NotNumeric {
                    key: key.wire_name().to_string(),
                    value: text.clone(),
                }
            })?,
        };
        if !raw.is_finite() {
            return Err(ParameterError::NotNumeric {
                key: key.wire_name().to_string(),
                value: raw.to_string(),
            });
        }
        Ok(key.spec().clamp(raw))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Number(f64::from(value))
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

/// Loosely typed overrides as a caller supplies them (`"angle" -> 90`).
pub type Overrides = Vec<(String, ParamValue)>;

// =============================================================================
// PendingParameters
// =============================================================================

/// Adjustment values waiting to be sent with the next request.
///
/// Only explicitly set keys are stored; every other key reads as its default,
/// so an empty map is "all defaults".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PendingParameters {
    values: BTreeMap<AdjustmentKey, f64>,
}

impl PendingParameters {
    /// Effective value for `key`.
    #[must_use]
    pub fn get(&self, key: AdjustmentKey) -> f64 {
        self.values
            .get(&key)
            .copied()
            .unwrap_or_else(|| key.spec().default)
    }

    /// Stores `value` clamped into the key's range.
    pub fn set(&mut self, key: AdjustmentKey, value: f64) {
        self.values.insert(key, key.spec().clamp(value));
    }

    /// Returns to all-defaults.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Returns true when every key reads as its default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.values
            .iter()
            .all(|(key, value)| (value - key.spec().default).abs() < f64::EPSILON)
    }

    /// Validates and merges loosely typed overrides for `operation`.
    ///
    /// All overrides are checked before any is applied, so a rejected batch
    /// leaves the parameters untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] for unknown keys, keys that `operation`
    /// does not expose, or values that are not numeric.
    pub fn merge(
        &mut self,
        operation: &Operation,
        overrides: &[(String, ParamValue)],
    ) -> Result<(), ParameterError> {
        let mut staged = Vec::with_capacity(overrides.len());
        for (name, value) in overrides {
            let key = checked_key(operation, name)?;
            staged.push((key, value.coerce(key)?));
        }
        for (key, value) in staged {
            self.set(key, value);
        }
        Ok(())
    }

    /// Effective values of the keys `operation` exposes, in table order.
    #[must_use]
    pub fn values_for(&self, operation: &Operation) -> Vec<(AdjustmentKey, f64)> {
        adjustments_for(operation)
            .iter()
            .map(|key| (*key, self.get(*key)))
            .collect()
    }
}

/// Parses `name` and checks it belongs to `operation`.
///
/// # Errors
///
/// Returns [`ParameterError::UnknownKey`] or [`ParameterError::NotApplicable`].
pub fn checked_key(operation: &Operation, name: &str) -> Result<AdjustmentKey, ParameterError> {
    let key = name.parse::<AdjustmentKey>()?;
    if adjustments_for(operation).contains(&key) {
        Ok(key)
    } else {
        Err(ParameterError::NotApplicable {
            key: name.to_string(),
            operation: operation.id().to_string(),
        })
    }
}
