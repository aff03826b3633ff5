// SPDX-License-Identifier: MPL-2.0
//! Typed operation parameters.
//!
//! [`OperationParams`] is the strongly typed payload of a request: one variant
//! per parameter shape, so an operation can only ever carry the keys it
//! understands. It is flattened into string fields at the transport edge.

use super::adjustment::{AdjustmentKey, PendingParameters};
use super::newtypes::PixelPoint;
use super::operation::Operation;
use serde_json::{json, Value};

/// Number of corners perspective correction needs.
pub const PERSPECTIVE_POINTS: usize = 4;

/// Parameters of one operation, tagged by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationParams {
    /// Tone operations and anything without its own adjustments.
    Tone { brightness: f64, contrast: f64 },
    Translate { tx: f64, ty: f64 },
    Rotate { angle: f64 },
    Scale { factor: f64 },
    Gaussian { kernel_size: f64, sigma: f64 },
    Median { kernel_size: f64 },
    /// Frequency-domain low/high pass.
    Cutoff { radius: f64 },
    Morphology { kernel_size: f64, iterations: f64 },
    /// Canny hysteresis thresholds.
    Hysteresis { low: f64, high: f64 },
    /// Corners in source-image pixels, in capture order.
    Perspective { points: [PixelPoint; PERSPECTIVE_POINTS] },
}

impl OperationParams {
    /// Builds the parameters of `operation` from the pending values.
    ///
    /// Returns `None` for perspective correction, whose payload comes from
    /// point capture rather than adjustments.
    #[must_use]
    pub fn from_pending(operation: &Operation, pending: &PendingParameters) -> Option<Self> {
        use AdjustmentKey as K;

        let get = |key| pending.get(key);
        let params = match operation {
            Operation::Perspective => return None,
            Operation::Translate => Self::Translate {
                tx: get(K::Tx),
                ty: get(K::Ty),
            },
            Operation::Rotate => Self::Rotate {
                angle: get(K::Angle),
            },
            Operation::Scale => Self::Scale {
                factor: get(K::Scale),
            },
            Operation::Gaussian => Self::Gaussian {
                kernel_size: get(K::KernelSize),
                sigma: get(K::Sigma),
            },
            Operation::Median => Self::Median {
                kernel_size: get(K::KernelSize),
            },
            Operation::LowPass | Operation::HighPass => Self::Cutoff {
                radius: get(K::Radius),
            },
            Operation::Erode | Operation::Dilate | Operation::Opening | Operation::Closing => {
                Self::Morphology {
                    kernel_size: get(K::KernelSize),
                    iterations: get(K::Iterations),
                }
            }
            Operation::Canny => Self::Hysteresis {
                low: get(K::LowThreshold),
                high: get(K::HighThreshold),
            },
            _ => Self::Tone {
                brightness: get(K::Brightness),
                contrast: get(K::Contrast),
            },
        };
        Some(params)
    }

    /// Flattens into `(name, value)` string fields.
    ///
    /// Numbers are rendered as decimal strings; perspective points become a
    /// JSON array of `[x, y]` pairs under `points`.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        use AdjustmentKey as K;

        match self {
            Self::Tone {
                brightness,
                contrast,
            } => numeric(&[(K::Brightness, *brightness), (K::Contrast, *contrast)]),
            Self::Translate { tx, ty } => numeric(&[(K::Tx, *tx), (K::Ty, *ty)]),
            Self::Rotate { angle } => numeric(&[(K::Angle, *angle)]),
            Self::Scale { factor } => numeric(&[(K::Scale, *factor)]),
            Self::Gaussian { kernel_size, sigma } => {
                numeric(&[(K::KernelSize, *kernel_size), (K::Sigma, *sigma)])
            }
            Self::Median { kernel_size } => numeric(&[(K::KernelSize, *kernel_size)]),
            Self::Cutoff { radius } => numeric(&[(K::Radius, *radius)]),
            Self::Morphology {
                kernel_size,
                iterations,
            } => numeric(&[(K::KernelSize, *kernel_size), (K::Iterations, *iterations)]),
            Self::Hysteresis { low, high } => {
                numeric(&[(K::LowThreshold, *low), (K::HighThreshold, *high)])
            }
            Self::Perspective { points } => {
                let pairs: Vec<Value> = points.iter().map(|p| json!([p.x, p.y])).collect();
                vec![("points", Value::Array(pairs).to_string())]
            }
        }
    }
}

fn numeric(pairs: &[(AdjustmentKey, f64)]) -> Vec<(&'static str, String)> {
    pairs
        .iter()
        .map(|(key, value)| (key.wire_name(), value.to_string()))
        .collect()
}
