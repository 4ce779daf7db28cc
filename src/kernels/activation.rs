//! This module contains the pure, stateless elementwise activation kernel.
//!
//! The leaky variant divides negative values by a hard-wired 4, truncating toward
//! zero. The caller-supplied slope is accepted and ignored.

use ndarray::Array2;

use crate::error::MemconvError;
use crate::kernels::arith::div_trunc;
use crate::types::{ActivationKind, Matrix32};

/// The fixed divisor applied to negative inputs by the leaky activation.
pub const LEAKY_RELU_DIVISOR: i32 = 4;

#[inline]
fn leaky_relu(v: i32) -> Result<i32, MemconvError> {
    if v >= 0 {
        Ok(v)
    } else {
        // -9 / 4 == -2.
        div_trunc(v, LEAKY_RELU_DIVISOR)
    }
}

fn try_mapv<F>(x: &Matrix32, f: F) -> Result<Matrix32, MemconvError>
where
    F: Fn(i32) -> Result<i32, MemconvError>,
{
    let values = x.iter().map(|&v| f(v)).collect::<Result<Vec<_>, _>>()?;
    Array2::from_shape_vec(x.dim(), values).map_err(|e| MemconvError::InvalidShape(e.to_string()))
}

/// Applies `kind` to every element, returning a fresh matrix.
pub fn activate(x: &Matrix32, kind: ActivationKind, _alpha: f64) -> Result<Matrix32, MemconvError> {
    match kind {
        ActivationKind::None => Ok(x.clone()),
        ActivationKind::Relu => Ok(x.mapv(|v| v.max(0))),
        ActivationKind::LeakyRelu => try_mapv(x, leaky_relu),
    }
}

/// Parses `name` and applies it. Unknown names fail with `UnsupportedOption`.
pub fn activate_named(x: &Matrix32, name: &str, alpha: f64) -> Result<Matrix32, MemconvError> {
    let kind: ActivationKind = name.parse()?;
    activate(x, kind, alpha)
}
