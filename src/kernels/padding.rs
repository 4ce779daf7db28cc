//! Zero padding applied to the activation output before pooling.
//!
//! The margin is added to the bottom and right edges only; the input keeps its
//! position at the origin. The downstream hardware expects this asymmetric layout.

use ndarray::{s, Array2};

use crate::types::Matrix32;

/// Returns `x` grown by `pad` rows and `pad` columns of zeros.
///
/// A `pad` of zero or less returns an unchanged copy.
pub fn zero_pad(x: &Matrix32, pad: i64) -> Matrix32 {
    let pad = match usize::try_from(pad) {
        Ok(p) if p > 0 => p,
        _ => return x.clone(),
    };
    let (h, w) = x.dim();
    let mut out = Array2::zeros((h + pad, w + pad));
    out.slice_mut(s![..h, ..w]).assign(x);
    out
}
