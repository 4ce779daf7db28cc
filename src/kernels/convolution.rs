//! This module contains the pure, stateless kernel for the 4x4 "valid"
//! sliding-window stage.
//!
//! The kernel is applied as a correlation: `out[y, x] = Σ image[y+dy, x+dx] *
//! kernel[dy, dx]` with no flip, matching the hardware reference. Both operands are
//! widened to `i32` before multiplication; the worst case (16 * 128 * 128) is far
//! inside the accumulator range.

use ndarray::{s, Array2};

use crate::error::MemconvError;
use crate::types::{KernelMatrix, Matrix32, Matrix8, KERNEL_SIZE};

/// Output shape of a valid 4x4 window over an `h` x `w` image.
pub fn valid_output_shape(h: usize, w: usize) -> Result<(usize, usize), MemconvError> {
    if h < KERNEL_SIZE || w < KERNEL_SIZE {
        return Err(MemconvError::InvalidShape(format!(
            "image must be at least {k}x{k}, got {h}x{w}",
            k = KERNEL_SIZE
        )));
    }
    Ok((h - KERNEL_SIZE + 1, w - KERNEL_SIZE + 1))
}

/// Correlates `image` with a 4x4 `kernel` at every fully-overlapping position.
///
/// Accumulates one shifted image window per kernel tap, which keeps the inner
/// loop a contiguous elementwise update.
pub fn convolve4x4_valid(image: &Matrix8, kernel: &KernelMatrix) -> Result<Matrix32, MemconvError> {
    if kernel.dim() != (KERNEL_SIZE, KERNEL_SIZE) {
        let (kh, kw) = kernel.dim();
        return Err(MemconvError::InvalidShape(format!(
            "kernel must be {k}x{k}, got {kh}x{kw}",
            k = KERNEL_SIZE
        )));
    }
    let (h, w) = image.dim();
    let (out_h, out_w) = valid_output_shape(h, w)?;

    let image32 = image.mapv(i32::from);
    let mut out: Matrix32 = Array2::zeros((out_h, out_w));

    for ((dy, dx), &tap) in kernel.indexed_iter() {
        let tap = i32::from(tap);
        if tap == 0 {
            continue;
        }
        let window = image32.slice(s![dy..dy + out_h, dx..dx + out_w]);
        out.zip_mut_with(&window, |acc, &v| *acc += v * tap);
    }
    Ok(out)
}
