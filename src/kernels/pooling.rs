//! This module contains the pure, stateless 2x2 block reducers.
//!
//! Two primitives exist side by side:
//!
//! * [`avg_pool_4x4_stride4_valid`] is the fixed reducer of the production
//!   pipeline. Despite its historical name it averages non-overlapping 2x2
//!   blocks with a divisor of 4.
//! * [`pool_2x2_stride2`] is the selectable reducer (`none`, `avg`, `max`).
//!
//! Both sum in `i64` and divide with truncation toward zero (`-7 / 4 == -1`).

use ndarray::Array2;

use crate::error::MemconvError;
use crate::kernels::arith::div_trunc;
use crate::types::{Matrix32, PoolMode};

/// Number of elements averaged by one 2x2 block.
pub const POOL_DIVISOR: i64 = 4;

//==================================================================================
// 1. Block Helpers
//==================================================================================

/// Applies `reduce` to every non-overlapping 2x2 block of the even-truncated input.
fn reduce_blocks_2x2<F>(x: &Matrix32, reduce: F) -> Result<Matrix32, MemconvError>
where
    F: Fn([i32; 4]) -> Result<i32, MemconvError>,
{
    let (out_h, out_w) = (x.nrows() / 2, x.ncols() / 2);
    let mut values = Vec::with_capacity(out_h * out_w);
    for r in 0..out_h {
        let y = 2 * r;
        for c in 0..out_w {
            let xx = 2 * c;
            values.push(reduce([
                x[[y, xx]],
                x[[y, xx + 1]],
                x[[y + 1, xx]],
                x[[y + 1, xx + 1]],
            ])?);
        }
    }
    Array2::from_shape_vec((out_h, out_w), values)
        .map_err(|e| MemconvError::InvalidShape(e.to_string()))
}

#[inline]
fn block_avg_trunc(block: [i32; 4]) -> Result<i32, MemconvError> {
    let sum: i64 = block.iter().map(|&v| i64::from(v)).sum();
    let mean = div_trunc(sum, POOL_DIVISOR)?;
    // The mean of four i32 values always fits back into i32.
    i32::try_from(mean)
        .map_err(|_| MemconvError::ConfigError(format!("block mean {} exceeds i32", mean)))
}

#[inline]
fn block_max(block: [i32; 4]) -> Result<i32, MemconvError> {
    Ok(block.into_iter().fold(i32::MIN, i32::max))
}

//==================================================================================
// 2. Public API
//==================================================================================

/// The production reducer: 2x2 blocks, stride 2, truncating average.
///
/// Odd trailing rows or columns are dropped. Output shape is `(H/2, W/2)`, which is
/// `0x0` whenever either dimension truncates to zero.
pub fn avg_pool_4x4_stride4_valid(x: &Matrix32) -> Result<Matrix32, MemconvError> {
    let (h, w) = x.dim();
    if h / 2 == 0 || w / 2 == 0 {
        return Ok(Array2::zeros((0, 0)));
    }
    reduce_blocks_2x2(x, block_avg_trunc)
}

/// The selectable reducer over 2x2 blocks with stride 2.
///
/// `PoolMode::None` returns the input unchanged, as does any mode when the input
/// has fewer than two rows or columns.
pub fn pool_2x2_stride2(x: &Matrix32, mode: PoolMode) -> Result<Matrix32, MemconvError> {
    let (h, w) = x.dim();
    if h / 2 == 0 || w / 2 == 0 {
        return Ok(x.clone());
    }
    match mode {
        PoolMode::Avg => reduce_blocks_2x2(x, block_avg_trunc),
        PoolMode::Max => reduce_blocks_2x2(x, block_max),
        PoolMode::None => Ok(x.clone()),
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_avg_truncates_toward_zero() {
        let negative = arr2(&[[-1, -2], [-3, -1]]); // sum -7
        let positive = arr2(&[[1, 2], [3, 1]]); // sum 7
        assert_eq!(avg_pool_4x4_stride4_valid(&negative).unwrap(), arr2(&[[-1]]));
        assert_eq!(avg_pool_4x4_stride4_valid(&positive).unwrap(), arr2(&[[1]]));
    }

    #[test]
    fn test_avg_drops_odd_edges() {
        let x = Array2::from_shape_fn((5, 7), |(r, c)| (r * 7 + c) as i32);
        let out = avg_pool_4x4_stride4_valid(&x).unwrap();
        assert_eq!(out.dim(), (2, 3));
        // Block (0, 0) = {0, 1, 7, 8} -> 16 / 4.
        assert_eq!(out[[0, 0]], 4);
        // Block (1, 2) = {18, 19, 25, 26} -> 88 / 4.
        assert_eq!(out[[1, 2]], 22);
    }

    #[test]
    fn test_avg_on_degenerate_input_is_empty() {
        let x = arr2(&[[5, 6, 7]]);
        assert_eq!(avg_pool_4x4_stride4_valid(&x).unwrap().dim(), (0, 0));
    }

    #[test]
    fn test_avg_does_not_overflow_on_extremes() {
        let x = Array2::from_elem((2, 2), i32::MAX);
        assert_eq!(avg_pool_4x4_stride4_valid(&x).unwrap()[[0, 0]], i32::MAX);
        let y = Array2::from_elem((2, 2), i32::MIN);
        assert_eq!(avg_pool_4x4_stride4_valid(&y).unwrap()[[0, 0]], i32::MIN);
    }

    #[test]
    fn test_selectable_max_and_avg() {
        let x = arr2(&[
            [1, -5, 0, 2],
            [3, 4, -9, -1],
            [7, 7, 7, 7],
        ]);
        assert_eq!(pool_2x2_stride2(&x, PoolMode::Max).unwrap(), arr2(&[[4, 2]]));
        // {1, -5, 3, 4} = 3 -> 0, {0, 2, -9, -1} = -8 -> -2
        assert_eq!(pool_2x2_stride2(&x, PoolMode::Avg).unwrap(), arr2(&[[0, -2]]));
        assert_eq!(pool_2x2_stride2(&x, PoolMode::None).unwrap(), x);
    }

    #[test]
    fn test_selectable_passthrough_on_thin_input() {
        let x = arr2(&[[1, 2, 3, 4]]);
        assert_eq!(pool_2x2_stride2(&x, PoolMode::Max).unwrap(), x);
        assert_eq!(pool_2x2_stride2(&x, PoolMode::Avg).unwrap(), x);
    }

    #[test]
    fn test_both_reducers_agree_on_avg() {
        let x = Array2::from_shape_fn((6, 6), |(r, c)| (r as i32 - 3) * 11 + c as i32 * 3);
        assert_eq!(
            avg_pool_4x4_stride4_valid(&x).unwrap(),
            pool_2x2_stride2(&x, PoolMode::Avg).unwrap()
        );
    }
}
