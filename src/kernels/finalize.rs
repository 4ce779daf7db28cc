//! The final narrowing stage and its companions.
//!
//! `finalize` is the only place the pipeline leaves the wide accumulator domain.
//! The display mapping and the column padding both operate on its output.

use ndarray::{s, Array2};

use crate::kernels::arith::{saturate_i8, saturate_real_i8, to_display_byte};
use crate::types::{Matrix32, Matrix8};

/// Column alignment required by the 8-byte memory-dump lines.
pub const COLUMN_ALIGN: usize = 8;

/// Saturates every element into `[-128, 127]`.
///
/// Integer inputs are already whole, so rounding is the identity here.
pub fn finalize(x: &Matrix32) -> Matrix8 {
    x.mapv(|v| saturate_i8(i64::from(v)))
}

/// Rounds half away from zero, then saturates into `[-128, 127]`.
///
/// For fractional values produced outside the integer pipeline.
pub fn finalize_real(x: &Array2<f64>) -> Matrix8 {
    x.mapv(saturate_real_i8)
}

/// Maps a finalized matrix to unsigned grayscale for rendering (`v + 128`).
pub fn to_display_u8(x: &Matrix8) -> Array2<u8> {
    x.mapv(to_display_byte)
}

/// Appends zero columns until the column count is a multiple of 8.
pub fn pad_cols_to_multiple_of_8(x: &Matrix8) -> Matrix8 {
    let (rows, cols) = x.dim();
    let remainder = cols % COLUMN_ALIGN;
    if remainder == 0 {
        return x.clone();
    }
    let mut out = Array2::zeros((rows, cols + COLUMN_ALIGN - remainder));
    out.slice_mut(s![.., ..cols]).assign(x);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_finalize_saturates() {
        let x = arr2(&[[300, -300, 127, -128, 0, 42]]);
        assert_eq!(finalize(&x), arr2(&[[127i8, -128, 127, -128, 0, 42]]));
    }

    #[test]
    fn test_finalize_real_rounds_half_away() {
        let x = arr2(&[[200.6, -200.4, 3.5, -3.5, 2.49]]);
        assert_eq!(finalize_real(&x), arr2(&[[127i8, -128, 4, -4, 2]]));
    }

    #[test]
    fn test_display_mapping() {
        let x = arr2(&[[-128i8, -1, 0, 127]]);
        assert_eq!(to_display_u8(&x), arr2(&[[0u8, 127, 128, 255]]));
    }

    #[test]
    fn test_pad_cols_to_multiple_of_8() {
        let x = Array2::from_elem((2, 3), 5i8);
        let out = pad_cols_to_multiple_of_8(&x);
        assert_eq!(out.dim(), (2, 8));
        assert_eq!(out.row(0).to_vec(), vec![5, 5, 5, 0, 0, 0, 0, 0]);

        let aligned = Array2::from_elem((1, 16), 1i8);
        assert_eq!(pad_cols_to_multiple_of_8(&aligned), aligned);

        let empty: Matrix8 = Array2::zeros((0, 0));
        assert_eq!(pad_cols_to_multiple_of_8(&empty).dim(), (0, 0));
    }
}
