//! Matrix aliases and shape descriptors shared by every stage.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed side length of the correlation kernel.
pub const KERNEL_SIZE: usize = 4;

/// Signed 8-bit samples: extracted images and finalized outputs.
pub type Matrix8 = Array2<i8>;

/// Wide accumulator used by every stage between extraction and finalize.
pub type Matrix32 = Array2<i32>;

/// A `KERNEL_SIZE` x `KERNEL_SIZE` signed 8-bit weight matrix.
pub type KernelMatrix = Array2<i8>;

/// Image dimensions in rows and columns.
///
/// The textual form used by configuration is `WIDTHxHEIGHT`, see
/// [`crate::config::parse_dims`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ImageDims {
    pub height: usize,
    pub width: usize,
}

impl ImageDims {
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Number of bytes the image occupies in memory, or `None` on overflow.
    pub fn byte_len(&self) -> Option<usize> {
        self.height.checked_mul(self.width)
    }
}

impl fmt::Display for ImageDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}
