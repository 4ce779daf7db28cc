//! Typed views carved out of a decoded memory buffer.
//!
//! The memory-file layout places a row-major 4x4 kernel and a row-major `H x W`
//! image at caller-given byte offsets. Bytes are reinterpreted as two's-complement
//! `i8` with `bytemuck`, never converted value by value.

use ndarray::Array2;

use crate::error::MemconvError;
use crate::hexdump::ByteBuffer;
use crate::types::{ImageDims, KernelMatrix, Matrix8, KERNEL_SIZE};

/// Number of bytes the kernel occupies in memory.
pub const KERNEL_BYTES: usize = KERNEL_SIZE * KERNEL_SIZE;

fn to_matrix(samples: &[i8], rows: usize, cols: usize) -> Result<Matrix8, MemconvError> {
    Array2::from_shape_vec((rows, cols), samples.to_vec())
        .map_err(|e| MemconvError::InvalidShape(e.to_string()))
}

/// Reads the 16 kernel bytes at `offset` as a 4x4 signed matrix.
pub fn extract_kernel(buffer: &ByteBuffer, offset: u64) -> Result<KernelMatrix, MemconvError> {
    let samples = buffer.window_i8("kernel", offset, KERNEL_BYTES)?;
    to_matrix(samples, KERNEL_SIZE, KERNEL_SIZE)
}

fn image_len(dims: ImageDims) -> Result<usize, MemconvError> {
    dims.byte_len().ok_or_else(|| {
        MemconvError::InvalidShape(format!("image dims {} overflow the address space", dims))
    })
}

/// Borrows the raw image bytes at `offset` without reinterpreting them.
pub fn image_window(buffer: &ByteBuffer, offset: u64, dims: ImageDims) -> Result<&[u8], MemconvError> {
    buffer.window("image", offset, image_len(dims)?)
}

/// Reads `dims.height * dims.width` bytes at `offset` as a row-major signed matrix.
pub fn extract_image(buffer: &ByteBuffer, offset: u64, dims: ImageDims) -> Result<Matrix8, MemconvError> {
    let samples = buffer.window_i8("image", offset, image_len(dims)?)?;
    to_matrix(samples, dims.height, dims.width)
}
