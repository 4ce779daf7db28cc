//! The kernel/image memory file written for the hardware testbench.
//!
//! Layout, 8 bytes per line:
//!
//! ```text
//! @00000000  <8 kernel bytes>
//! @00000008  <8 kernel bytes>
//! @00000010  <image bytes, row-major, biased by +128>
//! ```

use ndarray::Array2;

use crate::config::PackerConfig;
use crate::error::MemconvError;
use crate::extract::KERNEL_BYTES;
use crate::hexdump::{encode_trailing_zero_pad, AddressStyle, WordOrder};
use crate::packer::quantize::{kernel_to_bytes, resolve_kernel};

/// Bias added (wrapping) to every grayscale byte before storage.
pub const IMAGE_BIAS: u8 = 128;

/// Concatenates the kernel header and the biased image bytes in memory order.
pub fn memory_image_bytes(kernel_bytes: &[u8], image: &Array2<u8>) -> Result<Vec<u8>, MemconvError> {
    if kernel_bytes.len() != KERNEL_BYTES {
        return Err(MemconvError::InvalidShape(format!(
            "kernel header must be {} bytes, got {}",
            KERNEL_BYTES,
            kernel_bytes.len()
        )));
    }
    let mut stream = Vec::with_capacity(KERNEL_BYTES + image.len());
    stream.extend_from_slice(kernel_bytes);
    stream.extend(image.iter().map(|&px| px.wrapping_add(IMAGE_BIAS)));
    Ok(stream)
}

/// Renders the packed kernel and image in the narrow address style.
pub fn pack_memory_image(
    kernel_bytes: &[u8],
    image: &Array2<u8>,
    order: WordOrder,
) -> Result<String, MemconvError> {
    let stream = memory_image_bytes(kernel_bytes, image)?;
    let (h, w) = image.dim();
    log::debug!(
        "packing {}x{} image behind a {} byte kernel header ({} bytes total, {:?} order)",
        h,
        w,
        KERNEL_BYTES,
        stream.len(),
        order
    );
    Ok(encode_trailing_zero_pad(&stream, AddressStyle::Narrow, order))
}

/// Resolves and quantizes the configured kernel, then packs `image`.
pub fn pack_with_config(config: &PackerConfig, image: &Array2<u8>) -> Result<String, MemconvError> {
    let kernel = resolve_kernel(&config.kernel)?;
    pack_memory_image(&kernel_to_bytes(&kernel), image, config.word_order)
}
