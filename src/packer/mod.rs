//! Production of kernel/image memory files.
//!
//! This is the inverse side of the image pipeline: it turns a kernel source and a
//! validated grayscale image into the memory file that `pipeline` later reads.

pub mod layout;
pub mod quantize;

pub use layout::{memory_image_bytes, pack_memory_image, pack_with_config, IMAGE_BIAS};
pub use quantize::{
    kernel_preset, kernel_to_bytes, parse_kernel_csv, parse_kernel_values, quantize_kernel,
    quantize_to_trinary, resolve_kernel, RealKernel, PRESET_NAMES,
};
