//! This file is the root of the `memconv` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`hexdump`, `kernels`,
//!     `pipeline`, etc.) so the Rust compiler knows they exist.
//! 2.  Re-exporting the operations callers need, so the common path is
//!     `memconv::run_pipeline` rather than a deep module path.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
pub mod observability; // Make macros available throughout the crate

pub mod config;
pub mod error;
pub mod extract;
pub mod hexdump;
pub mod kernels;
pub mod packer;
pub mod pipeline;
pub mod types;

// `log_metric!` expands to `$crate::__log::...` so callers need no `log` import.
#[doc(hidden)]
pub use log as __log;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use config::{parse_dims, parse_hex_or_int, KernelSource, PackerConfig, PipelineConfig};
pub use error::MemconvError;
pub use extract::{extract_image, extract_kernel, image_window};
pub use hexdump::{
    decode, decode_file, encode_leading_zero_pad, encode_trailing_zero_pad, AddressStyle,
    ByteBuffer, MemoryRecord, WordOrder,
};
pub use observability::init_logging;
pub use packer::{pack_memory_image, pack_with_config};
pub use pipeline::{
    render_input_dump, render_result_dump, run_pipeline, run_pipeline_from_text, PipelineOutput,
    PipelineSummary,
};
pub use types::{ActivationKind, ImageDims, KernelMatrix, Matrix32, Matrix8, PoolMode};
