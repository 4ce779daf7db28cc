//! This module serves as the public API for the collection of pure, stateless
//! numeric kernels.
//!
//! Each stage consumes a plain matrix and returns a fresh one; none of them keeps
//! state or touches its input in place. The orchestrator in `pipeline` chains them
//! in the fixed hardware order.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Shared rounding, truncation and narrowing primitives.
pub mod arith;

/// Byte order: per-64-bit-word reversal used by the memory-dump codec.
pub mod word_swap;

/// Stage 1: 4x4 valid correlation.
pub mod convolution;
/// Stage 2: elementwise activation.
pub mod activation;
/// Stage 3: bottom/right zero padding.
pub mod padding;
/// Stage 4: 2x2 block reducers.
pub mod pooling;
/// Stage 5: saturating narrowing and output alignment.
pub mod finalize;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use activation::{activate, activate_named};
pub use convolution::convolve4x4_valid;
pub use finalize::{finalize, finalize_real, pad_cols_to_multiple_of_8, to_display_u8};
pub use padding::zero_pad;
pub use pooling::{avg_pool_4x4_stride4_valid, pool_2x2_stride2};
