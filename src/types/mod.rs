//! This module defines the core, strongly-typed data representations used
//! throughout the memconv pipeline.
//!
//! It includes the matrix aliases each stage consumes and produces, the image
//! dimension pair, and the string-selectable stage options (`ActivationKind`,
//! `PoolMode`) which replace free-form names with safe, serializable enums.

pub mod matrix;
pub mod stage_options;

// Re-export the main type(s) for easier access.
pub use matrix::{ImageDims, KernelMatrix, Matrix32, Matrix8, KERNEL_SIZE};
pub use stage_options::{ActivationKind, PoolMode};
