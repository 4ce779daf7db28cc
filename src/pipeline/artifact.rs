//! The values a pipeline run leaves behind.
//!
//! `StageArtifacts` keeps every intermediate matrix so callers can render or export
//! any stage; `PipelineSummary` is the serializable report of what was run. The
//! export helpers at the bottom write a finalized `i8` matrix as CSV or raw bytes
//! and derive per-stage file names.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MemconvError;
use crate::kernels::arith::to_display_byte;
use crate::types::{ActivationKind, ImageDims, Matrix32, Matrix8, PoolMode};

//==================================================================================
// 1. Run Results
//==================================================================================

/// Every intermediate matrix of one run, in stage order.
#[derive(Debug, Clone, PartialEq)]
pub struct StageArtifacts {
    /// The extracted image, signed.
    pub input: Matrix8,
    pub kernel: Matrix8,
    pub conv: Matrix32,
    /// The correlation map itself when no activation is selected.
    pub activated: Matrix32,
    /// The activation output after bottom/right zero padding. `None` when no
    /// activation is selected.
    pub padded: Option<Matrix32>,
    /// `None` when no activation is selected.
    pub pooled: Option<Matrix32>,
    /// The saturated result with its columns padded to a multiple of 8.
    pub output: Matrix8,
}

/// A serializable report of one run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    pub dims: ImageDims,
    pub image_offset: u64,
    pub kernel_offset: u64,
    pub activation: ActivationKind,
    /// The pooling mode the caller asked for. The run always applies the fixed
    /// 2x2 average reducer.
    pub pool_requested: PoolMode,
    pub padding_applied: usize,
    pub conv_shape: (usize, usize),
    /// `None` when pooling was skipped.
    pub pooled_shape: Option<(usize, usize)>,
    pub output_shape: (usize, usize),
}

impl fmt::Display for PipelineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== pipeline summary ===")?;
        writeln!(f, "dims (HxW)     : {}", self.dims)?;
        writeln!(f, "image @        : 0x{:x}", self.image_offset)?;
        writeln!(f, "kernel @       : 0x{:x}", self.kernel_offset)?;
        writeln!(f, "act            : {}", self.activation)?;
        writeln!(f, "pool           : {}", self.pool_requested)?;
        writeln!(f, "padding        : {}", self.padding_applied)?;
        writeln!(f, "conv shape     : {}x{}", self.conv_shape.0, self.conv_shape.1)?;
        match self.pooled_shape {
            Some((h, w)) => writeln!(f, "pooled shape   : {}x{}", h, w)?,
            None => writeln!(f, "pooled shape   : skipped")?,
        }
        write!(f, "output shape   : {}x{}", self.output_shape.0, self.output_shape.1)
    }
}

/// The complete result of `run_pipeline`.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub artifacts: StageArtifacts,
    pub summary: PipelineSummary,
}

//==================================================================================
// 2. Matrix Export
//==================================================================================

/// File encodings accepted by [`dump_int8`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DumpFormat {
    /// Comma-separated decimal integers, one matrix row per line.
    Csv,
    /// Raw bytes in row-major order.
    Bin,
}

impl FromStr for DumpFormat {
    type Err = MemconvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(DumpFormat::Csv),
            "bin" => Ok(DumpFormat::Bin),
            _ => Err(MemconvError::UnsupportedOption {
                kind: "dump format",
                name: s.to_string(),
            }),
        }
    }
}

/// Serializes a finalized matrix.
///
/// With `map_to_u8` every value is shifted by `+128` into `0..=255` first; without
/// it, CSV holds signed values and BIN holds the two's-complement bytes.
pub fn dump_int8(matrix: &Matrix8, format: DumpFormat, map_to_u8: bool) -> Vec<u8> {
    match format {
        DumpFormat::Csv => {
            let mut text = String::new();
            for row in matrix.rows() {
                let cells: Vec<String> = row
                    .iter()
                    .map(|&v| {
                        if map_to_u8 {
                            to_display_byte(v).to_string()
                        } else {
                            v.to_string()
                        }
                    })
                    .collect();
                text.push_str(&cells.join(","));
                text.push('\n');
            }
            text.into_bytes()
        }
        DumpFormat::Bin => matrix
            .iter()
            .map(|&v| if map_to_u8 { to_display_byte(v) } else { v as u8 })
            .collect(),
    }
}

/// Writes [`dump_int8`] output to `path`.
pub fn write_int8_dump<P: AsRef<Path>>(
    path: P,
    matrix: &Matrix8,
    format: DumpFormat,
    map_to_u8: bool,
) -> Result<(), MemconvError> {
    std::fs::write(path, dump_int8(matrix, format, map_to_u8))?;
    Ok(())
}

/// Derives a per-stage path: `out/frame.png` with tag `conv` becomes
/// `out/frame.conv.png`. A path without an extension just gains `.conv`.
pub fn step_path<P: AsRef<Path>>(base: P, tag: &str) -> PathBuf {
    let base = base.as_ref();
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{}.{}.{}", stem, tag, ext.to_string_lossy()),
        None => format!("{}.{}", stem, tag),
    };
    base.with_file_name(name)
}
