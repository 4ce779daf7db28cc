// In: src/config.rs

//! The single source of truth for all memconv run configuration.
//!
//! `PipelineConfig` describes one image-pipeline run over a decoded memory dump;
//! `PackerConfig` describes how a kernel/image memory file is produced. Both are
//! created once at the application boundary (a JSON file, a command line, a test)
//! and passed down by reference. The string helpers at the bottom of this module
//! convert the conventional command-line spellings into typed values.

use serde::{Deserialize, Serialize};

use crate::error::MemconvError;
use crate::hexdump::WordOrder;
use crate::types::{ActivationKind, ImageDims, PoolMode};

//==================================================================================
// I. Memory Layout Defaults
//==================================================================================

/// Default byte offset of the 4x4 kernel inside the memory file.
pub const DEFAULT_KERNEL_OFFSET: u64 = 0x00;
/// Default byte offset of the first image byte inside the memory file.
pub const DEFAULT_IMAGE_OFFSET: u64 = 0x10;
/// Default leaky-ReLU slope. Accepted for compatibility, never used by the math.
pub const DEFAULT_ALPHA: f64 = 0.01;

//==================================================================================
// II. Pipeline Configuration
//==================================================================================

/// Configuration for one run of the image pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct PipelineConfig {
    /// Image dimensions. There is no meaningful default; runs with a zero
    /// dimension fail at the convolution stage.
    pub dims: ImageDims,

    /// Byte offset of the image inside the decoded buffer.
    pub image_offset: u64,

    /// Byte offset of the kernel inside the decoded buffer.
    pub kernel_offset: u64,

    pub activation: ActivationKind,

    /// Leaky-ReLU slope. The activation divides by a fixed 4 regardless.
    pub alpha: f64,

    /// Pooling mode requested by the caller. Validated and reported, but the main
    /// flow always uses the fixed 2x2 average reducer.
    pub pool: PoolMode,

    /// Zero padding added to the bottom and right of the activation output.
    /// Values below zero are treated as zero.
    pub padding: i64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dims: ImageDims::default(),
            image_offset: DEFAULT_IMAGE_OFFSET,
            kernel_offset: DEFAULT_KERNEL_OFFSET,
            activation: ActivationKind::default(),
            alpha: DEFAULT_ALPHA,
            pool: PoolMode::default(),
            padding: 0,
        }
    }
}

impl PipelineConfig {
    /// Convenience constructor with default offsets and stage options.
    pub fn with_dims(dims: ImageDims) -> Self {
        Self {
            dims,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, MemconvError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, MemconvError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The padding margin actually applied before pooling.
    pub fn effective_padding(&self) -> usize {
        usize::try_from(self.padding.max(0)).unwrap_or(usize::MAX)
    }
}

//==================================================================================
// III. Packer Configuration
//==================================================================================

/// Where the packer takes its 4x4 kernel from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum KernelSource {
    /// A named preset: `box`, `edge`, `sharpen` or `emboss`.
    Preset(String),
    /// Inline rows such as `"1,0,-1,0; 1,0,-1,0; 1,0,-1,0; 1,0,-1,0"`.
    Values(String),
    /// The text of a CSV file with four rows of four values.
    Csv(String),
}

impl Default for KernelSource {
    fn default() -> Self {
        KernelSource::Preset("box".to_string())
    }
}

/// Configuration for producing a kernel/image memory file.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "snake_case")]
pub struct PackerConfig {
    pub kernel: KernelSource,
    /// Byte order within each printed 64-bit line.
    pub word_order: WordOrder,
}

//==================================================================================
// IV. Command-Line Spellings
//==================================================================================

/// Parses `"WIDTHxHEIGHT"` (e.g. `"1024x768"`) into rows and columns.
pub fn parse_dims(s: &str) -> Result<ImageDims, MemconvError> {
    let bad = || {
        MemconvError::ConfigError(format!(
            "use dims \"WIDTHxHEIGHT\", e.g. \"1024x1024\" (got '{}')",
            s
        ))
    };
    let lower = s.trim().to_ascii_lowercase();
    let (w, h) = lower.split_once('x').ok_or_else(bad)?;
    let width = w.trim().parse::<usize>().map_err(|_| bad())?;
    let height = h.trim().parse::<usize>().map_err(|_| bad())?;
    Ok(ImageDims::new(height, width))
}

/// Parses an offset written either as `0x`-prefixed hex or as plain decimal.
pub fn parse_hex_or_int(s: &str) -> Result<u64, MemconvError> {
    let v = s.trim().to_ascii_lowercase();
    let parsed = match v.strip_prefix("0x") {
        Some(digits) => u64::from_str_radix(digits, 16),
        None => v.parse::<u64>(),
    };
    parsed.map_err(|e| MemconvError::ConfigError(format!("invalid offset '{}': {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dims_is_width_first() {
        let dims = parse_dims("640x480").unwrap();
        assert_eq!(dims, ImageDims::new(480, 640));
        assert_eq!(parse_dims(" 8X4 ").unwrap(), ImageDims::new(4, 8));
    }

    #[test]
    fn test_parse_dims_rejects_garbage() {
        assert!(matches!(parse_dims("640"), Err(MemconvError::ConfigError(_))));
        assert!(matches!(parse_dims("ax4"), Err(MemconvError::ConfigError(_))));
    }

    #[test]
    fn test_parse_hex_or_int() {
        assert_eq!(parse_hex_or_int("0x10").unwrap(), 16);
        assert_eq!(parse_hex_or_int("0X1f").unwrap(), 31);
        assert_eq!(parse_hex_or_int("16").unwrap(), 16);
        assert!(matches!(parse_hex_or_int("0xzz"), Err(MemconvError::ConfigError(_))));
        assert!(parse_hex_or_int("ten").is_err());
    }

    #[test]
    fn test_pipeline_config_defaults_and_json() {
        let config = PipelineConfig::from_json_str(
            r#"{ "dims": { "height": 8, "width": 8 }, "activation": "lrelu", "padding": -3 }"#,
        )
        .unwrap();
        assert_eq!(config.image_offset, 0x10);
        assert_eq!(config.kernel_offset, 0x00);
        assert_eq!(config.activation, ActivationKind::LeakyRelu);
        assert_eq!(config.pool, PoolMode::None);
        assert_eq!(config.effective_padding(), 0);

        let back = PipelineConfig::from_json_str(&config.to_json_string().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_pool_name_fails_config_load() {
        let result = PipelineConfig::from_json_str(r#"{ "pool": "median" }"#);
        assert!(matches!(result, Err(MemconvError::SerdeJson(_))));
    }

    #[test]
    fn test_packer_config_default_is_box_little() {
        let config = PackerConfig::default();
        assert_eq!(config.kernel, KernelSource::Preset("box".to_string()));
        assert_eq!(config.word_order, WordOrder::Little);
    }
}
