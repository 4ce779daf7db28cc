//! Kernel sources and their reduction to trinary signed bytes.
//!
//! Whatever the source (a preset, inline values or CSV text), a kernel is held as
//! a 4x4 `f32` matrix until [`quantize_to_trinary`] forces every weight into
//! `{-1, 0, 1}`. The stored form is 16 two's-complement bytes in row-major order.

use ndarray::{arr2, Array2};

use crate::config::KernelSource;
use crate::error::MemconvError;
use crate::types::{KernelMatrix, KERNEL_SIZE};

/// A real-valued 4x4 kernel prior to quantization.
pub type RealKernel = Array2<f32>;

/// Names accepted by [`kernel_preset`].
pub const PRESET_NAMES: [&str; 4] = ["box", "edge", "sharpen", "emboss"];

//==================================================================================
// 1. Kernel Sources
//==================================================================================

/// Returns one of the built-in kernels. Every preset is already trinary.
///
/// An empty name selects `box`. Names are case-insensitive.
pub fn kernel_preset(name: &str) -> Result<RealKernel, MemconvError> {
    let lower = name.trim().to_ascii_lowercase();
    let kernel: RealKernel = match lower.as_str() {
        "" | "box" => Array2::ones((KERNEL_SIZE, KERNEL_SIZE)),
        "edge" => arr2(&[
            [-1.0, -1.0, -1.0, -1.0],
            [0.0, 0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0, 1.0],
            [0.0, 0.0, 0.0, 0.0],
        ]),
        "sharpen" => arr2(&[
            [0.0, -1.0, -1.0, 0.0],
            [-1.0, 1.0, 1.0, -1.0],
            [-1.0, 1.0, 1.0, -1.0],
            [0.0, -1.0, -1.0, 0.0],
        ]),
        "emboss" => arr2(&[
            [-1.0, -1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
            [0.0, 1.0, 1.0, 1.0],
        ]),
        _ => {
            return Err(MemconvError::UnsupportedOption {
                kind: "kernel preset",
                name: name.to_string(),
            })
        }
    };
    Ok(kernel)
}

fn parse_weight(text: &str) -> Result<f32, MemconvError> {
    text.parse::<f32>()
        .map_err(|e| MemconvError::FormatError(format!("bad kernel value '{}': {}", text, e)))
}

fn rows_to_kernel(rows: Vec<Vec<f32>>, source: &str) -> Result<RealKernel, MemconvError> {
    let shape_err = |rows: usize, cols: usize| {
        MemconvError::InvalidShape(format!(
            "{} must define a {k}x{k} matrix, got {}x{}",
            source,
            rows,
            cols,
            k = KERNEL_SIZE
        ))
    };
    let cols = rows.first().map_or(0, Vec::len);
    if rows.len() != KERNEL_SIZE || rows.iter().any(|r| r.len() != KERNEL_SIZE) {
        return Err(shape_err(rows.len(), cols));
    }
    let flat: Vec<f32> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((KERNEL_SIZE, KERNEL_SIZE), flat)
        .map_err(|e| MemconvError::InvalidShape(e.to_string()))
}

/// Parses inline rows such as `"1,0,-1,0; 1,0,-1,0; 1,0,-1,0; 1,0,-1,0"`.
///
/// Rows are separated by `;` and values by `,`. Empty rows and values are skipped.
pub fn parse_kernel_values(text: &str) -> Result<RealKernel, MemconvError> {
    let mut rows = Vec::new();
    for row in text.trim().split(';').map(str::trim) {
        if row.is_empty() {
            continue;
        }
        let values = row
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(parse_weight)
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(values);
    }
    rows_to_kernel(rows, "kernel values")
}

/// Parses CSV text with one kernel row per non-empty line.
pub fn parse_kernel_csv(text: &str) -> Result<RealKernel, MemconvError> {
    let mut rows = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        let values = line
            .split(',')
            .map(|v| parse_weight(v.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(values);
    }
    rows_to_kernel(rows, "kernel csv")
}

/// Resolves a configured kernel source into its real-valued matrix.
pub fn resolve_kernel(source: &KernelSource) -> Result<RealKernel, MemconvError> {
    match source {
        KernelSource::Preset(name) => kernel_preset(name),
        KernelSource::Values(text) => parse_kernel_values(text),
        KernelSource::Csv(text) => parse_kernel_csv(text),
    }
}

//==================================================================================
// 2. Quantization
//==================================================================================

/// Nearest-threshold rounding into `{-1, 0, 1}`: `> 0.5 -> 1`, `< -0.5 -> -1`.
#[inline]
pub fn quantize_to_trinary(value: f32) -> i8 {
    if value > 0.5 {
        1
    } else if value < -0.5 {
        -1
    } else {
        0
    }
}

/// Quantizes every weight of a real kernel.
pub fn quantize_kernel(kernel: &RealKernel) -> KernelMatrix {
    kernel.mapv(quantize_to_trinary)
}

/// Quantizes `kernel` and returns its 16 two's-complement bytes, row-major.
pub fn kernel_to_bytes(kernel: &RealKernel) -> Vec<u8> {
    let quantized: Vec<i8> = quantize_kernel(kernel).iter().copied().collect();
    bytemuck::cast_slice::<i8, u8>(&quantized).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_thresholds() {
        assert_eq!(quantize_to_trinary(0.6), 1);
        assert_eq!(quantize_to_trinary(-0.5), 0);
        assert_eq!(quantize_to_trinary(0.51), 1);
        assert_eq!(quantize_to_trinary(0.5), 0);
        assert_eq!(quantize_to_trinary(-0.51), -1);
        assert_eq!(quantize_to_trinary(-7.0), -1);
        assert_eq!(quantize_to_trinary(f32::NAN), 0);
    }

    #[test]
    fn test_presets_are_trinary_and_stable_under_quantization() {
        for name in PRESET_NAMES {
            let kernel = kernel_preset(name).unwrap();
            assert_eq!(kernel.dim(), (4, 4));
            let quantized = quantize_kernel(&kernel);
            assert_eq!(quantized.mapv(f32::from), kernel, "preset {}", name);
        }
    }

    #[test]
    fn test_preset_names_are_case_insensitive_and_default_to_box() {
        assert_eq!(kernel_preset("EDGE").unwrap(), kernel_preset("edge").unwrap());
        assert_eq!(kernel_preset("").unwrap(), Array2::<f32>::ones((4, 4)));
    }

    #[test]
    fn test_unknown_preset_is_unsupported() {
        let err = kernel_preset("blur").unwrap_err();
        assert!(matches!(
            err,
            MemconvError::UnsupportedOption { kind: "kernel preset", .. }
        ));
    }

    #[test]
    fn test_parse_kernel_values_skips_empty_parts() {
        let kernel = parse_kernel_values(" 1,0,-1,0; 1,0,-1,0;; 1, 0 ,-1,0,; 0.7,0,-0.7,0 ;").unwrap();
        assert_eq!(kernel[[0, 2]], -1.0);
        assert_eq!(kernel[[3, 0]], 0.7);
    }

    #[test]
    fn test_parse_kernel_values_shape_and_number_errors() {
        assert!(matches!(
            parse_kernel_values("1,0,-1; 1,0,-1; 1,0,-1"),
            Err(MemconvError::InvalidShape(_))
        ));
        assert!(matches!(
            parse_kernel_values("1,0,x,0; 1,0,-1,0; 1,0,-1,0; 1,0,-1,0"),
            Err(MemconvError::FormatError(_))
        ));
    }

    #[test]
    fn test_parse_kernel_csv() {
        let text = "0.9,0,0,0\n\n0,1,0,0\n0,0,-0.6,0\n0,0,0,0.2\n";
        let kernel = parse_kernel_csv(text).unwrap();
        assert_eq!(
            kernel_to_bytes(&kernel),
            vec![1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0xFF, 0, 0, 0, 0, 0]
        );
        assert!(matches!(
            parse_kernel_csv("1,1,1,1\n1,1,1,1\n"),
            Err(MemconvError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_kernel_to_bytes_is_twos_complement_row_major() {
        let bytes = kernel_to_bytes(&kernel_preset("edge").unwrap());
        assert_eq!(&bytes[..4], &[0xFF; 4]);
        assert_eq!(&bytes[4..8], &[0; 4]);
        assert_eq!(&bytes[8..12], &[1; 4]);
        assert_eq!(bytes.len(), 16);
    }

    #[test]
    fn test_resolve_kernel_dispatches_on_source() {
        let from_values = resolve_kernel(&KernelSource::Values(
            "1,1,1,1;1,1,1,1;1,1,1,1;1,1,1,1".to_string(),
        ))
        .unwrap();
        assert_eq!(from_values, resolve_kernel(&KernelSource::default()).unwrap());
    }
}
