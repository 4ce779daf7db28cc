//! The top-level coordinator for one image-pipeline run.
//!
//! It owns no numeric logic. It pulls the kernel and image out of a decoded buffer,
//! calls each stage kernel in the fixed hardware order, tags any failure with the
//! stage that raised it, and reports what it did through `log`.

use crate::config::PipelineConfig;
use crate::error::MemconvError;
use crate::extract::{extract_image, extract_kernel};
use crate::hexdump::{
    decode, encode_leading_zero_pad, encode_trailing_zero_pad, AddressStyle, ByteBuffer,
    WordOrder,
};
use crate::kernels;
use crate::pipeline::artifact::{PipelineOutput, PipelineSummary, StageArtifacts};
use crate::types::{ActivationKind, Matrix8, PoolMode};

/// Comment attached to the first line of the input passthrough dump.
pub const INPUT_DUMP_COMMENT: &str = "image (input)";
/// Line width of the input passthrough dump.
pub const INPUT_DUMP_LINE_WIDTH: usize = 8;

//==================================================================================
// 1. Public Orchestration API
//==================================================================================

/// Runs extract, convolve, activate, pad, pool and finalize over `buffer`.
///
/// Padding and pooling only run when an activation is selected; otherwise the
/// correlation map itself is finalized. The pooling stage is always the fixed 2x2
/// truncating average; `config.pool` is carried into the summary but does not
/// select a reducer.
pub fn run_pipeline(buffer: &ByteBuffer, config: &PipelineConfig) -> Result<PipelineOutput, MemconvError> {
    log::debug!(
        "pipeline start: dims={}, image@0x{:x}, kernel@0x{:x}, buffer={} bytes",
        config.dims,
        config.image_offset,
        config.kernel_offset,
        buffer.len()
    );

    // 1. Extraction. The image is read first so a short buffer reports the image.
    let input = extract_image(buffer, config.image_offset, config.dims)
        .map_err(|e| e.at_stage("extract"))?;
    let kernel = extract_kernel(buffer, config.kernel_offset).map_err(|e| e.at_stage("extract"))?;

    // 2. Correlation into the wide accumulator.
    let conv = kernels::convolve4x4_valid(&input, &kernel).map_err(|e| e.at_stage("convolve"))?;
    log_metric!("event" = "convolve", "rows" = conv.nrows(), "cols" = conv.ncols());

    // 3-5. Activation, padding and pooling form one optional block: with no
    // activation selected the correlation map goes straight to finalize.
    let (activated, padded, pooled) = if config.activation == ActivationKind::None {
        log::debug!("no activation selected; padding and pooling skipped");
        (conv.clone(), None, None)
    } else {
        let activated = kernels::activate(&conv, config.activation, config.alpha)
            .map_err(|e| e.at_stage("activate"))?;
        log_metric!("event" = "activate", "kind" = config.activation);

        let padded = kernels::zero_pad(&activated, config.padding);

        if config.pool != PoolMode::Avg {
            log::warn!(
                "pool mode '{}' requested; the fixed 2x2 average reducer is applied",
                config.pool
            );
        }
        let pooled = kernels::avg_pool_4x4_stride4_valid(&padded).map_err(|e| e.at_stage("pool"))?;
        log_metric!("event" = "pool", "rows" = pooled.nrows(), "cols" = pooled.ncols());
        (activated, Some(padded), Some(pooled))
    };

    // 6. Saturation, then column alignment for the 8-byte dump lines.
    let last = pooled.as_ref().unwrap_or(&activated);
    let output = kernels::pad_cols_to_multiple_of_8(&kernels::finalize(last));

    let summary = PipelineSummary {
        dims: config.dims,
        image_offset: config.image_offset,
        kernel_offset: config.kernel_offset,
        activation: config.activation,
        pool_requested: config.pool,
        padding_applied: padded.as_ref().map_or(0, |_| config.effective_padding()),
        conv_shape: conv.dim(),
        pooled_shape: pooled.as_ref().map(|p| p.dim()),
        output_shape: output.dim(),
    };
    log::info!(
        "pipeline done: {} -> conv {:?} -> pooled {:?} -> output {:?}",
        summary.dims,
        summary.conv_shape,
        summary.pooled_shape,
        summary.output_shape
    );

    Ok(PipelineOutput {
        artifacts: StageArtifacts {
            input,
            kernel,
            conv,
            activated,
            padded,
            pooled,
            output,
        },
        summary,
    })
}

/// Decodes a hex dump and runs the pipeline over it.
pub fn run_pipeline_from_text(text: &str, config: &PipelineConfig) -> Result<PipelineOutput, MemconvError> {
    let buffer = decode(text).map_err(|e| e.at_stage("decode"))?;
    run_pipeline(&buffer, config)
}

//==================================================================================
// 2. Result Rendering
//==================================================================================

fn matrix_bytes(matrix: &Matrix8) -> Vec<u8> {
    let samples: Vec<i8> = matrix.iter().copied().collect();
    bytemuck::cast_slice::<i8, u8>(&samples).to_vec()
}

/// The final result as a memory dump: from address 0, one word per line.
pub fn render_result_dump(output: &PipelineOutput) -> String {
    encode_trailing_zero_pad(
        &matrix_bytes(&output.artifacts.output),
        AddressStyle::Wide,
        WordOrder::Little,
    )
}

/// The extracted image bytes re-emitted from address 0, unchanged.
pub fn render_input_dump(output: &PipelineOutput) -> Result<String, MemconvError> {
    encode_leading_zero_pad(
        0,
        &matrix_bytes(&output.artifacts.input),
        INPUT_DUMP_LINE_WIDTH,
        Some(INPUT_DUMP_COMMENT),
    )
}
