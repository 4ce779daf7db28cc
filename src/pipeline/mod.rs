//! This module contains the end-to-end image pipeline.
//!
//! `orchestrator` drives one run over a decoded memory buffer; `artifact` holds the
//! run's outputs and the helpers that export them.

pub mod artifact;
pub mod orchestrator;

pub use artifact::{
    dump_int8, step_path, write_int8_dump, DumpFormat, PipelineOutput, PipelineSummary,
    StageArtifacts,
};
pub use orchestrator::{
    render_input_dump, render_result_dump, run_pipeline, run_pipeline_from_text,
};
