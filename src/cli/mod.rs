//! Command-line workflow

pub mod orchestration;

pub use orchestration::{
    resolve_from_source, run_workflow, select_outputs, WorkflowArgs, WorkflowResult,
};
