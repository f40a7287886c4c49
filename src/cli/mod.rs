//! Command line workflows

pub mod orchestration;

pub use orchestration::{run_generate_workflow, GenerateArgs, WorkflowResult};
