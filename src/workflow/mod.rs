//! Pipeline orchestration

mod runner;

pub use runner::{SummerWorkflow, WorkflowError, validate_shape};
