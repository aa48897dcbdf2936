//! Application launchers
//!
//! Two ways to feed the workflow: direct in-memory arguments, or a pair of
//! JSON configuration documents with results written back to disk.

mod direct;
mod json;

pub use direct::DirectLauncher;
pub use json::{
    InputBinding, JsonLauncher, MetadataEntry, OutputBinding, PipelineConfig, ResultsDocument,
    load_documents,
};
