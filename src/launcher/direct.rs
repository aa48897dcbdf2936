//! In-memory launcher

use crate::group::{FileGroup, MetadataGroup};
use crate::workflow::{SummerWorkflow, WorkflowError};

/// Launches the workflow with groups supplied directly by the caller
#[derive(Debug, Default)]
pub struct DirectLauncher;

impl DirectLauncher {
    pub fn launch(
        &self,
        input_files: &FileGroup,
        input_metadata: &MetadataGroup,
        output_files: &FileGroup,
    ) -> Result<(FileGroup, MetadataGroup), WorkflowError> {
        tracing::info!("launching workflow with in-memory arguments");
        let workflow = SummerWorkflow::new();
        let result = workflow.run(input_files, input_metadata, output_files);
        tracing::info!(success = result.is_ok(), "execution finished");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{file_group, metadata_group};
    use crate::metadata::Metadata;
    use tempfile::TempDir;

    #[test]
    fn test_launch_smoke() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("file1");
        std::fs::write(&input, "5").unwrap();

        let result = DirectLauncher.launch(
            &file_group("number", vec![input]),
            &metadata_group("number", vec![Metadata::new("Number", "plainText")]),
            &file_group("output", vec![dir.path().join("outputFile{}")]),
        );

        // One input folds into zero aggregate outputs, which is a success
        let (out_files, _) = result.unwrap();
        assert!(out_files["output"].is_empty());
    }
}
