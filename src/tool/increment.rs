//! Increment tool (stage 1)

use super::{Tool, ToolError, read_number, write_number};
use crate::group::{FileGroup, MetadataGroup, file_group, metadata_group};

/// Reads one integer from the `"input"` file, increments it, and writes the
/// result to the `"output"` path. Applied independently once per input.
#[derive(Debug, Default)]
pub struct IncrementTool;

impl Tool for IncrementTool {
    fn name(&self) -> &'static str {
        "increment"
    }

    fn run(
        &self,
        inputs: &FileGroup,
        metadata: &MetadataGroup,
        outputs: &FileGroup,
    ) -> Result<(FileGroup, MetadataGroup), ToolError> {
        let input = inputs
            .get("input")
            .and_then(|paths| paths.first())
            .ok_or(ToolError::MissingGroup {
                kind: "inputs",
                name: "input",
            })?;
        let input_md = metadata
            .get("input")
            .and_then(|entries| entries.first())
            .ok_or(ToolError::MissingGroup {
                kind: "metadata",
                name: "input",
            })?;
        let output = outputs
            .get("output")
            .and_then(|paths| paths.first())
            .ok_or(ToolError::MissingGroup {
                kind: "outputs",
                name: "output",
            })?;

        let value = read_number(input)?;
        write_number(output, value + 1)?;

        tracing::debug!(
            input = %input.display(),
            output = %output.display(),
            value,
            "incremented"
        );

        let out_md = input_md.derived_from(vec![input.clone()]);
        Ok((
            file_group("output", vec![output.clone()]),
            metadata_group("output", vec![out_md]),
        ))
    }
}
