//! Cumulative sum tool (stage 2)

use super::{Tool, ToolError, read_number, write_number};
use crate::group::{FileGroup, MetadataGroup, file_group, metadata_group};
use crate::metadata::Metadata;
use std::path::{Path, PathBuf};

/// Folds N input integers left-to-right into N-1 intermediate sums.
///
/// For inputs (A, B, C, D) the outputs are O1 = A+B, O2 = O1+C, O3 = O2+D,
/// each written to a path expanded from the caller-supplied `"output"`
/// template. Zero or one input produces zero outputs and succeeds.
#[derive(Debug, Default)]
pub struct CumulativeSumTool;

/// Expand an output path template for the given 0-based output index.
///
/// A `{}` placeholder is replaced with the index; a template without one
/// gets the index appended, so multiple outputs never collide.
fn expand_template(template: &Path, index: usize) -> PathBuf {
    let raw = template.to_string_lossy();
    if raw.contains("{}") {
        PathBuf::from(raw.replace("{}", &index.to_string()))
    } else {
        PathBuf::from(format!("{raw}{index}"))
    }
}

impl Tool for CumulativeSumTool {
    fn name(&self) -> &'static str {
        "cumulative-sum"
    }

    fn run(
        &self,
        inputs: &FileGroup,
        metadata: &MetadataGroup,
        outputs: &FileGroup,
    ) -> Result<(FileGroup, MetadataGroup), ToolError> {
        let files = inputs.get("input").ok_or(ToolError::MissingGroup {
            kind: "inputs",
            name: "input",
        })?;
        let mds = metadata.get("input").ok_or(ToolError::MissingGroup {
            kind: "metadata",
            name: "input",
        })?;
        let template = outputs
            .get("output")
            .and_then(|paths| paths.first())
            .ok_or(ToolError::MissingGroup {
                kind: "outputs",
                name: "output",
            })?;

        let mut out_files: Vec<PathBuf> = Vec::new();
        let mut out_mds: Vec<Metadata> = Vec::new();

        if files.len() >= 2 {
            let mut running = read_number(&files[0])?;
            let mut previous = files[0].clone();

            for (index, path) in files[1..].iter().enumerate() {
                running += read_number(path)?;

                let out = expand_template(template, index);
                write_number(&out, running)?;
                tracing::debug!(output = %out.display(), running, "wrote intermediate sum");

                let base = mds.get(index + 1).cloned().unwrap_or_else(|| {
                    mds.first()
                        .cloned()
                        .unwrap_or_else(|| Metadata::new("Number", "plainText"))
                });
                out_mds.push(base.derived_from(vec![previous.clone(), path.clone()]));
                out_files.push(out.clone());
                previous = out;
            }
        }

        Ok((
            file_group("output", out_files),
            metadata_group("output", out_mds),
        ))
    }
}
