//! Two-stage fan-in orchestrator

use crate::group::{FileGroup, MetadataGroup, file_group, metadata_group, sole_entry};
use crate::metadata::Metadata;
use crate::report::{Reporter, TracingReporter};
use crate::tool::{CumulativeSumTool, IncrementTool, Tool, ToolError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Suffix appended to an input path to derive its stage-1 output path
const STAGE1_SUFFIX: &str = ".out";

/// Errors that abort a pipeline run
///
/// Per-item stage-1 failures are not represented here: they are reported
/// and skipped, and the run proceeds with the survivors.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("expected exactly one input file group, found {found}")]
    InputGroupCardinality { found: usize },

    #[error("expected exactly one input metadata group, found {found}")]
    MetadataGroupCardinality { found: usize },

    #[error("input file group '{files}' does not match metadata group '{metadata}'")]
    GroupNameMismatch { files: String, metadata: String },

    #[error("group '{group}' has {files} files but {metadata} metadata entries")]
    LengthMismatch {
        group: String,
        files: usize,
        metadata: usize,
    },

    #[error("aggregation stage failed: {source}")]
    AggregationFailed {
        #[source]
        source: ToolError,
    },
}

/// Check the input-shape preconditions without running any stage.
///
/// Returns the sole logical name with its file and metadata sequences.
pub fn validate_shape<'a>(
    input_files: &'a FileGroup,
    input_metadata: &'a MetadataGroup,
) -> Result<(&'a str, &'a [PathBuf], &'a [Metadata]), WorkflowError> {
    let (name, files) = sole_entry(input_files).ok_or(WorkflowError::InputGroupCardinality {
        found: input_files.len(),
    })?;
    let (md_name, mds) =
        sole_entry(input_metadata).ok_or(WorkflowError::MetadataGroupCardinality {
            found: input_metadata.len(),
        })?;
    if name != md_name {
        return Err(WorkflowError::GroupNameMismatch {
            files: name.to_string(),
            metadata: md_name.to_string(),
        });
    }
    if files.len() != mds.len() {
        return Err(WorkflowError::LengthMismatch {
            group: name.to_string(),
            files: files.len(),
            metadata: mds.len(),
        });
    }
    Ok((name, files, mds))
}

fn stage1_output_path(input: &Path) -> PathBuf {
    let mut raw = input.as_os_str().to_os_string();
    raw.push(STAGE1_SUFFIX);
    PathBuf::from(raw)
}

/// Fan-in pipeline: one increment per input, then a single cumulative sum
/// over every output that survived stage 1.
///
/// ```text
///       1           2           3          ...
///       |           |           |           |
///   increment   increment   increment   increment
///       |           |           |           |
///       +-----------+-----+-----+-----------+
///                         |
///                  cumulative sum
///                         |
///             +-----------+-----------+
///             |           |           |
///             4           5          ...
/// ```
///
/// Execution is single-threaded and strictly sequential: each stage-1
/// iteration completes before the next begins, and stage 2 starts only
/// after the whole loop has finished. Neither stage is retried.
pub struct SummerWorkflow {
    stage1: Box<dyn Tool>,
    stage2: Box<dyn Tool>,
    reporter: Arc<dyn Reporter>,
}

impl SummerWorkflow {
    /// Wire the default tools and the `tracing`-backed reporter
    pub fn new() -> Self {
        Self::with_tools(
            Box::new(IncrementTool),
            Box::new(CumulativeSumTool),
            Arc::new(TracingReporter),
        )
    }

    /// Wire specific stage tools and reporter
    pub fn with_tools(
        stage1: Box<dyn Tool>,
        stage2: Box<dyn Tool>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            stage1,
            stage2,
            reporter,
        }
    }

    /// Run the pipeline.
    ///
    /// Stage-1 failures are tolerated: the failing index is reported and
    /// skipped, so the sequences fed to stage 2 may be shorter than the
    /// input and no longer index-aligned with it. A stage-2 failure aborts
    /// the run with [`WorkflowError::AggregationFailed`]; shape violations
    /// abort before any stage is invoked.
    pub fn run(
        &self,
        input_files: &FileGroup,
        input_metadata: &MetadataGroup,
        output_files: &FileGroup,
    ) -> Result<(FileGroup, MetadataGroup), WorkflowError> {
        self.reporter.info("0. check input shape");
        let (_, files, mds) = validate_shape(input_files, input_metadata)?;

        let total = files.len();
        let mut survivors: Vec<PathBuf> = Vec::with_capacity(total);
        let mut survivor_mds: Vec<Metadata> = Vec::with_capacity(total);

        self.reporter
            .info(&format!("1. apply {} to each input", self.stage1.name()));
        for (index, (path, md)) in files.iter().zip(mds.iter()).enumerate() {
            let stage_inputs = file_group("input", vec![path.clone()]);
            let stage_metadata = metadata_group("input", vec![md.clone()]);
            let stage_outputs = file_group("output", vec![stage1_output_path(path)]);

            match self
                .stage1
                .run(&stage_inputs, &stage_metadata, &stage_outputs)
            {
                Ok((mut out_files, mut out_mds)) => {
                    let file = out_files
                        .remove("output")
                        .and_then(|paths| paths.into_iter().next());
                    let md = out_mds
                        .remove("output")
                        .and_then(|entries| entries.into_iter().next());
                    match (file, md) {
                        (Some(file), Some(md)) => {
                            survivors.push(file);
                            survivor_mds.push(md);
                        }
                        _ => self.reporter.error(&format!(
                            "{} run {index} returned no 'output' binding",
                            self.stage1.name()
                        )),
                    }
                }
                Err(e) => self
                    .reporter
                    .error(&format!("{} run {index} failed: {e}", self.stage1.name())),
            }
            self.reporter
                .progress(75.0 * (index + 1) as f64 / total as f64);
        }

        self.reporter.info(&format!(
            "2. fold {} surviving outputs through {}",
            survivors.len(),
            self.stage2.name()
        ));
        let stage_inputs = file_group("input", survivors);
        let stage_metadata = metadata_group("input", survivor_mds);

        match self.stage2.run(&stage_inputs, &stage_metadata, output_files) {
            Ok((out_files, out_mds)) => {
                self.reporter.progress(100.0);
                self.reporter.info("3. return aggregated outputs");
                Ok((out_files, out_mds))
            }
            Err(e) => {
                self.reporter
                    .fatal(&format!("{} failed: {e}", self.stage2.name()));
                Err(WorkflowError::AggregationFailed { source: e })
            }
        }
    }
}

impl Default for SummerWorkflow {
    fn default() -> Self {
        Self::new()
    }
}
