//! Pipeline tools
//!
//! A tool consumes named groups of input files plus their metadata and
//! produces named groups of output files plus fresh metadata. Output
//! bindings are caller-supplied: the tool writes where it is told to.

mod increment;
mod sum;

pub use increment::IncrementTool;
pub use sum::CumulativeSumTool;

use crate::group::{FileGroup, MetadataGroup};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by tool execution
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} does not contain an integer (got {content:?})")]
    NotANumber { path: PathBuf, content: String },

    #[error("missing '{name}' group in {kind}")]
    MissingGroup { kind: &'static str, name: &'static str },
}

/// A unit of work in the pipeline
pub trait Tool {
    /// Name used in log lines
    fn name(&self) -> &'static str;

    /// Run the tool over the given bindings and return the produced
    /// output files and their metadata
    fn run(
        &self,
        inputs: &FileGroup,
        metadata: &MetadataGroup,
        outputs: &FileGroup,
    ) -> Result<(FileGroup, MetadataGroup), ToolError>;
}

/// Read a whitespace-trimmed integer from a file
pub(crate) fn read_number(path: &Path) -> Result<i64, ToolError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ToolError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let trimmed = contents.trim();
    trimmed.parse().map_err(|_| ToolError::NotANumber {
        path: path.to_path_buf(),
        content: trimmed.to_string(),
    })
}

/// Write an integer to a file
pub(crate) fn write_number(path: &Path, value: i64) -> Result<(), ToolError> {
    std::fs::write(path, value.to_string()).map_err(|source| ToolError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_number_trims_whitespace() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("n");
        std::fs::write(&path, " 42\n").unwrap();

        assert_eq!(read_number(&path).unwrap(), 42);
    }

    #[test]
    fn test_read_number_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("n");
        std::fs::write(&path, "not a number").unwrap();

        assert!(matches!(
            read_number(&path),
            Err(ToolError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_read_number_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing");

        assert!(matches!(read_number(&path), Err(ToolError::Read { .. })));
    }
}
