//! File metadata descriptors

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Descriptor attached 1:1 to each file moving through the pipeline.
///
/// The orchestrator passes these through opaquely and never mutates them;
/// every stage produces fresh values for its outputs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Metadata {
    /// Semantic type tag (e.g. "Number")
    pub data_type: String,

    /// Format tag (e.g. "plainText")
    pub file_type: String,

    /// Paths this file was derived from; empty for primary inputs
    #[serde(default)]
    pub sources: Vec<PathBuf>,
}

impl Metadata {
    /// Create metadata for a primary input file
    pub fn new(data_type: impl Into<String>, file_type: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            file_type: file_type.into(),
            sources: Vec::new(),
        }
    }

    /// Derive metadata for an output produced from the given source files,
    /// keeping the type and format tags
    pub fn derived_from(&self, sources: Vec<PathBuf>) -> Self {
        Self {
            data_type: self.data_type.clone(),
            file_type: self.file_type.clone(),
            sources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_metadata_keeps_tags() {
        let input = Metadata::new("Number", "plainText");
        let derived = input.derived_from(vec![PathBuf::from("/tmp/file1")]);

        assert_eq!(derived.data_type, "Number");
        assert_eq!(derived.file_type, "plainText");
        assert_eq!(derived.sources, vec![PathBuf::from("/tmp/file1")]);
        assert!(input.sources.is_empty());
    }
}
