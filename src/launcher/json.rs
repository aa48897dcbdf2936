//! JSON-configuration launcher
//!
//! Reads a pipeline config document and an input metadata document, runs
//! the workflow, and writes a results document to disk.
//!
//! Config document:
//! ```json
//! {
//!   "input_files": [{ "name": "number", "value": "/tmp/file1" }],
//!   "output_files": [{ "name": "output", "file_path": "/tmp/outputFile{}" }],
//!   "arguments": {}
//! }
//! ```
//!
//! Metadata document (matched to input files by `name` + `file_path`):
//! ```json
//! [{ "name": "number", "file_path": "/tmp/file1",
//!    "data_type": "Number", "file_type": "plainText" }]
//! ```

use crate::group::{FileGroup, MetadataGroup};
use crate::metadata::Metadata;
use crate::workflow::SummerWorkflow;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One input binding in the config document
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputBinding {
    pub name: String,
    pub value: PathBuf,
}

/// One output binding in the config document
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputBinding {
    pub name: String,
    pub file_path: PathBuf,
}

/// Top-level pipeline config document
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub input_files: Vec<InputBinding>,

    #[serde(default)]
    pub output_files: Vec<OutputBinding>,

    /// Free-form tool arguments, passed through unused for now
    #[serde(default)]
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

/// One entry in the input metadata document
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetadataEntry {
    pub name: String,
    pub file_path: PathBuf,
    pub data_type: String,
    pub file_type: String,
}

/// One produced file in the results document
#[derive(Debug, Deserialize, Serialize)]
pub struct ResultEntry {
    pub name: String,
    pub file_path: PathBuf,
    pub data_type: String,
    pub file_type: String,
    pub sources: Vec<PathBuf>,
}

/// Results document written after a successful run
#[derive(Debug, Deserialize, Serialize)]
pub struct ResultsDocument {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub output_files: Vec<ResultEntry>,
}

/// Parse both documents and assemble the three workflow argument groups.
///
/// The order of the config's `input_files` list is authoritative; a listed
/// input without a matching metadata entry is a config error.
pub fn load_documents(
    config_path: &Path,
    metadata_path: &Path,
) -> Result<(FileGroup, MetadataGroup, FileGroup)> {
    let config: PipelineConfig = read_json(config_path)?;
    let entries: Vec<MetadataEntry> = read_json(metadata_path)?;

    let mut input_files = FileGroup::new();
    let mut input_metadata = MetadataGroup::new();
    for binding in &config.input_files {
        let entry = entries
            .iter()
            .find(|e| e.name == binding.name && e.file_path == binding.value);
        let Some(entry) = entry else {
            bail!(
                "no metadata entry for input '{}' ({})",
                binding.name,
                binding.value.display()
            );
        };
        input_files
            .entry(binding.name.clone())
            .or_default()
            .push(binding.value.clone());
        input_metadata
            .entry(binding.name.clone())
            .or_default()
            .push(Metadata::new(&entry.data_type, &entry.file_type));
    }

    let mut output_files = FileGroup::new();
    for binding in &config.output_files {
        output_files
            .entry(binding.name.clone())
            .or_default()
            .push(binding.file_path.clone());
    }

    Ok((input_files, input_metadata, output_files))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

/// Launches the workflow from JSON configuration documents
#[derive(Debug, Default)]
pub struct JsonLauncher;

impl JsonLauncher {
    /// Run the pipeline described by `config_path` and `metadata_path`,
    /// writing the results document to `results_path`
    pub fn launch(
        &self,
        config_path: &Path,
        metadata_path: &Path,
        results_path: &Path,
    ) -> Result<()> {
        tracing::info!(
            config = %config_path.display(),
            metadata = %metadata_path.display(),
            "launching workflow from JSON configuration"
        );
        let (input_files, input_metadata, output_files) =
            load_documents(config_path, metadata_path)?;

        let workflow = SummerWorkflow::new();
        let (out_files, out_mds) = workflow
            .run(&input_files, &input_metadata, &output_files)
            .context("pipeline run failed")?;

        let results = build_results(&out_files, &out_mds);
        let rendered = serde_json::to_string_pretty(&results)?;
        std::fs::write(results_path, rendered)
            .with_context(|| format!("writing {}", results_path.display()))?;

        tracing::info!(path = %results_path.display(), "results written");
        Ok(())
    }
}

fn build_results(out_files: &FileGroup, out_mds: &MetadataGroup) -> ResultsDocument {
    let mut entries = Vec::new();
    for (name, paths) in out_files {
        let mds = out_mds.get(name);
        for (i, path) in paths.iter().enumerate() {
            let md = mds
                .and_then(|entries| entries.get(i))
                .cloned()
                .unwrap_or_else(|| Metadata::new("Number", "plainText"));
            entries.push(ResultEntry {
                name: name.clone(),
                file_path: path.clone(),
                data_type: md.data_type,
                file_type: md.file_type,
                sources: md.sources,
            });
        }
    }
    ResultsDocument {
        generated_at: chrono::Utc::now(),
        output_files: entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_documents(dir: &TempDir, inputs: &[(&str, &str)]) -> (PathBuf, PathBuf) {
        let mut bindings = Vec::new();
        let mut entries = Vec::new();
        for (name, value) in inputs {
            let path = dir.path().join(name);
            std::fs::write(&path, value).unwrap();
            bindings.push(InputBinding {
                name: "number".into(),
                value: path.clone(),
            });
            entries.push(MetadataEntry {
                name: "number".into(),
                file_path: path,
                data_type: "Number".into(),
                file_type: "plainText".into(),
            });
        }

        let config = PipelineConfig {
            input_files: bindings,
            output_files: vec![OutputBinding {
                name: "output".into(),
                file_path: dir.path().join("outputFile{}"),
            }],
            arguments: serde_json::Map::new(),
        };

        let config_path = dir.path().join("config.json");
        let metadata_path = dir.path().join("input_metadata.json");
        std::fs::write(&config_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        std::fs::write(
            &metadata_path,
            serde_json::to_string_pretty(&entries).unwrap(),
        )
        .unwrap();
        (config_path, metadata_path)
    }

    #[test]
    fn test_load_documents_builds_groups() {
        let dir = TempDir::new().unwrap();
        let (config_path, metadata_path) =
            write_documents(&dir, &[("file1", "5"), ("file2", "9")]);

        let (input_files, input_metadata, output_files) =
            load_documents(&config_path, &metadata_path).unwrap();

        assert_eq!(input_files["number"].len(), 2);
        assert_eq!(input_metadata["number"].len(), 2);
        assert_eq!(input_metadata["number"][0].data_type, "Number");
        assert_eq!(output_files["output"].len(), 1);
    }

    #[test]
    fn test_missing_metadata_entry_is_an_error() {
        let dir = TempDir::new().unwrap();
        let (config_path, metadata_path) = write_documents(&dir, &[("file1", "5")]);

        // Truncate the metadata document so the input has no entry
        std::fs::write(&metadata_path, "[]").unwrap();

        let result = load_documents(&config_path, &metadata_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("no metadata entry"));
    }

    #[test]
    fn test_launch_writes_results_document() {
        let dir = TempDir::new().unwrap();
        let (config_path, metadata_path) =
            write_documents(&dir, &[("file1", "5"), ("file2", "9"), ("file3", "13")]);
        let results_path = dir.path().join("results.json");

        JsonLauncher
            .launch(&config_path, &metadata_path, &results_path)
            .unwrap();

        let results: ResultsDocument =
            serde_json::from_str(&std::fs::read_to_string(&results_path).unwrap()).unwrap();
        assert_eq!(results.output_files.len(), 2);

        let contents: Vec<String> = results
            .output_files
            .iter()
            .map(|e| std::fs::read_to_string(&e.file_path).unwrap())
            .collect();
        assert_eq!(contents, vec!["16", "30"]);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");
        let metadata_path = dir.path().join("input_metadata.json");
        std::fs::write(&config_path, "{ not json").unwrap();
        std::fs::write(&metadata_path, "[]").unwrap();

        assert!(load_documents(&config_path, &metadata_path).is_err());
    }
}
