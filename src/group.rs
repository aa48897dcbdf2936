//! Named file and metadata groups
//!
//! A group maps a logical name (e.g. `"number"`, `"output"`) to an ordered
//! sequence of values. Input files and input metadata travel in parallel
//! groups: one metadata entry per file, under the same logical name.

use crate::metadata::Metadata;
use std::collections::HashMap;
use std::path::PathBuf;

/// Logical name -> ordered file paths
pub type FileGroup = HashMap<String, Vec<PathBuf>>;

/// Logical name -> metadata, one entry per file
pub type MetadataGroup = HashMap<String, Vec<Metadata>>;

/// Build a file group with a single logical name
pub fn file_group(name: &str, paths: Vec<PathBuf>) -> FileGroup {
    let mut group = FileGroup::new();
    group.insert(name.to_string(), paths);
    group
}

/// Build a metadata group with a single logical name
pub fn metadata_group(name: &str, entries: Vec<Metadata>) -> MetadataGroup {
    let mut group = MetadataGroup::new();
    group.insert(name.to_string(), entries);
    group
}

/// Get the sole entry of a group, or `None` if the group does not contain
/// exactly one logical name
pub fn sole_entry<T>(group: &HashMap<String, Vec<T>>) -> Option<(&str, &[T])> {
    if group.len() != 1 {
        return None;
    }
    group.iter().next().map(|(k, v)| (k.as_str(), v.as_slice()))
}
