use std::path::PathBuf;

use serde::Serialize;

use crate::version::ModuleVersion;

/// One immediate subdirectory of the selected layout folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Leaf directory name, e.g. `Microsoft.VisualCpp.Tools,version=14.2.1`.
    pub name: String,
    pub path: PathBuf,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        DirectoryEntry {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// A classified module folder.
///
/// `path` is only used to delete the folder; two records are the same
/// logical module iff their `name`s are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRecord {
    pub name: String,
    pub version: ModuleVersion,
    pub path: PathBuf,
}
