use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ScanError;
use crate::parsing::{Classification, classify};
use crate::removal::{RemovalReport, remove};
use crate::resolver::Resolution;
use crate::scan::list_immediate_subdirectories;
use crate::types::ModuleRecord;

/// Records, duplicates and superseded folders of one selected layout folder.
///
/// Every scan builds a new working set; nothing carries over from a
/// previously selected folder.
#[derive(Debug, Clone, Serialize)]
pub struct WorkingSet {
    pub root: PathBuf,
    pub records: Vec<ModuleRecord>,
    #[serde(flatten)]
    pub resolution: Resolution,
    /// Folders that looked like modules but failed to parse.
    pub rejected: Vec<String>,
}

impl WorkingSet {
    /// List, classify and resolve the immediate subdirectories of `root`.
    pub fn scan(root: &Path) -> Result<Self, ScanError> {
        let entries = list_immediate_subdirectories(root)?;
        Ok(Self::from_classification(root, classify(entries)))
    }

    pub fn from_classification(root: &Path, classification: Classification) -> Self {
        let resolution = Resolution::resolve(&classification.records);
        if resolution.superseded.is_empty() {
            tracing::info!("No old version folders found in {}", root.display());
        }
        WorkingSet {
            root: root.to_path_buf(),
            records: classification.records,
            resolution,
            rejected: classification
                .rejected
                .into_iter()
                .map(|rejected| rejected.entry.name)
                .collect(),
        }
    }

    pub fn duplicates(&self) -> &[ModuleRecord] {
        &self.resolution.duplicates
    }

    pub fn superseded(&self) -> &[ModuleRecord] {
        &self.resolution.superseded
    }

    pub fn can_delete(&self) -> bool {
        can_delete(Some(self.root.as_path()), self.superseded())
    }

    /// Delete every superseded folder.
    ///
    /// Folders that were removed leave the superseded set, so after a fully
    /// successful run it is empty and only failures remain otherwise.
    pub fn remove_superseded(&mut self) -> RemovalReport {
        let report = remove(&self.resolution.superseded);
        self.resolution.superseded = report
            .failed()
            .map(|entry| entry.record.clone())
            .collect();
        report
    }
}

/// Whether a delete action makes sense: a folder is selected and it holds at
/// least one superseded module.
pub fn can_delete(selected: Option<&Path>, superseded: &[ModuleRecord]) -> bool {
    let has_selection =
        selected.is_some_and(|path| !path.to_string_lossy().trim().is_empty());
    has_selection && !superseded.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::ModuleVersion;
    use std::fs;
    use tempfile::TempDir;

    fn record(name: &str, version: &str) -> ModuleRecord {
        ModuleRecord {
            name: name.to_string(),
            version: ModuleVersion::parse(version).unwrap(),
            path: PathBuf::from(format!("/layout/{},Version={}", name, version)),
        }
    }

    #[test]
    fn test_can_delete_needs_selection() {
        let superseded = vec![record("Foo", "1.0")];
        assert!(can_delete(Some(Path::new("/layout")), &superseded));
        assert!(!can_delete(None, &superseded));
        assert!(!can_delete(Some(Path::new("")), &superseded));
        assert!(!can_delete(Some(Path::new("   ")), &superseded));
    }

    #[test]
    fn test_can_delete_needs_superseded() {
        assert!(!can_delete(Some(Path::new("/layout")), &[]));
    }

    #[test]
    fn test_scan_starts_fresh_each_time() {
        let first = TempDir::new().unwrap();
        fs::create_dir(first.path().join("Foo,Version=1.0")).unwrap();
        fs::create_dir(first.path().join("Foo,Version=2.0")).unwrap();

        let second = TempDir::new().unwrap();
        fs::create_dir(second.path().join("Foo,Version=3.0")).unwrap();

        let set = WorkingSet::scan(first.path()).unwrap();
        assert_eq!(set.superseded().len(), 1);

        let set = WorkingSet::scan(second.path()).unwrap();
        assert_eq!(set.records.len(), 1);
        assert!(set.duplicates().is_empty());
        assert!(set.superseded().is_empty());
        assert!(!set.can_delete());
    }

    #[test]
    fn test_remove_superseded_clears_set() {
        let td = TempDir::new().unwrap();
        fs::create_dir(td.path().join("Foo,Version=1.0")).unwrap();
        fs::create_dir(td.path().join("Foo,Version=2.0")).unwrap();

        let mut set = WorkingSet::scan(td.path()).unwrap();
        assert!(set.can_delete());

        let report = set.remove_superseded();
        assert_eq!(report.removed().count(), 1);
        assert!(set.superseded().is_empty());
        assert!(!set.can_delete());
        assert!(!td.path().join("Foo,Version=1.0").exists());
        assert!(td.path().join("Foo,Version=2.0").exists());
    }

    #[test]
    fn test_remove_superseded_keeps_failures() {
        let td = TempDir::new().unwrap();
        fs::create_dir(td.path().join("Foo,Version=1.0")).unwrap();
        fs::create_dir(td.path().join("Foo,Version=2.0")).unwrap();

        let mut set = WorkingSet::scan(td.path()).unwrap();
        fs::remove_dir(td.path().join("Foo,Version=1.0")).unwrap();

        let report = set.remove_superseded();
        assert_eq!(report.failed().count(), 1);
        assert_eq!(set.superseded().len(), 1);
        assert!(set.can_delete());
    }

    #[test]
    fn test_rejected_names_are_reported() {
        let td = TempDir::new().unwrap();
        fs::create_dir(td.path().join("Foo,Version=notaversion")).unwrap();
        fs::create_dir(td.path().join("certificates")).unwrap();

        let set = WorkingSet::scan(td.path()).unwrap();
        assert!(set.records.is_empty());
        assert_eq!(set.rejected, vec!["Foo,Version=notaversion"]);
    }
}
