use std::fs;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::DeletionError;
use crate::types::ModuleRecord;

/// What a removal run amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalOutcome {
    /// There were no superseded folders; nothing was touched.
    NothingToRemove,
    /// Every superseded folder was deleted.
    Completed,
    /// At least one folder could not be deleted.
    PartiallyFailed,
}

/// Per-folder result of a removal run.
#[derive(Debug)]
pub struct RemovalEntry {
    pub record: ModuleRecord,
    pub error: Option<DeletionError>,
}

impl RemovalEntry {
    pub fn is_removed(&self) -> bool {
        self.error.is_none()
    }
}

impl Serialize for RemovalEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RemovalEntry", 5)?;
        state.serialize_field("name", &self.record.name)?;
        state.serialize_field("version", &self.record.version)?;
        state.serialize_field("path", &self.record.path)?;
        state.serialize_field("removed", &self.is_removed())?;
        state.serialize_field(
            "error",
            &self.error.as_ref().map(|e| (e.kind(), e.source.to_string())),
        )?;
        state.end()
    }
}

#[derive(Debug, Default, serde::Serialize)]
pub struct RemovalReport {
    pub entries: Vec<RemovalEntry>,
}

impl RemovalReport {
    pub fn outcome(&self) -> RemovalOutcome {
        if self.entries.is_empty() {
            RemovalOutcome::NothingToRemove
        } else if self.entries.iter().all(RemovalEntry::is_removed) {
            RemovalOutcome::Completed
        } else {
            RemovalOutcome::PartiallyFailed
        }
    }

    pub fn removed(&self) -> impl Iterator<Item = &ModuleRecord> {
        self.entries
            .iter()
            .filter(|entry| entry.is_removed())
            .map(|entry| &entry.record)
    }

    pub fn failed(&self) -> impl Iterator<Item = &RemovalEntry> {
        self.entries.iter().filter(|entry| !entry.is_removed())
    }
}

/// Recursively delete the folder of every superseded module.
///
/// Folders are removed one after another. A failure is recorded for that
/// folder and the remaining ones are still attempted. An empty slice touches
/// nothing on disk.
pub fn remove(superseded: &[ModuleRecord]) -> RemovalReport {
    let mut report = RemovalReport::default();

    for record in superseded {
        let error = match fs::remove_dir_all(&record.path) {
            Ok(()) => {
                tracing::info!(
                    "Removed old module folder: {} (version {})",
                    record.path.display(),
                    record.version
                );
                None
            }
            Err(source) => {
                let error = DeletionError {
                    path: record.path.clone(),
                    source,
                };
                tracing::warn!("{}", error);
                Some(error)
            }
        };
        report.entries.push(RemovalEntry {
            record: record.clone(),
            error,
        });
    }

    report
}
