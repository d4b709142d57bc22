//! Duplicate and superseded module detection.
//!
//! Records are identified by their position in the slice, never by value:
//! two folders that parse to the same name and version are still two
//! distinct duplicates.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::ModuleRecord;
use crate::version::ModuleVersion;

/// All records whose name is shared with at least one other record.
///
/// Input order is preserved.
pub fn find_duplicates(records: &[ModuleRecord]) -> Vec<ModuleRecord> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.name.as_str()).or_default() += 1;
    }

    records
        .iter()
        .filter(|record| counts.get(record.name.as_str()).is_some_and(|n| *n > 1))
        .cloned()
        .collect()
}

/// Records outranked by a strictly newer record of the same module.
///
/// Comparing every record against the newest version of its name is the same
/// as comparing it pairwise against all of its peers: with `1.0 < 2.0 < 3.0`
/// both `1.0` and `2.0` are superseded and only `3.0` survives. Records tied
/// with the newest version are never superseded.
pub fn find_superseded(duplicates: &[ModuleRecord]) -> Vec<ModuleRecord> {
    let newest = newest_by_name(duplicates);

    duplicates
        .iter()
        .filter(|record| {
            newest
                .get(record.name.as_str())
                .is_some_and(|latest| *latest > &record.version)
        })
        .cloned()
        .collect()
}

fn newest_by_name(records: &[ModuleRecord]) -> HashMap<&str, &ModuleVersion> {
    let mut newest: HashMap<&str, &ModuleVersion> = HashMap::new();
    for record in records {
        newest
            .entry(record.name.as_str())
            .and_modify(|latest| {
                if record.version > **latest {
                    *latest = &record.version;
                }
            })
            .or_insert(&record.version);
    }
    newest
}

/// Duplicate and superseded sets for one list of classified records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub duplicates: Vec<ModuleRecord>,
    pub superseded: Vec<ModuleRecord>,
}

impl Resolution {
    pub fn resolve(records: &[ModuleRecord]) -> Self {
        let duplicates = find_duplicates(records);
        let superseded = find_superseded(&duplicates);
        tracing::debug!(
            "{} duplicate module folders, {} superseded",
            duplicates.len(),
            superseded.len()
        );
        Resolution {
            duplicates,
            superseded,
        }
    }

    /// Newest version among the duplicates named `name`.
    pub fn newest_version(&self, name: &str) -> Option<&ModuleVersion> {
        self.duplicates
            .iter()
            .filter(|record| record.name == name)
            .map(|record| &record.version)
            .max()
    }
}
