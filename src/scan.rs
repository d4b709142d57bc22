use std::fs;
use std::io;
use std::path::Path;

use crate::error::ScanError;
use crate::types::DirectoryEntry;

/// List the immediate subdirectories of a layout folder.
///
/// Files and symlinks are left out, so a symlinked folder is never a removal
/// candidate. Entries are returned in the order the OS lists them. Names that
/// are not valid UTF-8 cannot follow the module naming convention and are
/// skipped.
pub fn list_immediate_subdirectories(path: &Path) -> Result<Vec<DirectoryEntry>, ScanError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ScanError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ScanError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    let io_err = |source: io::Error| ScanError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(path).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if !entry.file_type().map_err(io_err)?.is_dir() {
            continue;
        }

        let file_name = entry.file_name();
        match file_name.to_str() {
            Some(name) => entries.push(DirectoryEntry::new(name, entry.path())),
            None => tracing::warn!(
                "Skipping folder with non UTF-8 name: {}",
                entry.path().display()
            ),
        }
    }

    tracing::debug!(
        "Found {} subdirectories in {}",
        entries.len(),
        path.display()
    );
    Ok(entries)
}
