//! Error types for scanning, classifying and removing module folders.
//!
//! Only [`ScanError`] is fatal to a run. [`ParseError`] and [`DeletionError`]
//! are collected per entry and reported alongside the successful ones.

use serde::Serialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A version string that is not a dotted numeric version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// Fewer than two or more than four components.
    #[error("version `{raw}` has {count} components, expected 2 to 4")]
    ComponentCount { raw: String, count: usize },

    /// A component is empty, not a number, or out of range.
    #[error("version `{raw}` has an invalid component `{component}`")]
    InvalidComponent { raw: String, component: String },
}

/// A directory name that does not follow `<Name>,Version=<version>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The name has no comma at all. Such folders are simply not modules.
    #[error("`{name}` is not a module folder")]
    NotAModule { name: String },

    /// Nothing left of the module name once the version field is removed.
    #[error("`{name}` has an empty module name")]
    EmptyName { name: String },

    /// No comma-separated field carries a `key=value` version.
    #[error("`{name}` has no `Version=` field")]
    MissingVersionKey { name: String },

    /// The version field is present but unparsable.
    #[error("`{name}` has an unparsable version")]
    InvalidVersion {
        name: String,
        #[source]
        source: VersionError,
    },
}

/// Coarse classification of a failed deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionErrorKind {
    PermissionDenied,
    NotFound,
    Other,
}

/// Failure to recursively remove one superseded module folder.
#[derive(Debug, Error)]
#[error("failed to remove `{}`: {source}", .path.display())]
pub struct DeletionError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl DeletionError {
    pub fn kind(&self) -> DeletionErrorKind {
        match self.source.kind() {
            io::ErrorKind::PermissionDenied => DeletionErrorKind::PermissionDenied,
            io::ErrorKind::NotFound => DeletionErrorKind::NotFound,
            _ => DeletionErrorKind::Other,
        }
    }
}

/// The selected layout directory could not be listed.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("`{}` does not exist", .path.display())]
    NotFound { path: PathBuf },

    #[error("`{}` is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to read `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
