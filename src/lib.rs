pub mod error;
pub mod parsing;
pub mod removal;
pub mod resolver;
pub mod scan;
pub mod session;
pub mod types;
pub mod version;

pub use error::{DeletionError, DeletionErrorKind, ParseError, ScanError, VersionError};
pub use parsing::{Classification, Rejected, classify, parse_module_dir_name};
pub use removal::{RemovalEntry, RemovalOutcome, RemovalReport, remove};
pub use resolver::{Resolution, find_duplicates, find_superseded};
pub use scan::list_immediate_subdirectories;
pub use session::{WorkingSet, can_delete};
pub use types::{DirectoryEntry, ModuleRecord};
pub use version::ModuleVersion;
