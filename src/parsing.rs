use crate::error::ParseError;
use crate::types::{DirectoryEntry, ModuleRecord};
use crate::version::ModuleVersion;

/// Parse a module folder name in the format "{name},{key}={version}" into its components.
///
/// This follows the layout folder convention, e.g.
/// `Microsoft.VisualStudio.Component.Git,Version=15.0.26208.0`.
///
/// The module name may itself contain commas, so the split is not simply at
/// the first comma:
/// - the first comma-separated field is always the start of the name
/// - the second field is the version field, unless it has no `=` and a later
///   field does, in which case that later field is the version field
/// - every other field is appended back onto the name with its comma
///
/// For example `Foo,Version=1.0,Bar` and `Foo,Bar,Version=1.0` both parse to
/// (`Foo,Bar`, `1.0`).
pub fn parse_module_dir_name(dir_name: &str) -> Result<(String, ModuleVersion), ParseError> {
    if !dir_name.contains(',') {
        return Err(ParseError::NotAModule {
            name: dir_name.to_string(),
        });
    }

    let fields: Vec<&str> = dir_name.split(',').collect();
    let version_idx = if fields[1].contains('=') {
        1
    } else {
        fields
            .iter()
            .skip(2)
            .position(|field| field.contains('='))
            .map(|pos| pos + 2)
            .ok_or_else(|| ParseError::MissingVersionKey {
                name: dir_name.to_string(),
            })?
    };

    if fields[0].is_empty() {
        return Err(ParseError::EmptyName {
            name: dir_name.to_string(),
        });
    }

    let mut name = fields[0].to_string();
    for (idx, field) in fields.iter().enumerate().skip(1) {
        if idx != version_idx {
            name.push(',');
            name.push_str(field);
        }
    }

    // Everything after the first `=`; the key itself is not checked.
    let raw_version = fields[version_idx]
        .split_once('=')
        .map(|(_, value)| value)
        .unwrap_or_default();
    let version =
        ModuleVersion::parse(raw_version).map_err(|source| ParseError::InvalidVersion {
            name: dir_name.to_string(),
            source,
        })?;

    Ok((name, version))
}

/// A folder that looked like a module but could not be parsed.
#[derive(Debug, Clone)]
pub struct Rejected {
    pub entry: DirectoryEntry,
    pub error: ParseError,
}

/// Result of classifying one directory listing.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Module records, in listing order.
    pub records: Vec<ModuleRecord>,
    /// Folders without a comma in their name.
    pub skipped: Vec<DirectoryEntry>,
    pub rejected: Vec<Rejected>,
}

/// Turn a directory listing into module records.
///
/// Folders without a comma are not modules and are skipped. Folders that
/// fail to parse are logged and set aside; they never stop the scan.
pub fn classify<I>(entries: I) -> Classification
where
    I: IntoIterator<Item = DirectoryEntry>,
{
    let mut classification = Classification::default();

    for entry in entries {
        match parse_module_dir_name(&entry.name) {
            Ok((name, version)) => {
                tracing::debug!("Classified {} as {} {}", entry.name, name, version);
                classification.records.push(ModuleRecord {
                    name,
                    version,
                    path: entry.path,
                });
            }
            Err(ParseError::NotAModule { .. }) => {
                tracing::debug!("Skipping non-module folder {}", entry.name);
                classification.skipped.push(entry);
            }
            Err(error) => {
                tracing::warn!("Ignoring folder {}: {}", entry.name, error);
                classification.rejected.push(Rejected { entry, error });
            }
        }
    }

    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VersionError;
    use std::path::PathBuf;

    fn version(raw: &str) -> ModuleVersion {
        ModuleVersion::parse(raw).unwrap()
    }

    fn entry(name: &str) -> DirectoryEntry {
        DirectoryEntry::new(name, PathBuf::from("/layout").join(name))
    }

    #[test]
    fn test_parse_module_dir_name_simple() {
        assert_eq!(
            parse_module_dir_name("Pkg.A,Version=1.2.0"),
            Ok(("Pkg.A".to_string(), version("1.2.0")))
        );
    }

    #[test]
    fn test_parse_module_dir_name_lowercase_key() {
        assert_eq!(
            parse_module_dir_name("Microsoft.VisualCpp.Tools.Core,version=15.7.27617.1"),
            Ok((
                "Microsoft.VisualCpp.Tools.Core".to_string(),
                version("15.7.27617.1")
            ))
        );
    }

    #[test]
    fn test_parse_module_dir_name_trailing_name_fragment() {
        assert_eq!(
            parse_module_dir_name("Foo,Version=1.0,Bar"),
            Ok(("Foo,Bar".to_string(), version("1.0")))
        );
        assert_eq!(
            parse_module_dir_name("Win10SDK,Version=10.0.17134.12,chip=x64,productarch=neutral"),
            Ok((
                "Win10SDK,chip=x64,productarch=neutral".to_string(),
                version("10.0.17134.12")
            ))
        );
    }

    #[test]
    fn test_parse_module_dir_name_comma_before_version() {
        assert_eq!(
            parse_module_dir_name("Foo,Bar,Version=1.0"),
            Ok(("Foo,Bar".to_string(), version("1.0")))
        );
    }

    #[test]
    fn test_parse_module_dir_name_invalid_no_comma() {
        assert!(matches!(
            parse_module_dir_name("certificates"),
            Err(ParseError::NotAModule { .. })
        ));
        assert!(matches!(
            parse_module_dir_name("Pkg.A Version=1.0"),
            Err(ParseError::NotAModule { .. })
        ));
    }

    #[test]
    fn test_parse_module_dir_name_invalid_version() {
        let result = parse_module_dir_name("Foo,Version=notaversion");
        assert!(matches!(
            result,
            Err(ParseError::InvalidVersion {
                source: VersionError::ComponentCount { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_parse_module_dir_name_invalid_no_equals() {
        assert!(matches!(
            parse_module_dir_name("Foo,1.0"),
            Err(ParseError::MissingVersionKey { .. })
        ));
        assert!(matches!(
            parse_module_dir_name("Foo,"),
            Err(ParseError::MissingVersionKey { .. })
        ));
    }

    #[test]
    fn test_parse_module_dir_name_invalid_no_name() {
        assert!(matches!(
            parse_module_dir_name(",Version=1.0"),
            Err(ParseError::EmptyName { .. })
        ));
    }

    #[test]
    fn test_parse_module_dir_name_value_after_first_equals() {
        assert!(matches!(
            parse_module_dir_name("Foo,Version=1.0=2"),
            Err(ParseError::InvalidVersion { .. })
        ));
        assert!(matches!(
            parse_module_dir_name("Foo,Version="),
            Err(ParseError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn test_classify_filters_and_keeps_order() {
        let classification = classify(vec![
            entry("Pkg.B,Version=2.0.0"),
            entry("certificates"),
            entry("Pkg.A,Version=1.2.0"),
            entry("Foo,Version=notaversion"),
            entry("Pkg.A,Version=1.5.0"),
        ]);

        let names: Vec<_> = classification
            .records
            .iter()
            .map(|r| format!("{}@{}", r.name, r.version))
            .collect();
        assert_eq!(names, vec!["Pkg.B@2.0.0", "Pkg.A@1.2.0", "Pkg.A@1.5.0"]);

        assert_eq!(classification.skipped, vec![entry("certificates")]);
        assert_eq!(classification.rejected.len(), 1);
        assert_eq!(
            classification.rejected[0].entry.name,
            "Foo,Version=notaversion"
        );
    }

    #[test]
    fn test_classify_keeps_path() {
        let classification = classify(vec![entry("Pkg.A,Version=1.2.0")]);
        assert_eq!(
            classification.records[0].path,
            PathBuf::from("/layout/Pkg.A,Version=1.2.0")
        );
    }

    #[test]
    fn test_classify_empty_listing() {
        let classification = classify(Vec::new());
        assert!(classification.records.is_empty());
        assert!(classification.skipped.is_empty());
        assert!(classification.rejected.is_empty());
    }
}
