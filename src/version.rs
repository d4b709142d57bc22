use crate::error::VersionError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Dotted numeric module version with 2 to 4 components, e.g. `15.7.27617.1`.
///
/// Versions order component by component. When one version is a prefix of
/// the other the shorter one sorts first, so `1.0 < 1.0.0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleVersion(Vec<u32>);

const MIN_COMPONENTS: usize = 2;
const MAX_COMPONENTS: usize = 4;

impl ModuleVersion {
    /// Parse a version such as `1.2` or `16.0.28315.86`.
    ///
    /// Every component must be a plain decimal number no larger than
    /// `i32::MAX`. Signs, whitespace and empty components are rejected.
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        let parts: Vec<&str> = raw.split('.').collect();
        if !(MIN_COMPONENTS..=MAX_COMPONENTS).contains(&parts.len()) {
            return Err(VersionError::ComponentCount {
                raw: raw.to_string(),
                count: parts.len(),
            });
        }

        let mut components = Vec::with_capacity(parts.len());
        for part in parts {
            components.push(parse_component(raw, part)?);
        }
        Ok(ModuleVersion(components))
    }

    pub fn components(&self) -> &[u32] {
        &self.0
    }
}

fn parse_component(raw: &str, part: &str) -> Result<u32, VersionError> {
    let invalid = || VersionError::InvalidComponent {
        raw: raw.to_string(),
        component: part.to_string(),
    };

    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    // Same range as a signed 32-bit component.
    part.parse::<u32>()
        .ok()
        .filter(|value| *value <= i32::MAX as u32)
        .ok_or_else(invalid)
}

impl FromStr for ModuleVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleVersion::parse(s)
    }
}

impl fmt::Display for ModuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", component)?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for ModuleVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
