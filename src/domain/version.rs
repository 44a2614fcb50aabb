use crate::error::{FlexVersionError, Result};
use std::fmt;

/// Numeric release components of a semantic version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a baseline version (e.g., "v1.2.3" -> Version(1,2,3))
    ///
    /// A leading `v`/`V` is ignored. Pre-release and build metadata are
    /// accepted but dropped, only the release numbers carry over.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let clean = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        Self::parse_exact(clean)
    }

    /// Parse `X.Y.Z[-pre][+build]` with no prefix tolerance
    pub fn parse_exact(text: &str) -> Result<Self> {
        let parsed = semver::Version::parse(text).map_err(|e| {
            FlexVersionError::baseline(format!("'{}' is not X.Y.Z: {}", text, e))
        })?;

        Ok(Version {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
        })
    }

    /// Bump version according to bump type.
    ///
    /// Fails with `InvalidBaselineVersion` when the bumped component is
    /// already at `u64::MAX`.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let overflow = || {
            FlexVersionError::baseline(format!(
                "'{}' cannot take a {:?} bump without overflowing",
                self, bump_type
            ))
        };

        let bumped = match bump_type {
            VersionBump::Major => Version {
                major: self.major.checked_add(1).ok_or_else(overflow)?,
                minor: 0,
                patch: 0,
            },
            VersionBump::Minor => Version {
                major: self.major,
                minor: self.minor.checked_add(1).ok_or_else(overflow)?,
                patch: 0,
            },
            VersionBump::Patch => Version {
                major: self.major,
                minor: self.minor,
                patch: self.patch.checked_add(1).ok_or_else(overflow)?,
            },
        };
        Ok(bumped)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Which numeric component a bump increments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}
