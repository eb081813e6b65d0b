//! Release versions and upgrade targets.

use std::fmt;
use std::str::FromStr;

use super::UpgradeError;

/// A `major.minor.patch` release number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = UpgradeError;

    /// Accepts `X.Y.Z` with an optional `^`, `~` or `v` prefix. Pre-release
    /// and build suffixes are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || UpgradeError::InvalidVersion(s.to_string());

        let core = s
            .trim()
            .trim_start_matches(['^', '~', '=', 'v'])
            .split(['-', '+'])
            .next()
            .unwrap_or_default();

        let mut parts = core.split('.');
        let mut next = || -> Result<u64, UpgradeError> {
            parts
                .next()
                .ok_or_else(invalid)?
                .parse()
                .map_err(|_| invalid())
        };
        let version = Self::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

/// Which release to move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeTarget {
    /// Next major release.
    Major,
    /// Next minor release of the current major.
    Minor,
    /// Next patch release of the current minor.
    Patch,
    /// A specific release.
    Exact(Version),
}

impl UpgradeTarget {
    /// The version to move to from `current`.
    ///
    /// Fails when the bumped component would not fit in a `u64`.
    pub fn resolve(self, current: Version) -> Result<Version, UpgradeError> {
        let overflow = || UpgradeError::NoNextRelease {
            current,
            target: self,
        };
        match self {
            Self::Major => {
                let major = current.major.checked_add(1).ok_or_else(overflow)?;
                Ok(Version::new(major, 0, 0))
            }
            Self::Minor => {
                let minor = current.minor.checked_add(1).ok_or_else(overflow)?;
                Ok(Version::new(current.major, minor, 0))
            }
            Self::Patch => {
                let patch = current.patch.checked_add(1).ok_or_else(overflow)?;
                Ok(Version::new(current.major, current.minor, patch))
            }
            Self::Exact(version) => Ok(version),
        }
    }
}

impl FromStr for UpgradeTarget {
    type Err = UpgradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            _ => s.parse().map(Self::Exact),
        }
    }
}

impl fmt::Display for UpgradeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major => f.write_str("major"),
            Self::Minor => f.write_str("minor"),
            Self::Patch => f.write_str("patch"),
            Self::Exact(version) => version.fmt(f),
        }
    }
}
