//! Next-release computation from a bump keyword or explicit version

use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::VersionError;

/// Which part of the version to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    /// Major version bump
    Major,
    /// Minor version bump
    Minor,
    /// Micro (patch) version bump
    Micro,
}

impl BumpType {
    /// Returns the string representation of the bump type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Micro => "micro",
        }
    }
}

impl std::fmt::Display for BumpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BumpType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "micro" | "patch" => Ok(Self::Micro),
            _ => Err(format!("Unknown bump type: {}", s)),
        }
    }
}

/// The release requested on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseRequest {
    /// Increment the current release
    Bump(BumpType),
    /// Release exactly this version
    Explicit(Version),
}

impl std::str::FromStr for ReleaseRequest {
    type Err = VersionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Ok(bump) = s.parse::<BumpType>() {
            return Ok(Self::Bump(bump));
        }

        let trimmed = s.strip_prefix('v').unwrap_or(s);
        Version::parse(trimmed)
            .map(Self::Explicit)
            .map_err(|_| VersionError::InvalidVersion(s.to_string()))
    }
}

impl ReleaseRequest {
    /// Compute the next release from the current one (`None` when nothing has been tagged yet)
    pub fn next_version(&self, current: Option<&Version>) -> Version {
        let base = current.cloned().unwrap_or_else(|| Version::new(0, 0, 0));

        let next = match self {
            Self::Bump(BumpType::Major) => Version::new(base.major + 1, 0, 0),
            Self::Bump(BumpType::Minor) => Version::new(base.major, base.minor + 1, 0),
            Self::Bump(BumpType::Micro) => Version::new(base.major, base.minor, base.patch + 1),
            Self::Explicit(version) => version.clone(),
        };

        debug!(current = %base, next = %next, "computed next release");
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn next(current: &str, request: &str) -> String {
        let current = Version::parse(current).unwrap();
        let request: ReleaseRequest = request.parse().unwrap();
        request.next_version(Some(&current)).to_string()
    }

    #[test]
    fn test_bump_keywords() {
        assert_eq!(next("1.1.0", "micro"), "1.1.1");
        assert_eq!(next("1.1.0", "minor"), "1.2.0");
        assert_eq!(next("1.1.0", "major"), "2.0.0");
        assert_eq!(next("1.1.0", "patch"), "1.1.1");
    }

    #[test]
    fn test_explicit_version() {
        assert_eq!(next("1.1.0", "9.8.9"), "9.8.9");
        assert_eq!(next("1.1.0", "v3.0.0"), "3.0.0");
    }

    #[test]
    fn test_double_digit_micro() {
        assert_eq!(next("1.0.10", "micro"), "1.0.11");
    }

    #[test]
    fn test_no_current_release() {
        let request: ReleaseRequest = "minor".parse().unwrap();
        assert_eq!(request.next_version(None).to_string(), "0.1.0");
    }

    #[test]
    fn test_invalid_release() {
        let result = "sideways".parse::<ReleaseRequest>();
        assert!(matches!(result, Err(VersionError::InvalidVersion(_))));
    }
}
