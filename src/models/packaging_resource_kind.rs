//! Packaging resource kind definitions
//!
//! Centralized enum for the packaging kinds this crate knows how to evaluate.
//! Keeps kind names, plurals and command aliases in one place.

use super::packaging::PACKAGING_API_VERSION;
use std::fmt;
use std::str::FromStr;

/// Enumeration of all supported packaging resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackagingResourceKind {
    PackageInstall,
    PackageRepository,
}

impl PackagingResourceKind {
    /// Get the kind name as it appears in manifests
    pub fn as_str(&self) -> &'static str {
        match self {
            PackagingResourceKind::PackageInstall => "PackageInstall",
            PackagingResourceKind::PackageRepository => "PackageRepository",
        }
    }

    pub fn api_version(&self) -> &'static str {
        PACKAGING_API_VERSION
    }

    /// Plural resource name used in API paths
    pub fn plural(&self) -> &'static str {
        match self {
            PackagingResourceKind::PackageInstall => "packageinstalls",
            PackagingResourceKind::PackageRepository => "packagerepositories",
        }
    }

    /// Command aliases accepted on the command line
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            PackagingResourceKind::PackageInstall => {
                &["packageinstall", "packageinstalls", "pkgi"]
            }
            PackagingResourceKind::PackageRepository => {
                &["packagerepository", "packagerepositories", "pkgr"]
            }
        }
    }

    /// Try to parse a string into a PackagingResourceKind, returning None if invalid
    pub fn parse_optional(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Get all packaging resource kinds
    pub fn all() -> &'static [Self] {
        &[
            PackagingResourceKind::PackageInstall,
            PackagingResourceKind::PackageRepository,
        ]
    }

    /// Resolve a kind name or alias (case-insensitive)
    pub fn from_str_case_insensitive(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.aliases().contains(&lower.as_str()))
    }
}

impl fmt::Display for PackagingResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<PackagingResourceKind> for String {
    fn from(kind: PackagingResourceKind) -> Self {
        kind.as_str().to_string()
    }
}

impl FromStr for PackagingResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PackageInstall" => Ok(PackagingResourceKind::PackageInstall),
            "PackageRepository" => Ok(PackagingResourceKind::PackageRepository),
            _ => Err(format!("Unknown packaging resource kind: {}", s)),
        }
    }
}
