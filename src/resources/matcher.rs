//! apiVersion/kind matching

use super::Resource;
use crate::models::PackagingResourceKind;

/// Matches resources by exact apiVersion and kind
///
/// No wildcards and no version negotiation: `packaging.carvel.dev/v1alpha1`
/// does not match `packaging.carvel.dev/v1alpha2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersionKindMatcher {
    pub api_version: String,
    pub kind: String,
}

impl ApiVersionKindMatcher {
    pub fn new(api_version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
        }
    }

    pub fn for_kind(kind: PackagingResourceKind) -> Self {
        Self::new(kind.api_version(), kind.as_str())
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        self.api_version == resource.api_version() && self.kind == resource.kind()
    }
}
