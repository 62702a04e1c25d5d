//! Type registry for typed conversions
//!
//! The scheme is built once at startup and shared read-only (usually behind
//! an `Arc`). Converting a [`Resource`] into a kind that was never registered
//! fails instead of silently succeeding.
//!
//! ## Adding a New Kind
//!
//! 1. Add the typed view in `src/models/packaging.rs`
//! 2. Add a variant to `PackagingResourceKind`
//! 3. Add an `impl_typed_kind!` line below
//! 4. Register it in [`Scheme::with_packaging`]

use super::{ApiVersionKindMatcher, Resource};
use crate::models::{PackageInstall, PackageRepository, PackagingResourceKind};
use serde::de::DeserializeOwned;
use std::collections::HashSet;

/// Conversion failure from a generic [`Resource`] to a typed view
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("no type registered for {kind} ({api_version})")]
    NotRegistered { api_version: String, kind: String },

    #[error("expected {expected} but found {found}")]
    KindMismatch { expected: String, found: String },

    #[error("{0}")]
    Deserialize(#[from] serde_json::Error),
}

/// A typed view that can be materialized from a generic [`Resource`]
pub trait TypedKind: DeserializeOwned {
    const KIND: PackagingResourceKind;
}

macro_rules! impl_typed_kind {
    ($type:ty, $kind:expr) => {
        impl TypedKind for $type {
            const KIND: PackagingResourceKind = $kind;
        }
    };
}

impl_typed_kind!(PackageInstall, PackagingResourceKind::PackageInstall);
impl_typed_kind!(PackageRepository, PackagingResourceKind::PackageRepository);

/// Registry of kinds that conversion is allowed to produce
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    kinds: Vec<PackagingResourceKind>,
    index: HashSet<(String, String)>,
}

impl Scheme {
    /// An empty scheme; every conversion fails until kinds are registered
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheme with every packaging kind registered
    pub fn with_packaging() -> Self {
        let mut scheme = Self::new();
        scheme
            .register(PackagingResourceKind::PackageInstall)
            .register(PackagingResourceKind::PackageRepository);
        scheme
    }

    pub fn register(&mut self, kind: PackagingResourceKind) -> &mut Self {
        let key = (kind.api_version().to_string(), kind.as_str().to_string());
        if self.index.insert(key) {
            tracing::debug!("Registered {} ({}) in scheme", kind, kind.api_version());
            self.kinds.push(kind);
        }
        self
    }

    pub fn is_registered(&self, api_version: &str, kind: &str) -> bool {
        self.index
            .contains(&(api_version.to_string(), kind.to_string()))
    }

    /// Registered kinds in registration order
    pub fn kinds(&self) -> &[PackagingResourceKind] {
        &self.kinds
    }

    /// Materialize the typed view of `resource`
    ///
    /// Either the whole object converts or an error is returned; there is no
    /// partially filled result.
    pub fn convert<K: TypedKind>(&self, resource: &Resource) -> Result<K, ConversionError> {
        let kind = K::KIND;
        if !self.is_registered(kind.api_version(), kind.as_str()) {
            return Err(ConversionError::NotRegistered {
                api_version: kind.api_version().to_string(),
                kind: kind.as_str().to_string(),
            });
        }

        if !ApiVersionKindMatcher::for_kind(kind).matches(resource) {
            return Err(ConversionError::KindMismatch {
                expected: format!("{} ({})", kind, kind.api_version()),
                found: format!("{} ({})", resource.kind(), resource.api_version()),
            });
        }

        Ok(serde_json::from_value(resource.as_json().clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pkgi(status: serde_json::Value) -> Resource {
        Resource::from_value(json!({
            "apiVersion": "packaging.carvel.dev/v1alpha1",
            "kind": "PackageInstall",
            "metadata": {"name": "app", "generation": 2},
            "status": status
        }))
        .unwrap()
    }

    #[test]
    fn test_with_packaging_registers_all_kinds() {
        let scheme = Scheme::with_packaging();
        assert_eq!(scheme.kinds(), PackagingResourceKind::all());
        assert!(scheme.is_registered("packaging.carvel.dev/v1alpha1", "PackageInstall"));
        assert!(scheme.is_registered("packaging.carvel.dev/v1alpha1", "PackageRepository"));
        assert!(!scheme.is_registered("kappctrl.k14s.io/v1alpha1", "App"));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut scheme = Scheme::new();
        scheme
            .register(PackagingResourceKind::PackageInstall)
            .register(PackagingResourceKind::PackageInstall);
        assert_eq!(scheme.kinds().len(), 1);
    }

    #[test]
    fn test_convert_unregistered_kind_fails() {
        let scheme = Scheme::new();
        let err = scheme
            .convert::<PackageInstall>(&pkgi(json!({})))
            .unwrap_err();
        assert!(matches!(err, ConversionError::NotRegistered { .. }));
        assert!(err.to_string().contains("no type registered"));
    }

    #[test]
    fn test_convert_kind_mismatch_fails() {
        let scheme = Scheme::with_packaging();
        let err = scheme
            .convert::<PackageRepository>(&pkgi(json!({})))
            .unwrap_err();
        assert!(matches!(err, ConversionError::KindMismatch { .. }));
    }

    #[test]
    fn test_convert_success() {
        let scheme = Scheme::with_packaging();
        let typed: PackageInstall = scheme
            .convert(&pkgi(json!({"observedGeneration": 2})))
            .unwrap();
        assert_eq!(typed.metadata.generation, Some(2));
        assert_eq!(typed.status.generic.observed_generation, 2);
    }

    #[test]
    fn test_convert_malformed_status_fails() {
        let scheme = Scheme::with_packaging();
        let err = scheme
            .convert::<PackageInstall>(&pkgi(json!({"conditions": "not-a-list"})))
            .unwrap_err();
        assert!(matches!(err, ConversionError::Deserialize(_)));
    }
}
