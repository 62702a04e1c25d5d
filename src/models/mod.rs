//! Packaging model layer
//!
//! Structure:
//! - `condition.rs` - Status condition types shared by all kinds
//! - `packaging.rs` - Typed PackageInstall / PackageRepository views
//! - `packaging_resource_kind.rs` - Kind catalogue (names, plurals, aliases)

pub mod condition;
pub mod packaging;
pub mod packaging_resource_kind;

pub use condition::{Condition, ConditionStatus, ConditionType};
pub use packaging::{
    GenericStatus, PACKAGING_API_VERSION, PackageInstall, PackageInstallStatus,
    PackageRepository, PackageRepositoryStatus,
};
pub use packaging_resource_kind::PackagingResourceKind;

use serde::{Deserialize, Deserializer};

/// Read an explicit `null` the same as a missing key
///
/// `#[serde(default)]` alone only covers absent keys. Controllers and
/// hand-written manifests (`usefulErrorMessage:` with no value) both emit
/// `null` for empty fields.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
