//! Typed views of the `packaging.carvel.dev/v1alpha1` resources
//!
//! Only the fields needed to decide whether an apply has finished are typed.
//! `spec` is carried as raw JSON.

use super::condition::Condition;
use super::null_as_default;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

/// API group/version shared by all packaging kinds
pub const PACKAGING_API_VERSION: &str = "packaging.carvel.dev/v1alpha1";

/// Status fields common to every kapp-controller managed resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub observed_generation: i64,

    /// Order is whatever the controller wrote; it is not a priority order
    #[serde(default, deserialize_with = "null_as_default")]
    pub conditions: Vec<Condition>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub friendly_description: String,

    /// Preferred over the condition message when non-empty
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub useful_error_message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInstallStatus {
    #[serde(flatten)]
    pub generic: GenericStatus,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub version: String,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub last_attempted_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInstall {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: serde_json::Value,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: PackageInstallStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRepositoryStatus {
    #[serde(flatten)]
    pub generic: GenericStatus,

    #[serde(default, deserialize_with = "null_as_default")]
    pub consecutive_reconcile_successes: i32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub consecutive_reconcile_failures: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRepository {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: serde_json::Value,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: PackageRepositoryStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::condition::{ConditionStatus, ConditionType};
    use serde_json::json;

    #[test]
    fn test_package_install_status_flattens_generic_fields() {
        let pkgi: PackageInstall = serde_json::from_value(json!({
            "apiVersion": "packaging.carvel.dev/v1alpha1",
            "kind": "PackageInstall",
            "metadata": {"name": "cert-manager", "namespace": "tools", "generation": 4},
            "spec": {"packageRef": {"refName": "cert-manager.community.tanzu.vmware.com"}},
            "status": {
                "observedGeneration": 4,
                "version": "1.10.0",
                "conditions": [{"type": "ReconcileSucceeded", "status": "True"}],
                "usefulErrorMessage": ""
            }
        }))
        .unwrap();

        assert_eq!(pkgi.metadata.generation, Some(4));
        assert_eq!(pkgi.status.generic.observed_generation, 4);
        assert_eq!(pkgi.status.version, "1.10.0");
        assert_eq!(pkgi.status.generic.conditions.len(), 1);
        assert_eq!(
            pkgi.status.generic.conditions[0].type_,
            ConditionType::ReconcileSucceeded
        );
        assert_eq!(
            pkgi.status.generic.conditions[0].status,
            ConditionStatus::True
        );
    }

    #[test]
    fn test_missing_status_defaults() {
        let repo: PackageRepository = serde_json::from_value(json!({
            "metadata": {"name": "tanzu-standard"}
        }))
        .unwrap();
        assert_eq!(repo.status, PackageRepositoryStatus::default());
        assert!(repo.status.generic.conditions.is_empty());
    }

    #[test]
    fn test_null_status_fields_read_as_defaults() {
        let repo: PackageRepository = serde_json::from_value(json!({
            "metadata": {"name": "tanzu-standard"},
            "status": {
                "observedGeneration": null,
                "conditions": null,
                "friendlyDescription": null,
                "usefulErrorMessage": null,
                "consecutiveReconcileSuccesses": null,
                "consecutiveReconcileFailures": null
            }
        }))
        .unwrap();
        assert_eq!(repo.status, PackageRepositoryStatus::default());

        let pkgi: PackageInstall = serde_json::from_value(json!({
            "metadata": {"name": "app"},
            "status": {"version": null, "lastAttemptedVersion": null}
        }))
        .unwrap();
        assert_eq!(pkgi.status, PackageInstallStatus::default());

        let no_status: PackageInstall =
            serde_json::from_value(json!({"metadata": {"name": "app"}, "status": null})).unwrap();
        assert_eq!(no_status.status, PackageInstallStatus::default());
    }

    #[test]
    fn test_wrongly_typed_field_fails() {
        let result = serde_json::from_value::<PackageRepository>(json!({
            "status": {"observedGeneration": "three"}
        }));
        assert!(result.is_err());
    }
}
