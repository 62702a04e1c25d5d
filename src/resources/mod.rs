//! Generic resource model
//!
//! A [`Resource`] is an untyped Kubernetes object: whatever came out of a
//! manifest or the API server, with only `apiVersion` and `kind` validated.
//! Kind-specific code converts it into a typed view through the [`Scheme`].

mod matcher;
mod scheme;

pub use matcher::ApiVersionKindMatcher;
pub use scheme::{ConversionError, Scheme, TypedKind};

use kube::core::DynamicObject;
use serde::Deserialize;
use serde_json::Value;

/// Errors raised while building a [`Resource`] from raw input
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Failed to parse YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to convert object to JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Resource is not an object")]
    NotAnObject,

    #[error("Resource is missing {0}")]
    MissingField(&'static str),
}

/// An untyped cluster object with a known apiVersion and kind
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    api_version: String,
    kind: String,
    object: Value,
}

impl Resource {
    /// Wrap a JSON object, validating `apiVersion` and `kind`
    pub fn from_value(object: Value) -> Result<Self, ResourceError> {
        if !object.is_object() {
            return Err(ResourceError::NotAnObject);
        }
        let api_version = object
            .get("apiVersion")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .ok_or(ResourceError::MissingField("apiVersion"))?
            .to_string();
        let kind = object
            .get("kind")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .ok_or(ResourceError::MissingField("kind"))?
            .to_string();

        Ok(Self {
            api_version,
            kind,
            object,
        })
    }

    /// Parse every document of a (possibly multi-document) YAML stream
    ///
    /// Empty documents are skipped.
    pub fn from_yaml_str(yaml: &str) -> Result<Vec<Self>, ResourceError> {
        let mut resources = Vec::new();
        for document in serde_yaml::Deserializer::from_str(yaml) {
            let value = serde_yaml::Value::deserialize(document)?;
            if value.is_null() {
                continue;
            }
            let json = serde_json::to_value(value)?;
            resources.push(Self::from_value(json)?);
        }
        Ok(resources)
    }

    /// Build from an object fetched through the dynamic API
    pub fn from_dynamic(obj: &DynamicObject) -> Result<Self, ResourceError> {
        Self::from_value(serde_json::to_value(obj)?)
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn as_json(&self) -> &Value {
        &self.object
    }

    fn metadata(&self) -> Option<&Value> {
        self.object.get("metadata")
    }

    pub fn name(&self) -> &str {
        self.metadata()
            .and_then(|m| m.get("name"))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata()
            .and_then(|m| m.get("namespace"))
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
    }

    /// `metadata.generation`, absent reads as 0
    pub fn generation(&self) -> i64 {
        self.metadata()
            .and_then(|m| m.get("generation"))
            .and_then(|v| v.as_i64())
            .unwrap_or(0)
    }

    /// True once the API server has set `metadata.deletionTimestamp`
    pub fn is_deleting(&self) -> bool {
        self.metadata()
            .and_then(|m| m.get("deletionTimestamp"))
            .is_some_and(|v| !v.is_null())
    }

    pub fn finalizers(&self) -> Vec<&str> {
        self.metadata()
            .and_then(|m| m.get("finalizers"))
            .and_then(|v| v.as_array())
            .map(|items| items.iter().filter_map(|f| f.as_str()).collect())
            .unwrap_or_default()
    }

    /// Short human-readable identity, e.g. `packageinstall/cert-manager (packaging.carvel.dev/v1alpha1) namespace: tools`
    pub fn description(&self) -> String {
        let mut desc = format!(
            "{}/{} ({})",
            self.kind.to_lowercase(),
            self.name(),
            self.api_version
        );
        match self.namespace() {
            Some(ns) => desc.push_str(&format!(" namespace: {}", ns)),
            None => desc.push_str(" cluster"),
        }
        desc
    }
}
