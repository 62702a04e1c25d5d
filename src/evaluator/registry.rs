//! Ordered evaluator chain
//!
//! Evaluators are tried in registration order and the first one that claims
//! a resource decides. Kind evaluators go first, the generic deletion
//! fallback last.

use super::{
    ApplyEvaluator, DeletingEvaluator, DoneApplyState, PackageInstallEvaluator,
    PackageRepositoryEvaluator,
};
use crate::resources::{Resource, Scheme};
use std::sync::Arc;

/// Outcome of asking the registry about one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// An evaluator claimed the resource and produced a verdict
    Evaluated {
        evaluator: &'static str,
        state: DoneApplyState,
    },
    /// No registered evaluator has an opinion about this resource
    NotApplicable,
}

impl Evaluation {
    pub fn state(&self) -> Option<&DoneApplyState> {
        match self {
            Evaluation::Evaluated { state, .. } => Some(state),
            Evaluation::NotApplicable => None,
        }
    }
}

#[derive(Default, Clone)]
pub struct EvaluatorRegistry {
    evaluators: Vec<Arc<dyn ApplyEvaluator>>,
}

impl EvaluatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// PackageInstall, PackageRepository, then the deletion fallback
    pub fn with_defaults(scheme: Arc<Scheme>) -> Self {
        let deleting: Arc<dyn ApplyEvaluator> = Arc::new(DeletingEvaluator::new());

        let mut registry = Self::new();
        registry
            .register(Arc::new(PackageInstallEvaluator::new(
                scheme.clone(),
                deleting.clone(),
            )))
            .register(Arc::new(PackageRepositoryEvaluator::new(
                scheme,
                deleting.clone(),
            )))
            .register(deleting);
        registry
    }

    /// Append an evaluator at the end of the chain
    pub fn register(&mut self, evaluator: Arc<dyn ApplyEvaluator>) -> &mut Self {
        self.evaluators.push(evaluator);
        self
    }

    /// Names of registered evaluators, in chain order
    pub fn names(&self) -> Vec<&'static str> {
        self.evaluators.iter().map(|e| e.name()).collect()
    }

    /// First evaluator that claims `resource`
    pub fn evaluator_for(&self, resource: &Resource) -> Option<&dyn ApplyEvaluator> {
        self.evaluators
            .iter()
            .find(|e| e.claims(resource))
            .map(|e| e.as_ref())
    }

    pub fn evaluate(&self, resource: &Resource) -> Evaluation {
        match self.evaluator_for(resource) {
            Some(evaluator) => {
                let state = evaluator.is_done_applying(resource);
                tracing::debug!(
                    "{} evaluated {}: {}",
                    evaluator.name(),
                    resource.description(),
                    state
                );
                Evaluation::Evaluated {
                    evaluator: evaluator.name(),
                    state,
                }
            }
            None => {
                tracing::debug!("No evaluator claims {}", resource.description());
                Evaluation::NotApplicable
            }
        }
    }
}

impl std::fmt::Debug for EvaluatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluatorRegistry")
            .field("evaluators", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::MockApplyEvaluator;
    use serde_json::json;

    fn config_map() -> Resource {
        Resource::from_value(json!({"apiVersion": "v1", "kind": "ConfigMap"})).unwrap()
    }

    #[test]
    fn test_defaults_order() {
        let registry = EvaluatorRegistry::with_defaults(Arc::new(Scheme::with_packaging()));
        assert_eq!(
            registry.names(),
            vec!["PackageInstall", "PackageRepository", "Deleting"]
        );
    }

    #[test]
    fn test_empty_registry_is_not_applicable() {
        let registry = EvaluatorRegistry::new();
        assert!(registry.evaluator_for(&config_map()).is_none());
        assert_eq!(registry.evaluate(&config_map()), Evaluation::NotApplicable);
    }

    #[test]
    fn test_first_claiming_evaluator_wins() {
        let mut first = MockApplyEvaluator::new();
        first.expect_claims().return_const(false);
        first.expect_name().return_const("first");

        let mut second = MockApplyEvaluator::new();
        second.expect_claims().return_const(true);
        second.expect_name().return_const("second");
        second
            .expect_is_done_applying()
            .times(1)
            .returning(|_| DoneApplyState::succeeded());

        let mut third = MockApplyEvaluator::new();
        third.expect_claims().never();
        third.expect_name().return_const("third");

        let mut registry = EvaluatorRegistry::new();
        registry
            .register(Arc::new(first))
            .register(Arc::new(second))
            .register(Arc::new(third));

        assert_eq!(
            registry.evaluate(&config_map()),
            Evaluation::Evaluated {
                evaluator: "second",
                state: DoneApplyState::succeeded(),
            }
        );
    }
}
