//! Kind evaluators for packaging resources
//!
//! Both kinds share one algorithm; each only supplies its [`ApplyStatus`]
//! accessors through `impl_apply_status!`.

use super::{ApplyEvaluator, ApplyStatus, DoneApplyState, evaluate_snapshot};
use crate::models::{Condition, PackageInstall, PackageRepository};
use crate::resources::{ApiVersionKindMatcher, Resource, Scheme, TypedKind};
use std::marker::PhantomData;
use std::sync::Arc;

macro_rules! impl_apply_status {
    ($type:ty) => {
        impl ApplyStatus for $type {
            fn generation(&self) -> i64 {
                self.metadata.generation.unwrap_or(0)
            }

            fn observed_generation(&self) -> i64 {
                self.status.generic.observed_generation
            }

            fn conditions(&self) -> &[Condition] {
                &self.status.generic.conditions
            }

            fn useful_error_message(&self) -> &str {
                &self.status.generic.useful_error_message
            }
        }
    };
}

impl_apply_status!(PackageInstall);
impl_apply_status!(PackageRepository);

/// Evaluator for one packaging kind `K`
pub struct PackagingEvaluator<K> {
    scheme: Arc<Scheme>,
    matcher: ApiVersionKindMatcher,
    fallback: Arc<dyn ApplyEvaluator>,
    _kind: PhantomData<fn() -> K>,
}

pub type PackageInstallEvaluator = PackagingEvaluator<PackageInstall>;
pub type PackageRepositoryEvaluator = PackagingEvaluator<PackageRepository>;

impl<K: TypedKind + ApplyStatus> PackagingEvaluator<K> {
    /// `fallback` is consulted when the snapshot has no explicit signal
    pub fn new(scheme: Arc<Scheme>, fallback: Arc<dyn ApplyEvaluator>) -> Self {
        Self {
            scheme,
            matcher: ApiVersionKindMatcher::for_kind(K::KIND),
            fallback,
            _kind: PhantomData,
        }
    }
}

impl<K: TypedKind + ApplyStatus> ApplyEvaluator for PackagingEvaluator<K> {
    fn name(&self) -> &'static str {
        K::KIND.as_str()
    }

    fn claims(&self, resource: &Resource) -> bool {
        self.matcher.matches(resource)
    }

    fn is_done_applying(&self, resource: &Resource) -> DoneApplyState {
        let typed: K = match self.scheme.convert(resource) {
            Ok(typed) => typed,
            Err(e) => {
                tracing::warn!("Failed to convert {}: {}", resource.description(), e);
                return DoneApplyState::failed(format!("failed object conversion: {}", e));
            }
        };

        if let Some(state) = evaluate_snapshot(&typed) {
            return state;
        }

        if self.fallback.claims(resource) {
            tracing::debug!(
                "Delegating {} to {} evaluator",
                resource.description(),
                self.fallback.name()
            );
            return self.fallback.is_done_applying(resource);
        }

        DoneApplyState::succeeded()
    }
}
