//! Generic evaluator for resources being deleted

use super::{ApplyEvaluator, DoneApplyState};
use crate::resources::Resource;

/// Claims any resource with `metadata.deletionTimestamp` set
///
/// A deleting resource is never done: completion is observed by the caller
/// when the object disappears from the API server.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeletingEvaluator;

impl DeletingEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl ApplyEvaluator for DeletingEvaluator {
    fn name(&self) -> &'static str {
        "Deleting"
    }

    fn claims(&self, resource: &Resource) -> bool {
        resource.is_deleting()
    }

    fn is_done_applying(&self, resource: &Resource) -> DoneApplyState {
        let finalizers = resource.finalizers();
        if finalizers.is_empty() {
            DoneApplyState::in_progress("waiting on deletion")
        } else {
            DoneApplyState::in_progress(format!(
                "waiting on deletion (finalizers: {})",
                finalizers.join(", ")
            ))
        }
    }
}
