//! Apply-completion evaluation
//!
//! Decides, from a single snapshot of a resource, whether the last apply has
//! finished and whether it succeeded. Evaluation is pure: no I/O, no retries,
//! no timers. Polling belongs to the caller (see `crate::wait`).
//!
//! Flow for one resource:
//! 1. [`EvaluatorRegistry`] picks the first evaluator that claims the object
//! 2. A kind evaluator converts it to its typed view and runs [`evaluate_snapshot`]
//! 3. With no explicit signal, the [`DeletingEvaluator`] fallback gets a say
//! 4. Otherwise the resource is considered converged

mod deleting;
mod packaging;
mod registry;

pub use deleting::DeletingEvaluator;
pub use packaging::{PackageInstallEvaluator, PackageRepositoryEvaluator, PackagingEvaluator};
pub use registry::{Evaluation, EvaluatorRegistry};

use crate::models::{Condition, ConditionType};
use crate::resources::Resource;
use serde::Serialize;
use std::fmt;

/// Verdict for one evaluation
///
/// `successful` is only meaningful when `done` is true.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DoneApplyState {
    pub done: bool,
    pub successful: bool,
    pub message: String,
}

impl DoneApplyState {
    /// Not done yet; caller should poll again
    pub fn in_progress(message: impl Into<String>) -> Self {
        Self {
            done: false,
            successful: false,
            message: message.into(),
        }
    }

    pub fn succeeded() -> Self {
        Self {
            done: true,
            successful: true,
            message: String::new(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            done: true,
            successful: false,
            message: message.into(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.done && !self.successful
    }

    pub fn is_succeeded(&self) -> bool {
        self.done && self.successful
    }
}

impl fmt::Display for DoneApplyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match (self.done, self.successful) {
            (false, _) => "in progress",
            (true, true) => "succeeded",
            (true, false) => "failed",
        };
        if self.message.is_empty() {
            write!(f, "{}", state)
        } else {
            write!(f, "{}: {}", state, self.message)
        }
    }
}

/// An evaluator that may claim a resource and judge its apply state
///
/// `claims` is kept separate from evaluation so "not mine" can never be
/// confused with a verdict.
#[cfg_attr(test, mockall::automock)]
pub trait ApplyEvaluator: Send + Sync {
    /// Short identifier used in logs and CLI output
    fn name(&self) -> &'static str;

    /// Whether this evaluator understands `resource`
    fn claims(&self, resource: &Resource) -> bool;

    /// Judge `resource`; only called after `claims` returned true
    fn is_done_applying(&self, resource: &Resource) -> DoneApplyState;
}

/// Apply-relevant fields of a typed view
///
/// Each kind supplies these accessors; the interpretation lives in
/// [`evaluate_snapshot`].
pub trait ApplyStatus {
    fn generation(&self) -> i64;
    fn observed_generation(&self) -> i64;
    fn conditions(&self) -> &[Condition];
    fn useful_error_message(&self) -> &str;
}

/// Generation check and condition scan
///
/// Returns `None` when the snapshot carries no explicit signal, leaving the
/// decision to the deletion fallback and default convergence.
///
/// Conditions are scanned in the order given and the first triggering one
/// wins. If both `Reconciling` and `ReconcileFailed` are `True`, whichever
/// appears first decides.
pub fn evaluate_snapshot<S: ApplyStatus + ?Sized>(status: &S) -> Option<DoneApplyState> {
    if status.generation() != status.observed_generation() {
        return Some(DoneApplyState::in_progress(format!(
            "waiting for generation {} to be observed",
            status.generation()
        )));
    }

    for cond in status.conditions() {
        let error_msg = match status.useful_error_message() {
            "" => cond.message.as_str(),
            msg => msg,
        };

        if cond.is_true(&ConditionType::Reconciling) {
            return Some(DoneApplyState::in_progress("Reconciling"));
        }
        if cond.is_true(&ConditionType::ReconcileFailed) {
            return Some(DoneApplyState::failed(format!(
                "reconcile failed: message: {}",
                error_msg
            )));
        }
        if cond.is_true(&ConditionType::DeleteFailed) {
            return Some(DoneApplyState::failed(format!(
                "delete failed: message: {}",
                error_msg
            )));
        }
    }

    None
}
