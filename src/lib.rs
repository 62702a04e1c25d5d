//! pkgwait library
//!
//! Decides whether Carvel packaging resources (`PackageInstall`,
//! `PackageRepository`) have finished applying, from a snapshot of their
//! generation counters and status conditions.
//!
//! The evaluator core (`evaluator`, `resources`, `models`) is pure. The
//! `wait`, `kube`, `config` and `cli` modules wrap it into a polling tool.

pub mod cli;
pub mod config;
pub mod evaluator;
pub mod kube;
pub mod models;
pub mod resources;
pub mod wait;

// Re-export commonly used types for convenience
pub use evaluator::{
    ApplyEvaluator, ApplyStatus, DeletingEvaluator, DoneApplyState, Evaluation,
    EvaluatorRegistry, evaluate_snapshot,
};
pub use resources::{ApiVersionKindMatcher, ConversionError, Resource, Scheme};
