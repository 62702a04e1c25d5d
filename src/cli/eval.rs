//! `pkgwait eval`: evaluate manifests offline
//!
//! Reads resources from files (or stdin) and prints one verdict per
//! resource. Nothing is fetched from a cluster; the manifests are expected to
//! already carry their `status`.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

use crate::evaluator::{DoneApplyState, Evaluation, EvaluatorRegistry};
use crate::resources::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One line of `eval` output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvalReport {
    pub resource: String,
    /// `None` when no evaluator claimed the resource
    pub evaluator: Option<&'static str>,
    #[serde(flatten)]
    pub state: Option<DoneApplyState>,
}

impl EvalReport {
    pub fn new(resource: &Resource, evaluation: Evaluation) -> Self {
        let evaluator = match &evaluation {
            Evaluation::Evaluated { evaluator, .. } => Some(*evaluator),
            Evaluation::NotApplicable => None,
        };
        Self {
            resource: resource.description(),
            evaluator,
            state: evaluation.state().cloned(),
        }
    }
}

/// Exit status for a batch of reports
///
/// 1 if anything failed, otherwise 2 if anything is still in progress,
/// otherwise 0. Resources without an evaluator do not count.
pub fn exit_code(reports: &[EvalReport]) -> u8 {
    let states = || reports.iter().filter_map(|r| r.state.as_ref());
    if states().any(|s| s.is_failed()) {
        1
    } else if states().any(|s| !s.done) {
        2
    } else {
        0
    }
}

fn read_inputs(files: &[PathBuf]) -> Result<Vec<Resource>> {
    if files.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read manifests from stdin")?;
        return Resource::from_yaml_str(&input).context("Failed to parse manifests from stdin");
    }

    let mut resources = Vec::new();
    for path in files {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let parsed = Resource::from_yaml_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::debug!("Loaded {} resources from {}", parsed.len(), path.display());
        resources.extend(parsed);
    }
    Ok(resources)
}

/// Evaluate every resource in `files` and print the verdicts
///
/// Returns the process exit code (see [`exit_code`]).
pub fn handle_eval_command(
    registry: &EvaluatorRegistry,
    files: &[PathBuf],
    output: OutputFormat,
) -> Result<u8> {
    let reports: Vec<EvalReport> = read_inputs(files)?
        .iter()
        .map(|resource| EvalReport::new(resource, registry.evaluate(resource)))
        .collect();

    match output {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&reports).context("Failed to serialize reports")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            for report in &reports {
                match (&report.state, report.evaluator) {
                    (Some(state), Some(evaluator)) => {
                        println!("{}: {} [{}]", report.resource, state, evaluator)
                    }
                    _ => println!("{}: skipped (no evaluator)", report.resource),
                }
            }
        }
    }

    Ok(exit_code(&reports))
}
