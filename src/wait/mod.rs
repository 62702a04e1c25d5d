//! Poll loop around the evaluators
//!
//! Repeatedly fetches a fresh snapshot, evaluates it, and stops at the first
//! done verdict or when the timeout expires. Each tick works on its own
//! snapshot; nothing is carried between evaluations except the last message
//! (for progress reporting) and whether the object was ever seen.

use crate::config::WaitConfig;
use crate::evaluator::{DoneApplyState, Evaluation, EvaluatorRegistry};
use crate::resources::Resource;
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Consecutive fetch failures tolerated before giving up
const MAX_CONSECUTIVE_ERRORS: u32 = 5;

/// Where snapshots come from
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Identity of the watched object for messages
    fn describe(&self) -> String;

    /// Fetch the current object; `None` when it does not exist
    async fn fetch(&self) -> anyhow::Result<Option<Resource>>;
}

/// Poll cadence and deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    pub interval: Duration,
    pub timeout: Duration,
}

impl From<&WaitConfig> for WaitOptions {
    fn from(config: &WaitConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.interval_seconds),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self::from(&WaitConfig::default())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("no evaluator for {0}")]
    NoEvaluator(String),

    #[error("timed out after {elapsed_secs}s waiting for {target} (last status: {last_message})")]
    Timeout {
        target: String,
        elapsed_secs: u64,
        last_message: String,
    },

    #[error("failed to fetch {target}: {source}")]
    Fetch {
        target: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Wait until `source` reaches a done verdict
///
/// `on_progress` is called whenever the not-done message changes. An object
/// that disappears after having been seen is reported as a completed
/// deletion.
pub async fn wait_for<S, F>(
    source: &S,
    registry: &EvaluatorRegistry,
    options: &WaitOptions,
    mut on_progress: F,
) -> Result<DoneApplyState, WaitError>
where
    S: ResourceSource + ?Sized,
    F: FnMut(&DoneApplyState),
{
    let started = Instant::now();
    let target = source.describe();
    let mut seen = false;
    let mut error_count = 0u32;
    let mut last_message = String::from("not yet observed");

    loop {
        match source.fetch().await {
            Ok(Some(resource)) => {
                error_count = 0;
                seen = true;
                tracing::debug!("Fetched {} at generation {}", target, resource.generation());
                match registry.evaluate(&resource) {
                    Evaluation::Evaluated { state, .. } if state.done => {
                        tracing::info!("{} finished: {}", target, state);
                        return Ok(state);
                    }
                    Evaluation::Evaluated { state, .. } => {
                        if state.message != last_message {
                            on_progress(&state);
                            last_message = state.message.clone();
                        }
                    }
                    Evaluation::NotApplicable => {
                        return Err(WaitError::NoEvaluator(resource.description()));
                    }
                }
            }
            Ok(None) if seen => {
                tracing::info!("{} no longer exists", target);
                return Ok(DoneApplyState {
                    done: true,
                    successful: true,
                    message: "resource no longer exists".to_string(),
                });
            }
            Ok(None) => return Err(WaitError::NotFound(target)),
            Err(e) => {
                error_count += 1;
                tracing::warn!("Fetching {} failed ({}): {:#}", target, error_count, e);
                if error_count >= MAX_CONSECUTIVE_ERRORS {
                    return Err(WaitError::Fetch { target, source: e });
                }
            }
        }

        let elapsed = started.elapsed();
        if elapsed >= options.timeout {
            return Err(WaitError::Timeout {
                target,
                elapsed_secs: elapsed.as_secs(),
                last_message,
            });
        }
        let remaining = options.timeout - elapsed;
        tokio::time::sleep(options.interval.min(remaining)).await;
    }
}
