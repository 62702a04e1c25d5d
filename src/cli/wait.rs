//! `pkgwait wait`: poll a live resource until it finishes applying

use anyhow::{Context, Result};
use clap::Args;
use std::time::Duration;

use crate::config::Config;
use crate::evaluator::EvaluatorRegistry;
use crate::kube::{ClusterSource, create_client};
use crate::models::PackagingResourceKind;
use crate::wait::{WaitOptions, wait_for};

#[derive(Args, Debug)]
pub struct WaitArgs {
    /// Resource kind or alias (e.g., "pkgi", "packagerepository")
    pub kind: String,

    /// Resource name
    pub name: String,

    /// Namespace (defaults to defaultNamespace from config)
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Timeout in seconds (overrides wait.timeoutSeconds)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Poll interval in seconds (overrides wait.intervalSeconds)
    #[arg(long)]
    pub interval: Option<u64>,
}

impl WaitArgs {
    fn options(&self, config: &Config) -> WaitOptions {
        let mut options = WaitOptions::from(&config.wait);
        if let Some(timeout) = self.timeout.filter(|t| *t > 0) {
            options.timeout = Duration::from_secs(timeout);
        }
        if let Some(interval) = self.interval.filter(|i| *i > 0) {
            options.interval = Duration::from_secs(interval);
        }
        options
    }
}

/// Returns the process exit code: 0 on success, 1 on a failed apply
pub async fn handle_wait_command(
    registry: &EvaluatorRegistry,
    config: &Config,
    args: WaitArgs,
) -> Result<u8> {
    let kind = PackagingResourceKind::from_str_case_insensitive(&args.kind)
        .with_context(|| format!("Unknown resource kind: {}", args.kind))?;
    let namespace = args
        .namespace
        .clone()
        .unwrap_or_else(|| config.default_namespace.clone());
    let options = args.options(config);

    let client = create_client().await?;
    let source = ClusterSource::new(client, kind, &namespace, &args.name);

    tracing::info!(
        "Waiting for {}/{} in {} (timeout {}s)",
        kind,
        args.name,
        namespace,
        options.timeout.as_secs()
    );

    let state = wait_for(&source, registry, &options, |progress| {
        eprintln!("{}/{}: {}", kind.as_str().to_lowercase(), args.name, progress.message);
    })
    .await?;

    println!("{}/{}: {}", kind.as_str().to_lowercase(), args.name, state);
    Ok(if state.successful { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(timeout: Option<u64>, interval: Option<u64>) -> WaitArgs {
        WaitArgs {
            kind: "pkgi".to_string(),
            name: "app".to_string(),
            namespace: None,
            timeout,
            interval,
        }
    }

    #[test]
    fn test_flags_override_config() {
        let options = args(Some(30), Some(5)).options(&Config::default());
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert_eq!(options.interval, Duration::from_secs(5));
    }

    #[test]
    fn test_zero_flags_fall_back_to_config() {
        let config = Config::default();
        let options = args(Some(0), None).options(&config);
        assert_eq!(options, WaitOptions::from(&config.wait));
    }
}
