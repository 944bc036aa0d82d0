use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::process::ExitStatus;
use std::time::Instant;

use crate::config::{validate, ResolvedConfig};
use crate::invocation::InvocationSpec;
use crate::paths::resolve_launcher;
use crate::process::run_streaming;

pub const SUCCESS_LINE: &str = "\n✅ Deployment finished successfully";
pub const FAILURE_LINE: &str = "\n❌ Deployment failed";

pub struct DeployInputs {
    pub network: Option<String>,
    pub module: Option<String>,
    pub launcher: Option<String>,
    pub extra: Vec<String>,
    pub dry_run: bool,
    pub debug: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployStatus {
    Planned,
    Succeeded,
    Failed,
}

impl DeployStatus {
    fn from_exit(status: &ExitStatus) -> Self {
        if status.success() {
            DeployStatus::Succeeded
        } else {
            DeployStatus::Failed
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeployResult {
    pub invocation: InvocationSpec,
    pub network: String,
    pub module: String,
    pub status: DeployStatus,
    /// None in dry-run, or when the child was killed by a signal.
    pub exit_code: Option<i32>,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl DeployResult {
    /// Exit code for this process when failures are propagated.
    pub fn failure_exit_code(&self) -> Option<i32> {
        match self.status {
            DeployStatus::Failed => Some(self.exit_code.filter(|c| *c != 0).unwrap_or(1)),
            _ => None,
        }
    }
}

/// Apply command-line overrides on top of the loaded config.
pub fn apply_overrides(config: &ResolvedConfig, inputs: &DeployInputs) -> Result<ResolvedConfig> {
    let mut merged = config.clone();
    if let Some(network) = &inputs.network {
        merged.network = network.clone();
    }
    if let Some(module) = &inputs.module {
        merged.module = module.clone();
    }
    if let Some(launcher) = &inputs.launcher {
        merged.launcher = launcher.clone();
    }
    validate(&merged)?;
    Ok(merged)
}

pub fn plan_deploy(
    inputs: &DeployInputs,
    config: &ResolvedConfig,
) -> Result<(ResolvedConfig, InvocationSpec)> {
    let merged = apply_overrides(config, inputs)?;
    let launcher = resolve_launcher(&merged.launcher, merged.project_dir.as_deref());
    let spec = InvocationSpec::new(
        &launcher,
        &merged.module,
        &merged.network,
        &inputs.extra,
    );
    Ok((merged, spec))
}

pub fn cmd_deploy(inputs: DeployInputs, config: &ResolvedConfig) -> Result<DeployResult> {
    let (merged, spec) = plan_deploy(&inputs, config)?;
    let started_at = Utc::now();

    if inputs.debug {
        eprintln!("[debug] deploy: {}", spec);
        if let Some(dir) = &merged.project_dir {
            eprintln!("[debug] deploy: cwd {}", dir.display());
        }
    }

    if inputs.dry_run {
        return Ok(DeployResult {
            invocation: spec,
            network: merged.network,
            module: merged.module,
            status: DeployStatus::Planned,
            exit_code: None,
            started_at,
            elapsed_ms: 0,
        });
    }

    let clock = Instant::now();
    let exit = run_streaming(&spec, merged.project_dir.as_deref())?;
    let elapsed_ms = u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX);

    if inputs.debug {
        eprintln!("[debug] deploy: exited with {} after {}ms", exit, elapsed_ms);
    }

    Ok(DeployResult {
        invocation: spec,
        network: merged.network,
        module: merged.module,
        status: DeployStatus::from_exit(&exit),
        exit_code: exit.code(),
        started_at,
        elapsed_ms,
    })
}

pub fn format_deploy_human(result: &DeployResult) -> String {
    match result.status {
        DeployStatus::Planned => format!("Would run: {}", result.invocation),
        DeployStatus::Succeeded => SUCCESS_LINE.to_string(),
        DeployStatus::Failed => FAILURE_LINE.to_string(),
    }
}
