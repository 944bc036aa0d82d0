use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{self, DeployConfig, ResolvedConfig};

pub struct InitInputs {
    pub launcher: Option<String>,
    pub module: Option<String>,
    pub network: Option<String>,
    pub project_dir: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InitResult {
    pub config_path: PathBuf,
    pub launcher: String,
    pub module: String,
    pub network: String,
    pub project_dir: Option<PathBuf>,
}

pub fn cmd_init(inputs: InitInputs, config_path: &Path, force: bool) -> Result<InitResult> {
    let resolved = config::resolve(DeployConfig {
        launcher: inputs.launcher,
        module: inputs.module,
        network: inputs.network,
        project_dir: inputs.project_dir,
        propagate_exit_code: None,
    })?;

    config::write_config_atomic(config_path, &resolved, force)?;

    let ResolvedConfig {
        launcher,
        module,
        network,
        project_dir,
        ..
    } = resolved;

    Ok(InitResult {
        config_path: config_path.to_path_buf(),
        launcher,
        module,
        network,
        project_dir,
    })
}

pub fn format_init_human(result: &InitResult) -> String {
    let mut lines = vec![
        format!("Config written to {}", result.config_path.display()),
        format!("  launcher: {}", result.launcher),
        format!("  module:   {}", result.module),
        format!("  network:  {}", result.network),
    ];
    if let Some(dir) = &result.project_dir {
        lines.push(format!("  project:  {}", dir.display()));
    }
    lines.join("\n")
}
