use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::paths::expand_tilde;

pub const DEFAULT_MODULE: &str = "ignition/modules/RainyDayFund.ts";
pub const DEFAULT_NETWORK: &str = "sepolia";

#[cfg(windows)]
pub const DEFAULT_LAUNCHER: &str = r".\node_modules\.bin\npx.cmd";
#[cfg(not(windows))]
pub const DEFAULT_LAUNCHER: &str = "./node_modules/.bin/npx";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub deploy: DeployConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launcher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propagate_exit_code: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub launcher: String,
    pub module: String,
    pub network: String,
    pub project_dir: Option<PathBuf>,
    pub propagate_exit_code: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            launcher: DEFAULT_LAUNCHER.to_string(),
            module: DEFAULT_MODULE.to_string(),
            network: DEFAULT_NETWORK.to_string(),
            project_dir: None,
            propagate_exit_code: false,
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let proj = directories::ProjectDirs::from("", "", "deploy-launcher")
        .context("could not determine config directory")?;
    Ok(proj.config_dir().join("config.toml"))
}

/// Load the config from an explicit path, or from the default location.
///
/// An explicit path must exist. A missing default config means built-in defaults.
pub fn load_config_from(explicit: Option<&Path>, debug: bool) -> Result<ResolvedConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("config not found at {}", path.display());
        }
        return load_config(path, debug);
    }

    let path = default_config_path()?;
    if !path.exists() {
        if debug {
            eprintln!(
                "[debug] config: no file at {}, using defaults",
                path.display()
            );
        }
        return Ok(ResolvedConfig::default());
    }
    load_config(&path, debug)
}

pub fn load_config(path: &Path, debug: bool) -> Result<ResolvedConfig> {
    if debug {
        eprintln!("[debug] config: reading {}", path.display());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<ResolvedConfig> {
    let raw: Config = toml::from_str(contents).context("failed to parse config TOML")?;
    resolve(raw.deploy)
}

pub fn resolve(raw: DeployConfig) -> Result<ResolvedConfig> {
    let defaults = ResolvedConfig::default();

    let resolved = ResolvedConfig {
        launcher: raw.launcher.unwrap_or(defaults.launcher),
        module: raw.module.unwrap_or(defaults.module),
        network: raw.network.unwrap_or(defaults.network),
        project_dir: raw.project_dir.as_deref().map(expand_tilde),
        propagate_exit_code: raw.propagate_exit_code.unwrap_or(false),
    };
    validate(&resolved)?;
    Ok(resolved)
}

pub fn validate(config: &ResolvedConfig) -> Result<()> {
    if config.launcher.trim().is_empty() {
        bail!("launcher must not be empty");
    }
    if config.module.trim().is_empty() {
        bail!("module must not be empty");
    }
    if config.network.trim().is_empty() {
        bail!("network must not be empty");
    }
    if config.network.starts_with('-') {
        bail!(
            "invalid network {:?}: must not start with '-'",
            config.network
        );
    }
    Ok(())
}

pub fn write_config_atomic(path: &Path, config: &ResolvedConfig, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "config already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }

    let raw = Config {
        deploy: DeployConfig {
            launcher: Some(config.launcher.clone()),
            module: Some(config.module.clone()),
            network: Some(config.network.clone()),
            project_dir: config
                .project_dir
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            propagate_exit_code: Some(config.propagate_exit_code),
        },
    };

    let content = toml::to_string_pretty(&raw).context("failed to serialize config")?;

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, &content)
        .with_context(|| format!("failed to write temp config to {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("failed to rename config to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, ResolvedConfig::default());
        assert_eq!(config.network, "sepolia");
        assert_eq!(config.module, "ignition/modules/RainyDayFund.ts");
        assert!(!config.propagate_exit_code);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[deploy]
launcher = "/usr/local/bin/npx"
module = "ignition/modules/MockUSDC.ts"
network = "localhost"
project_dir = "/tmp/rainy-day"
propagate_exit_code = true
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.launcher, "/usr/local/bin/npx");
        assert_eq!(config.module, "ignition/modules/MockUSDC.ts");
        assert_eq!(config.network, "localhost");
        assert_eq!(config.project_dir, Some(PathBuf::from("/tmp/rainy-day")));
        assert!(config.propagate_exit_code);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let toml = r#"
[deploy]
network = "hardhat"
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.network, "hardhat");
        assert_eq!(config.launcher, DEFAULT_LAUNCHER);
        assert_eq!(config.module, DEFAULT_MODULE);
        assert_eq!(config.project_dir, None);
    }

    #[test]
    fn tilde_expansion_on_project_dir() {
        let home = std::env::var("HOME").unwrap();
        let toml = r#"
[deploy]
project_dir = "~/src/rainy-day"
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(
            config.project_dir,
            Some(PathBuf::from(&home).join("src/rainy-day"))
        );
    }

    #[test]
    fn empty_network_errors() {
        let toml = r#"
[deploy]
network = ""
"#;
        let err = parse_config(toml).unwrap_err().to_string();
        assert!(err.contains("network"), "unexpected error: {}", err);
    }

    #[test]
    fn flag_like_network_errors() {
        let toml = r#"
[deploy]
network = "--help"
"#;
        let err = parse_config(toml).unwrap_err().to_string();
        assert!(err.contains("must not start with '-'"), "unexpected error: {}", err);
    }

    #[test]
    fn empty_launcher_errors() {
        let toml = r#"
[deploy]
launcher = "  "
"#;
        assert!(parse_config(toml).is_err());
    }

    #[test]
    fn malformed_toml_errors() {
        let err = parse_config("[deploy\nnetwork = 1").unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse config TOML"));
    }

    #[test]
    fn explicit_missing_config_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing.toml");
        let err = load_config_from(Some(&path), false).unwrap_err();
        assert!(err.to_string().contains("config not found"));
    }

    #[test]
    fn write_then_load_preserves_values() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.toml");
        let config = ResolvedConfig {
            network: "holesky".to_string(),
            project_dir: Some(PathBuf::from("/tmp/rainy-day")),
            ..ResolvedConfig::default()
        };

        write_config_atomic(&path, &config, false).unwrap();
        let loaded = load_config(&path, false).unwrap();
        assert_eq!(loaded, config);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn write_refuses_overwrite_without_force() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        let config = ResolvedConfig::default();

        write_config_atomic(&path, &config, false).unwrap();
        let err = write_config_atomic(&path, &config, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        write_config_atomic(&path, &config, true).unwrap();
    }
}
