use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "deploy-launcher",
    about = "Run the Hardhat Ignition deployment and report how it went",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[arg(long, global = true)]
    pub json: bool,

    /// Print diagnostics to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub deploy: DeployArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Deploy the ignition module (default when no subcommand is given)
    Deploy(DeployArgs),
    /// Write a config file with the current defaults
    Init {
        /// Launcher executable (npx)
        #[arg(long)]
        launcher: Option<String>,
        /// Ignition module to deploy
        #[arg(long)]
        module: Option<String>,
        /// Target network
        #[arg(long)]
        network: Option<String>,
        /// Directory the deployment runs in
        #[arg(long)]
        project_dir: Option<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
        /// Print config path and exit
        #[arg(long)]
        show_path: bool,
    },
}

#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Target network (overrides config)
    #[arg(long)]
    pub network: Option<String>,
    /// Ignition module to deploy (overrides config)
    #[arg(long)]
    pub module: Option<String>,
    /// Launcher executable (overrides config)
    #[arg(long)]
    pub launcher: Option<String>,
    /// Print the command without running it
    #[arg(long)]
    pub dry_run: bool,
    /// Exit with the deployment's exit code when it fails
    #[arg(long)]
    pub strict: bool,
    /// Extra arguments passed to the deployment tool
    #[arg(last = true)]
    pub extra: Vec<String>,
}
