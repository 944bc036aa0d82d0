mod cli;
mod commands;
mod config;
mod invocation;
mod paths;
mod process;
mod testutil;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let command = cli.command.unwrap_or(Command::Deploy(cli.deploy));

    match command {
        Command::Deploy(args) => {
            let config = config::load_config_from(cli.config.as_deref(), cli.debug)?;
            let propagate = args.strict || config.propagate_exit_code;

            let inputs = commands::DeployInputs {
                network: args.network,
                module: args.module,
                launcher: args.launcher,
                extra: args.extra,
                dry_run: args.dry_run,
                debug: cli.debug,
            };

            let result = commands::cmd_deploy(inputs, &config)?;
            output(&result, cli.json, commands::format_deploy_human)?;

            if propagate {
                if let Some(code) = result.failure_exit_code() {
                    return Ok(code);
                }
            }
        }
        Command::Init {
            launcher,
            module,
            network,
            project_dir,
            force,
            show_path,
        } => {
            let config_path = match cli.config {
                Some(path) => path,
                None => config::default_config_path()?,
            };
            if show_path {
                println!("{}", config_path.display());
                return Ok(0);
            }

            let inputs = commands::InitInputs {
                launcher,
                module,
                network,
                project_dir,
            };

            let result = commands::cmd_init(inputs, &config_path, force)?;
            output(&result, cli.json, commands::format_init_human)?;
        }
    }
    Ok(0)
}

fn output<T: serde::Serialize>(result: &T, json: bool, human_fn: fn(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        let text = human_fn(result);
        if !text.is_empty() {
            println!("{}", text);
        }
    }
    Ok(())
}
