use serde::Serialize;
use std::fmt;

pub const TOOL: &str = "hardhat";
pub const SUBCOMMANDS: [&str; 2] = ["ignition", "deploy"];
pub const NETWORK_FLAG: &str = "--network";

/// Argument vector for one deployment run. `tokens[0]` is the launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InvocationSpec {
    tokens: Vec<String>,
}

impl InvocationSpec {
    /// Tokens follow the deployment tool's grammar: launcher, program,
    /// subcommands, module, network flag and value, then passthrough args.
    pub fn new(launcher: &str, module: &str, network: &str, extra: &[String]) -> Self {
        let mut tokens = Vec::with_capacity(7 + extra.len());
        tokens.push(launcher.to_string());
        tokens.push(TOOL.to_string());
        tokens.extend(SUBCOMMANDS.iter().map(|s| s.to_string()));
        tokens.push(module.to_string());
        tokens.push(NETWORK_FLAG.to_string());
        tokens.push(network.to_string());
        tokens.extend(extra.iter().cloned());
        Self { tokens }
    }

    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl fmt::Display for InvocationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for token in self.tokens() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            if token.is_empty() || token.chars().any(char::is_whitespace) {
                write!(f, "{:?}", token)?;
            } else {
                f.write_str(token)?;
            }
        }
        Ok(())
    }
}
