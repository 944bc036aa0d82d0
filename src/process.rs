use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::invocation::InvocationSpec;

/// Run the invocation with the caller's stdio and block until it exits.
///
/// There is no timeout: a deployment waiting on chain confirmations may take
/// arbitrarily long.
pub fn run_streaming(spec: &InvocationSpec, cwd: Option<&Path>) -> Result<ExitStatus> {
    let mut command = Command::new(spec.program());
    command
        .args(spec.args())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let status = command.status().with_context(|| match cwd {
        Some(dir) => format!(
            "failed to start {} in {}\ncommand: {}",
            spec.program(),
            dir.display(),
            spec
        ),
        None => format!("failed to start {}\ncommand: {}", spec.program(), spec),
    })?;

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeProject;

    #[test]
    fn returns_success_status() {
        let project = FakeProject::new(0);
        let status = run_streaming(&project.spec(), Some(project.dir())).unwrap();
        assert!(status.success());
    }

    #[test]
    fn returns_failure_status() {
        let project = FakeProject::new(3);
        let status = run_streaming(&project.spec(), Some(project.dir())).unwrap();
        assert!(!status.success());
        assert_eq!(status.code(), Some(3));
    }

    #[test]
    fn child_receives_args_in_order() {
        let project = FakeProject::new(0);
        run_streaming(&project.spec(), Some(project.dir())).unwrap();
        assert_eq!(
            project.recorded_args(),
            [
                "hardhat",
                "ignition",
                "deploy",
                "ignition/modules/RainyDayFund.ts",
                "--network",
                "sepolia",
            ]
        );
    }

    #[test]
    fn missing_launcher_errors_with_context() {
        let spec = InvocationSpec::new("/nonexistent/bin/npx", "m.ts", "sepolia", &[]);
        let err = run_streaming(&spec, None).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(
            msg.contains("failed to start /nonexistent/bin/npx"),
            "unexpected error: {}",
            msg
        );
    }
}
