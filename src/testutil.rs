#![cfg(test)]

use std::path::Path;
use tempfile::TempDir;

use crate::config::{ResolvedConfig, DEFAULT_MODULE, DEFAULT_NETWORK};
use crate::invocation::InvocationSpec;

pub const FAKE_LAUNCHER: &str = "/bin/sh";
const ARGS_FILE: &str = "args.txt";

/// A project directory with a stand-in `hardhat` script.
///
/// With `/bin/sh` as the launcher, `sh hardhat ignition deploy ...` runs the
/// script from the project dir. The shell sees `hardhat` as `$0`, so the script
/// records `"$0" "$@"` to capture every argument after the launcher, then exits
/// with the configured code.
pub struct FakeProject {
    dir: TempDir,
}

impl FakeProject {
    pub fn new(exit_code: i32) -> Self {
        Self::with_script(&format!(
            "printf '%s\\n' \"$0\" \"$@\" > {}\nexit {}\n",
            ARGS_FILE, exit_code
        ))
    }

    /// A fake tool whose body is `script`, run by `/bin/sh`.
    pub fn with_script(script: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        std::fs::write(dir.path().join("hardhat"), script).expect("failed to write fake tool");
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn spec(&self) -> InvocationSpec {
        InvocationSpec::new(FAKE_LAUNCHER, DEFAULT_MODULE, DEFAULT_NETWORK, &[])
    }

    pub fn config(&self) -> ResolvedConfig {
        ResolvedConfig {
            launcher: FAKE_LAUNCHER.to_string(),
            project_dir: Some(self.dir.path().to_path_buf()),
            ..ResolvedConfig::default()
        }
    }

    /// Arguments the fake tool saw, or empty if it never ran.
    pub fn recorded_args(&self) -> Vec<String> {
        match std::fs::read_to_string(self.dir.path().join(ARGS_FILE)) {
            Ok(contents) => contents.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn ran(&self) -> bool {
        self.dir.path().join(ARGS_FILE).exists()
    }
}
