use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    } else if path == "~" {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home);
        }
    }
    PathBuf::from(path)
}

/// Resolve the launcher against the project directory the child will run in.
///
/// Bare names (`npx`) are left for PATH lookup and absolute paths are kept.
/// Only relative paths with a separator (`./node_modules/.bin/npx`) are joined,
/// since the child's cwd does not apply to program lookup.
pub fn resolve_launcher(launcher: &str, project_dir: Option<&Path>) -> String {
    let expanded = expand_tilde(launcher);
    let Some(dir) = project_dir else {
        return expanded.to_string_lossy().into_owned();
    };
    if expanded.is_absolute() || !has_separator(launcher) {
        return expanded.to_string_lossy().into_owned();
    }
    dir.join(expanded).to_string_lossy().into_owned()
}

fn has_separator(path: &str) -> bool {
    path.contains('/') || (cfg!(windows) && path.contains('\\'))
}
