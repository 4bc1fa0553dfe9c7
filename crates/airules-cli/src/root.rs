use airules_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the repository root.
///
/// Priority:
/// 1. `--root` flag / `AIRULES_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.ai_state` or `rules/registry.yaml`
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut dir = cwd.clone();
    loop {
        if dir.join(paths::STATE_FILE).is_file() || dir.join(paths::REGISTRY_FILE).is_file() {
            return dir;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    let mut dir = cwd.clone();
    loop {
        if dir.join(paths::GIT_DIR).is_dir() {
            return dir;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    cwd
}
