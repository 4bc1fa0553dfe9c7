use crate::error::{AirulesError, Result};
use crate::io;
use crate::paths;
use std::path::Path;

// ---------------------------------------------------------------------------
// Pre-commit hook installer
// ---------------------------------------------------------------------------

/// Marker line identifying a hook we wrote. A hook carrying this line is
/// refreshed in place without --force; any other hook is foreign.
const HOOK_MARKER: &str = "# installed by airules";

const HOOK_SCRIPT: &str = "#!/bin/sh\n\
# installed by airules\n\
# Blocks commits that stage secret material.\n\
exec airules scan --staged\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    Refreshed,
    Replaced,
}

/// Install the pre-commit hook under `.git/hooks/`.
///
/// Fails when the repo has no `.git` directory. A foreign hook is preserved
/// unless `force` is set; our own hook is silently rewritten so upgrades
/// pick up script changes.
pub fn install(root: &Path, force: bool) -> Result<InstallOutcome> {
    let git = paths::git_dir(root);
    if !git.is_dir() {
        return Err(AirulesError::GitDirMissing(git));
    }

    let hook = paths::pre_commit_hook_path(root);
    let outcome = if hook.exists() {
        let existing = std::fs::read_to_string(&hook)?;
        if existing.contains(HOOK_MARKER) {
            InstallOutcome::Refreshed
        } else if force {
            InstallOutcome::Replaced
        } else {
            return Err(AirulesError::HookExists(hook));
        }
    } else {
        InstallOutcome::Installed
    };

    io::ensure_dir(&paths::hooks_dir(root))?;
    io::atomic_write(&hook, HOOK_SCRIPT.as_bytes())?;
    io::mark_executable(&hook)?;
    Ok(outcome)
}

/// True when the installed pre-commit hook is one of ours.
pub fn is_installed(root: &Path) -> bool {
    let hook = paths::pre_commit_hook_path(root);
    std::fs::read_to_string(hook)
        .map(|s| s.contains(HOOK_MARKER))
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
