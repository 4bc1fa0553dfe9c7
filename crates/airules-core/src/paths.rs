use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Canonical file constants
// ---------------------------------------------------------------------------

pub const STATE_FILE: &str = ".ai_state";
pub const DECISIONS_MD: &str = "PROJECT_DECISIONS.md";
pub const LESSONS_MD: &str = "LESSONS_LEARNED.md";
pub const CONSIDERATIONS_MD: &str = "FUTURE_CONSIDERATIONS.md";

pub const RULES_DIR: &str = "rules";
pub const REGISTRY_FILE: &str = "rules/registry.yaml";

pub const AGENTS_MD: &str = "AGENTS.md";

pub const GIT_DIR: &str = ".git";
pub const HOOKS_DIR: &str = ".git/hooks";
pub const PRE_COMMIT_HOOK: &str = ".git/hooks/pre-commit";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn state_path(root: &Path) -> PathBuf {
    root.join(STATE_FILE)
}

pub fn registry_path(root: &Path) -> PathBuf {
    root.join(REGISTRY_FILE)
}

pub fn rules_dir(root: &Path) -> PathBuf {
    root.join(RULES_DIR)
}

pub fn hooks_dir(root: &Path) -> PathBuf {
    root.join(HOOKS_DIR)
}

pub fn pre_commit_hook_path(root: &Path) -> PathBuf {
    root.join(PRE_COMMIT_HOOK)
}

pub fn git_dir(root: &Path) -> PathBuf {
    root.join(GIT_DIR)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(state_path(root), PathBuf::from("/tmp/proj/.ai_state"));
        assert_eq!(
            registry_path(root),
            PathBuf::from("/tmp/proj/rules/registry.yaml")
        );
        assert_eq!(
            pre_commit_hook_path(root),
            PathBuf::from("/tmp/proj/.git/hooks/pre-commit")
        );
    }
}
