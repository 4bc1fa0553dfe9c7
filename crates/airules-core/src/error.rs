use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AirulesError {
    #[error("not initialized: run 'airules init'")]
    NotInitialized,

    #[error("registry not found: {0}")]
    RegistryNotFound(PathBuf),

    #[error("rule file missing: {path} (id: {id})")]
    RuleFileMissing { id: String, path: String },

    #[error("no front-matter marker in {path} (id: {id}): expected '---' or 'id:' in the first lines")]
    FrontMatterMissing { id: String, path: String },

    #[error("sync source not found: {0}")]
    SyncSourceMissing(PathBuf),

    #[error("not a git repository: {0} does not exist")]
    GitDirMissing(PathBuf),

    #[error("pre-commit hook already exists at {0}: use --force to replace it")]
    HookExists(PathBuf),

    #[error("secret scanner failed: {0}")]
    ScannerFailed(String),

    #[error("pending task not found: {0}")]
    TaskNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AirulesError>;
