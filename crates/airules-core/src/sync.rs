use crate::error::{AirulesError, Result};
use crate::io;
use crate::paths;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Mirror set
// ---------------------------------------------------------------------------

/// Top-level files mirrored alongside the rules tree.
pub const NAMED_FILES: [&str; 1] = [paths::AGENTS_MD];

// ---------------------------------------------------------------------------
// Plan types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SyncAction {
    /// File exists in the source but not the destination.
    Copy { path: String },
    /// File exists in both but the content differs.
    Update { path: String },
    /// File exists only in the destination (emitted only in delete mode).
    Delete { path: String },
}

impl SyncAction {
    pub fn path(&self) -> &str {
        match self {
            SyncAction::Copy { path } | SyncAction::Update { path } | SyncAction::Delete { path } => {
                path
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncPlan {
    pub actions: Vec<SyncAction>,
    /// Destination-only files that survive because delete mode is off.
    pub kept: Vec<String>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Compute the one-way mirror plan from `source` into `root`.
///
/// Pure read: neither tree is mutated. The mirrored set is the `rules/`
/// subtree plus the named top-level files. In delete mode, destination-only
/// files become `Delete` actions; otherwise they are listed as kept.
pub fn plan(source: &Path, root: &Path, delete: bool) -> Result<SyncPlan> {
    if !source.is_dir() {
        return Err(AirulesError::SyncSourceMissing(source.to_path_buf()));
    }

    let src_files = mirror_set(source)?;
    let dst_files = mirror_set(root)?;

    let mut actions = Vec::new();
    let mut kept = Vec::new();

    for rel in &src_files {
        let s = source.join(rel);
        let d = root.join(rel);
        if !d.exists() {
            actions.push(SyncAction::Copy { path: rel.clone() });
        } else if std::fs::read(&s)? != std::fs::read(&d)? {
            actions.push(SyncAction::Update { path: rel.clone() });
        }
    }

    for rel in dst_files.difference(&src_files) {
        if delete {
            actions.push(SyncAction::Delete { path: rel.clone() });
        } else {
            kept.push(rel.clone());
        }
    }

    Ok(SyncPlan { actions, kept })
}

/// Execute a previously computed plan. Copies are atomic writes; deletes
/// remove only files the plan named.
pub fn apply(source: &Path, root: &Path, plan: &SyncPlan) -> Result<()> {
    for action in &plan.actions {
        match action {
            SyncAction::Copy { path } | SyncAction::Update { path } => {
                let data = std::fs::read(source.join(path))?;
                io::atomic_write(&root.join(path), &data)?;
            }
            SyncAction::Delete { path } => {
                std::fs::remove_file(root.join(path))?;
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Walking
// ---------------------------------------------------------------------------

/// Relative paths of every file in the mirrored set under `base`.
/// BTreeSet keeps plans in stable path order.
fn mirror_set(base: &Path) -> Result<BTreeSet<String>> {
    let mut files = BTreeSet::new();
    let rules = base.join(paths::RULES_DIR);
    if rules.is_dir() {
        collect_files(&rules, Path::new(paths::RULES_DIR), &mut files)?;
    }
    for name in NAMED_FILES {
        if base.join(name).is_file() {
            files.insert(name.to_string());
        }
    }
    Ok(files)
}

fn collect_files(dir: &Path, rel: &Path, out: &mut BTreeSet<String>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = PathBuf::from(entry.file_name());
        let child_rel = rel.join(&name);
        let ty = entry.file_type()?;
        if ty.is_dir() {
            collect_files(&entry.path(), &child_rel, out)?;
        } else if ty.is_file() {
            out.insert(child_rel.to_string_lossy().into_owned());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
