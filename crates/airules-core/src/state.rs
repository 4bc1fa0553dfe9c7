use crate::error::{AirulesError, Result};
use crate::io;
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The flat session record stored as JSON in `.ai_state` at the repo root.
///
/// History is append-preferred: mutations push onto the lists and the only
/// destructive rewrite is the atomic save of the whole record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default = "default_version")]
    pub version: u32,
    pub session_start: DateTime<Utc>,
    #[serde(default)]
    pub current_focus: String,
    #[serde(default)]
    pub modified_files: Vec<String>,
    #[serde(default)]
    pub pending_tasks: Vec<String>,
    #[serde(default)]
    pub completed: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub blockers: Vec<String>,
    pub last_checkpoint: DateTime<Utc>,
}

fn default_version() -> u32 {
    1
}

impl SessionState {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            version: 1,
            session_start: now,
            current_focus: String::new(),
            modified_files: Vec::new(),
            pending_tasks: Vec::new(),
            completed: Vec::new(),
            next_steps: Vec::new(),
            blockers: Vec::new(),
            last_checkpoint: now,
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::state_path(root);
        if !path.exists() {
            return Err(AirulesError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let state: SessionState = serde_json::from_str(&data)?;
        Ok(state)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::state_path(root);
        let data = serde_json::to_string_pretty(self)?;
        io::atomic_write(&path, data.as_bytes())
    }

    /// Seed `.ai_state` from the fixed template, only when the file is
    /// absent or effectively empty. A pre-existing non-empty state file is
    /// preserved byte-for-byte. Returns true if the seed was written.
    pub fn seed(root: &Path) -> Result<bool> {
        let path = paths::state_path(root);
        if !io::is_effectively_empty(&path)? {
            return Ok(false);
        }
        SessionState::new().save(root)?;
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    pub fn set_focus(&mut self, focus: &str) {
        self.current_focus = focus.to_string();
        self.last_checkpoint = Utc::now();
    }

    pub fn record_modified_file(&mut self, path: &str) {
        if !self.modified_files.iter().any(|f| f == path) {
            self.modified_files.push(path.to_string());
        }
        self.last_checkpoint = Utc::now();
    }

    pub fn add_task(&mut self, task: &str) {
        self.pending_tasks.push(task.to_string());
        self.last_checkpoint = Utc::now();
    }

    /// Move a pending task to `completed`. Matches on exact text.
    pub fn complete_task(&mut self, task: &str) -> Result<()> {
        let pos = self
            .pending_tasks
            .iter()
            .position(|t| t == task)
            .ok_or_else(|| AirulesError::TaskNotFound(task.to_string()))?;
        let done = self.pending_tasks.remove(pos);
        self.completed.push(done);
        self.last_checkpoint = Utc::now();
        Ok(())
    }

    pub fn add_blocker(&mut self, reason: &str) {
        self.blockers.push(reason.to_string());
        self.last_checkpoint = Utc::now();
    }

    pub fn clear_blockers(&mut self) {
        self.blockers.clear();
        self.last_checkpoint = Utc::now();
    }

    pub fn checkpoint(&mut self) {
        self.last_checkpoint = Utc::now();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn state_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut state = SessionState::new();
        state.set_focus("wire up auth");
        state.add_task("write login tests");
        state.save(dir.path()).unwrap();

        let loaded = SessionState::load(dir.path()).unwrap();
        assert_eq!(loaded.current_focus, "wire up auth");
        assert_eq!(loaded.pending_tasks, vec!["write login tests"]);
    }

    #[test]
    fn state_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            SessionState::load(dir.path()),
            Err(AirulesError::NotInitialized)
        ));
    }

    #[test]
    fn state_is_flat_json() {
        let dir = TempDir::new().unwrap();
        SessionState::new().save(dir.path()).unwrap();
        let raw = std::fs::read_to_string(dir.path().join(".ai_state")).unwrap();
        let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(v.get("session_start").is_some());
        assert!(v.get("current_focus").is_some());
        assert!(v.get("last_checkpoint").is_some());
    }

    #[test]
    fn seed_only_when_absent_or_empty() {
        let dir = TempDir::new().unwrap();
        assert!(SessionState::seed(dir.path()).unwrap());
        // Second seed is a no-op
        assert!(!SessionState::seed(dir.path()).unwrap());
    }

    #[test]
    fn seed_preserves_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".ai_state");
        let existing = "{\"version\":1,\"current_focus\":\"mine\"}";
        std::fs::write(&path, existing).unwrap();

        assert!(!SessionState::seed(dir.path()).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), existing);
    }

    #[test]
    fn seed_replaces_whitespace_only_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".ai_state"), "  \n").unwrap();
        assert!(SessionState::seed(dir.path()).unwrap());
        assert!(SessionState::load(dir.path()).is_ok());
    }

    #[test]
    fn complete_task_moves_to_completed() {
        let mut state = SessionState::new();
        state.add_task("a");
        state.add_task("b");
        state.complete_task("a").unwrap();
        assert_eq!(state.pending_tasks, vec!["b"]);
        assert_eq!(state.completed, vec!["a"]);
    }

    #[test]
    fn complete_missing_task_fails() {
        let mut state = SessionState::new();
        assert!(matches!(
            state.complete_task("ghost"),
            Err(AirulesError::TaskNotFound(_))
        ));
    }

    #[test]
    fn blockers_add_and_clear() {
        let mut state = SessionState::new();
        state.add_blocker("waiting on API keys");
        state.add_blocker("CI is red");
        assert_eq!(state.blockers.len(), 2);
        state.clear_blockers();
        assert!(state.blockers.is_empty());
    }

    #[test]
    fn every_mutation_stamps_checkpoint() {
        let past = DateTime::parse_from_rfc3339("2020-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let mutations: Vec<Box<dyn Fn(&mut SessionState)>> = vec![
            Box::new(|s| s.set_focus("x")),
            Box::new(|s| s.record_modified_file("src/lib.rs")),
            Box::new(|s| s.add_task("t")),
            Box::new(|s| s.complete_task("t").unwrap()),
            Box::new(|s| s.add_blocker("b")),
            Box::new(|s| s.clear_blockers()),
            Box::new(|s| s.checkpoint()),
        ];

        let mut state = SessionState::new();
        for mutation in &mutations {
            state.last_checkpoint = past;
            mutation(&mut state);
            assert!(state.last_checkpoint > past);
        }
    }

    #[test]
    fn modified_files_deduplicated() {
        let mut state = SessionState::new();
        state.record_modified_file("src/main.rs");
        state.record_modified_file("src/main.rs");
        assert_eq!(state.modified_files.len(), 1);
    }
}
