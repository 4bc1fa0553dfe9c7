use crate::error::{AirulesError, Result};
use crate::io;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How many leading lines of a rule file are searched for a header marker.
const MARKER_WINDOW: usize = 10;

// ---------------------------------------------------------------------------
// Registry types
// ---------------------------------------------------------------------------

/// One rule file tracked by `rules/registry.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEntry {
    pub path: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Registry {
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

impl Registry {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::registry_path(root);
        if !path.exists() {
            return Err(AirulesError::RegistryNotFound(path));
        }
        let data = std::fs::read_to_string(&path)?;
        let registry: Registry = serde_yaml::from_str(&data)?;
        Ok(registry)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::registry_path(root);
        let data = serde_yaml::to_string(self)?;
        io::atomic_write(&path, data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Front matter
// ---------------------------------------------------------------------------

/// Optional YAML front-matter block at the top of a rule file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FrontMatter {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub globs: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// True when the first lines contain a recognizable header marker:
/// a `---` delimiter or a leading `id:` field.
pub fn has_marker(content: &str) -> bool {
    content
        .lines()
        .take(MARKER_WINDOW)
        .any(|line| line.trim_end() == "---" || line.starts_with("id:"))
}

/// Parse the leading `---` delimited front-matter block, if present.
pub fn parse_front_matter(content: &str) -> Result<Option<FrontMatter>> {
    let mut lines = content.lines();
    if lines.next().map(|l| l.trim_end()) != Some("---") {
        return Ok(None);
    }
    let mut block = String::new();
    for line in lines {
        if line.trim_end() == "---" {
            let fm: FrontMatter = serde_yaml::from_str(&block)?;
            return Ok(Some(fm));
        }
        block.push_str(line);
        block.push('\n');
    }
    // Opening delimiter without a closing one — not a front-matter block.
    Ok(None)
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub checked: usize,
}

/// Verify every registry entry in order: the file must exist and its first
/// lines must carry a header marker. Fails on the first violation.
///
/// One-shot and idempotent — no side effects, no retries.
pub fn verify(root: &Path) -> Result<VerifyReport> {
    let registry = Registry::load(root)?;
    for entry in &registry.rules {
        let file = root.join(&entry.path);
        if !file.exists() {
            return Err(AirulesError::RuleFileMissing {
                id: entry.id.clone(),
                path: entry.path.clone(),
            });
        }
        let content = std::fs::read_to_string(&file)?;
        if !has_marker(&content) {
            return Err(AirulesError::FrontMatterMissing {
                id: entry.id.clone(),
                path: entry.path.clone(),
            });
        }
    }
    Ok(VerifyReport {
        checked: registry.rules.len(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_registry(root: &Path, yaml: &str) {
        std::fs::create_dir_all(root.join("rules")).unwrap();
        std::fs::write(root.join("rules/registry.yaml"), yaml).unwrap();
    }

    fn write_rule(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn registry_roundtrip() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("rules")).unwrap();
        let registry = Registry {
            rules: vec![RuleEntry {
                path: "rules/core/assistant-rules.md".to_string(),
                id: "rules.core.assistant".to_string(),
                version: Some("1.2".to_string()),
                flags: vec!["always_apply".to_string()],
                tags: vec!["core".to_string()],
            }],
        };
        registry.save(dir.path()).unwrap();

        let loaded = Registry::load(dir.path()).unwrap();
        assert_eq!(loaded.rules.len(), 1);
        assert_eq!(loaded.rules[0].id, "rules.core.assistant");
        assert_eq!(loaded.rules[0].version.as_deref(), Some("1.2"));
    }

    #[test]
    fn registry_missing_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Registry::load(dir.path()),
            Err(AirulesError::RegistryNotFound(_))
        ));
    }

    #[test]
    fn marker_detection() {
        assert!(has_marker("---\nid: x\n---\nbody\n"));
        assert!(has_marker("id: rules.core.assistant\n\nbody\n"));
        assert!(!has_marker("# Just a heading\n\nprose\n"));
        // Marker beyond the window is not recognized
        let deep = format!("{}---\n", "line\n".repeat(MARKER_WINDOW));
        assert!(!has_marker(&deep));
    }

    #[test]
    fn front_matter_parses_fields() {
        let content = "---\nid: rules.core.assistant\nversion: \"1.2\"\ndescription: Core rules\nglobs:\n  - \"src/**\"\ntags: [core]\n---\n\n# Body\n";
        let fm = parse_front_matter(content).unwrap().unwrap();
        assert_eq!(fm.id.as_deref(), Some("rules.core.assistant"));
        assert_eq!(fm.version.as_deref(), Some("1.2"));
        assert_eq!(fm.globs, vec!["src/**"]);
        assert_eq!(fm.tags, vec!["core"]);
    }

    #[test]
    fn front_matter_absent_when_unclosed() {
        assert!(parse_front_matter("---\nid: x\nno closing\n")
            .unwrap()
            .is_none());
        assert!(parse_front_matter("# heading\n").unwrap().is_none());
    }

    #[test]
    fn verify_passes_when_all_present() {
        let dir = TempDir::new().unwrap();
        write_registry(
            dir.path(),
            "rules:\n  - path: rules/core/a.md\n    id: rules.core.a\n  - path: rules/core/b.md\n    id: rules.core.b\n",
        );
        write_rule(dir.path(), "rules/core/a.md", "---\nid: rules.core.a\n---\nbody\n");
        write_rule(dir.path(), "rules/core/b.md", "id: rules.core.b\n\nbody\n");

        let report = verify(dir.path()).unwrap();
        assert_eq!(report.checked, 2);
    }

    #[test]
    fn verify_fails_on_first_missing_file() {
        let dir = TempDir::new().unwrap();
        write_registry(
            dir.path(),
            "rules:\n  - path: rules/core/assistant-rules.md\n    id: rules.core.assistant\n",
        );
        // File deliberately not written
        let err = verify(dir.path()).unwrap_err();
        match err {
            AirulesError::RuleFileMissing { id, path } => {
                assert_eq!(id, "rules.core.assistant");
                assert_eq!(path, "rules/core/assistant-rules.md");
            }
            other => panic!("expected RuleFileMissing, got {other:?}"),
        }
    }

    #[test]
    fn verify_fails_on_missing_marker() {
        let dir = TempDir::new().unwrap();
        write_registry(
            dir.path(),
            "rules:\n  - path: rules/core/a.md\n    id: rules.core.a\n",
        );
        write_rule(dir.path(), "rules/core/a.md", "# No front matter here\n");

        assert!(matches!(
            verify(dir.path()),
            Err(AirulesError::FrontMatterMissing { .. })
        ));
    }

    #[test]
    fn verify_reports_first_violation_in_order() {
        let dir = TempDir::new().unwrap();
        write_registry(
            dir.path(),
            "rules:\n  - path: rules/a.md\n    id: rules.a\n  - path: rules/b.md\n    id: rules.b\n",
        );
        // Both violate; the first in registry order must win.
        write_rule(dir.path(), "rules/b.md", "no marker\n");
        let err = verify(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            AirulesError::RuleFileMissing { ref id, .. } if id == "rules.a"
        ));
    }

    #[test]
    fn verify_empty_registry_succeeds() {
        let dir = TempDir::new().unwrap();
        write_registry(dir.path(), "rules: []\n");
        assert_eq!(verify(dir.path()).unwrap().checked, 0);
    }
}
