use crate::error::Result;
use crate::io;
use crate::paths;
use chrono::Utc;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Canonical Markdown logs
// ---------------------------------------------------------------------------

/// The three append-only Markdown logs at the repository root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Decision,
    Lesson,
    Consideration,
}

impl LogKind {
    pub fn all() -> [LogKind; 3] {
        [LogKind::Decision, LogKind::Lesson, LogKind::Consideration]
    }

    pub fn filename(&self) -> &'static str {
        match self {
            LogKind::Decision => paths::DECISIONS_MD,
            LogKind::Lesson => paths::LESSONS_MD,
            LogKind::Consideration => paths::CONSIDERATIONS_MD,
        }
    }

    pub fn seed_header(&self) -> &'static str {
        match self {
            LogKind::Decision => "# Project Decisions\n\nArchitectural and product decisions, newest last.\n",
            LogKind::Lesson => "# Lessons Learned\n\nThings that went wrong and what we changed, newest last.\n",
            LogKind::Consideration => "# Future Considerations\n\nDeferred ideas and follow-ups, newest last.\n",
        }
    }

    pub fn path(&self, root: &Path) -> PathBuf {
        root.join(self.filename())
    }
}

impl std::str::FromStr for LogKind {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s {
            "decision" => Ok(LogKind::Decision),
            "lesson" => Ok(LogKind::Lesson),
            "consideration" => Ok(LogKind::Consideration),
            other => Err(format!(
                "unknown log kind '{other}': expected decision, lesson, or consideration"
            )),
        }
    }
}

/// Create the log file with its H1 seed if missing. Returns true if created.
pub fn ensure_log(root: &Path, kind: LogKind) -> Result<bool> {
    io::write_if_missing(&kind.path(root), kind.seed_header().as_bytes())
}

/// Append a dated `## YYYY-MM-DD: <title>` section to a canonical log.
///
/// The file is created with its seed header first if absent. Existing
/// content is never rewritten; the only write mode is append.
pub fn append_entry(root: &Path, kind: LogKind, title: &str, body: Option<&str>) -> Result<()> {
    ensure_log(root, kind)?;
    let date = Utc::now().format("%Y-%m-%d");
    let mut entry = format!("\n## {date}: {title}\n");
    if let Some(body) = body {
        entry.push('\n');
        entry.push_str(body.trim_end());
        entry.push('\n');
    }
    io::append_text(&kind.path(root), &entry)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ensure_log_seeds_once() {
        let dir = TempDir::new().unwrap();
        assert!(ensure_log(dir.path(), LogKind::Decision).unwrap());
        assert!(!ensure_log(dir.path(), LogKind::Decision).unwrap());

        let content =
            std::fs::read_to_string(dir.path().join("PROJECT_DECISIONS.md")).unwrap();
        assert!(content.starts_with("# Project Decisions"));
    }

    #[test]
    fn append_entry_creates_and_appends() {
        let dir = TempDir::new().unwrap();
        append_entry(dir.path(), LogKind::Lesson, "Flaky CI", Some("Pinned the runner image."))
            .unwrap();
        append_entry(dir.path(), LogKind::Lesson, "Slow builds", None).unwrap();

        let content = std::fs::read_to_string(dir.path().join("LESSONS_LEARNED.md")).unwrap();
        assert!(content.starts_with("# Lessons Learned"));
        assert!(content.contains(": Flaky CI"));
        assert!(content.contains("Pinned the runner image."));
        assert!(content.contains(": Slow builds"));
        // Both entries present, seed header only once
        assert_eq!(content.matches("# Lessons Learned").count(), 1);
    }

    #[test]
    fn append_never_truncates_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("FUTURE_CONSIDERATIONS.md");
        std::fs::write(&path, "# My own header\n\n## Old entry\n").unwrap();

        append_entry(dir.path(), LogKind::Consideration, "New idea", None).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# My own header"));
        assert!(content.contains("## Old entry"));
        assert!(content.contains(": New idea"));
    }

    #[test]
    fn log_kind_from_str() {
        assert_eq!("decision".parse::<LogKind>().unwrap(), LogKind::Decision);
        assert_eq!("lesson".parse::<LogKind>().unwrap(), LogKind::Lesson);
        assert!("journal".parse::<LogKind>().is_err());
    }
}
