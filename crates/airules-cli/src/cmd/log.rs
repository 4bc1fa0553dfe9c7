use airules_core::logs::{append_entry, LogKind};
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, kind: &str, title: &str, body: Option<&str>) -> anyhow::Result<()> {
    let kind: LogKind = kind.parse().map_err(anyhow::Error::msg)?;
    append_entry(root, kind, title, body)
        .with_context(|| format!("failed to append to {}", kind.filename()))?;
    println!("logged to {}: {title}", kind.filename());
    Ok(())
}
