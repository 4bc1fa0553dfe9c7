use airules_core::logs::{ensure_log, LogKind};
use airules_core::registry::Registry;
use airules_core::state::SessionState;
use airules_core::{io, paths};
use anyhow::Context;
use std::path::Path;

/// Bootstrap the repository: canonical logs, session state, rule registry.
/// Idempotent — every artifact is created only if missing.
pub fn run(root: &Path) -> anyhow::Result<()> {
    for kind in LogKind::all() {
        let created = ensure_log(root, kind)
            .with_context(|| format!("failed to create {}", kind.filename()))?;
        report(created, kind.filename());
    }

    let seeded = SessionState::seed(root).context("failed to seed session state")?;
    report(seeded, paths::STATE_FILE);

    io::ensure_dir(&paths::rules_dir(root)).context("failed to create rules directory")?;
    let registry_path = paths::registry_path(root);
    if registry_path.exists() {
        report(false, paths::REGISTRY_FILE);
    } else {
        Registry::default()
            .save(root)
            .context("failed to create rule registry")?;
        report(true, paths::REGISTRY_FILE);
    }

    Ok(())
}

fn report(created: bool, name: &str) {
    if created {
        println!("created: {name}");
    } else {
        println!("exists:  {name}");
    }
}
