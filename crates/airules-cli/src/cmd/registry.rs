use crate::output::{print_json, print_table};
use airules_core::registry::Registry;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum RegistrySubcommand {
    /// List all registered rule files
    List,
}

pub fn run(root: &Path, subcommand: RegistrySubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        RegistrySubcommand::List => list(root, json),
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let registry = Registry::load(root).context("failed to load registry")?;

    if json {
        print_json(&registry.rules)?;
        return Ok(());
    }

    if registry.rules.is_empty() {
        println!("No rules registered.");
        return Ok(());
    }

    let rows = registry
        .rules
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                r.path.clone(),
                r.version.clone().unwrap_or_default(),
                r.flags.join(","),
                r.tags.join(","),
            ]
        })
        .collect();
    print_table(&["ID", "PATH", "VERSION", "FLAGS", "TAGS"], rows);
    Ok(())
}
