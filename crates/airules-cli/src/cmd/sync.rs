use crate::output::print_json;
use airules_core::sync::{self, SyncAction};
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, source: &Path, apply: bool, delete: bool, json: bool) -> anyhow::Result<()> {
    let plan = sync::plan(source, root, delete).context("failed to plan sync")?;

    if json {
        print_json(&plan)?;
    } else {
        for action in &plan.actions {
            match action {
                SyncAction::Copy { path } => println!("+ copy   {path}"),
                SyncAction::Update { path } => println!("~ update {path}"),
                SyncAction::Delete { path } => println!("- delete {path}"),
            }
        }
        for path in &plan.kept {
            println!("  kept   {path}");
        }
        if plan.is_empty() {
            println!("Nothing to sync: destination is up to date.");
        }
    }

    if !apply {
        if !plan.is_empty() && !json {
            println!("(dry run — pass --apply to make these changes)");
        }
        return Ok(());
    }

    sync::apply(source, root, &plan).context("failed to apply sync plan")?;
    if !json {
        println!("applied {} action(s)", plan.actions.len());
    }
    Ok(())
}
