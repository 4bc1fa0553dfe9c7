use crate::output::print_json;
use airules_core::registry::verify;
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let report = verify(root).context("registry verification failed")?;

    if json {
        print_json(&report)?;
    } else {
        println!("ok: {} rule(s) verified", report.checked);
    }
    Ok(())
}
