use crate::output::print_json;
use airules_core::scan;
use anyhow::Context;
use std::path::{Path, PathBuf};

pub fn run(root: &Path, staged: bool, paths: &[PathBuf], json: bool) -> anyhow::Result<()> {
    let report = scan::run(root, staged, paths).context("secret scan failed")?;

    if json {
        print_json(&report)?;
    } else {
        for finding in &report.findings {
            println!("{}:{} {}", finding.path, finding.line, finding.rule);
        }
        if report.is_clean() {
            println!("clean: no secrets found ({})", report.scanner);
        } else {
            eprintln!(
                "{} potential secret(s) found ({})",
                report.findings.len(),
                report.scanner
            );
        }
    }

    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}
