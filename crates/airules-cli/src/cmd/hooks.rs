use airules_core::hook::{self, InstallOutcome};
use airules_core::paths;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum HooksSubcommand {
    /// Install the pre-commit secret-scan hook
    Install {
        /// Replace an existing hook not written by airules
        #[arg(long)]
        force: bool,
    },
}

pub fn run(root: &Path, subcommand: HooksSubcommand) -> anyhow::Result<()> {
    match subcommand {
        HooksSubcommand::Install { force } => {
            let outcome = hook::install(root, force).context("failed to install hook")?;
            let verb = match outcome {
                InstallOutcome::Installed => "installed",
                InstallOutcome::Refreshed => "refreshed",
                InstallOutcome::Replaced => "replaced",
            };
            println!("{verb}: {}", paths::PRE_COMMIT_HOOK);
            Ok(())
        }
    }
}
