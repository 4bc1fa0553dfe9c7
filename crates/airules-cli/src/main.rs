mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{registry::RegistrySubcommand, state::StateSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "airules",
    about = "Convention scaffold for AI-assisted repositories — canonical logs, rule registry, sync, and secret scanning",
    version,
    propagate_version = true
)]
struct Cli {
    /// Repository root (default: auto-detect from .ai_state, rules/registry.yaml, or .git/)
    #[arg(long, global = true, env = "AIRULES_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the canonical logs, session state, and rule registry
    Init,

    /// Verify every registry entry exists and carries a front-matter marker
    Verify,

    /// Inspect the rule registry
    Registry {
        #[command(subcommand)]
        subcommand: RegistrySubcommand,
    },

    /// Mirror the rules tree and AGENTS.md from a source checkout
    Sync {
        /// Source directory to mirror from
        source: PathBuf,

        /// Perform the planned copies and updates (default is dry-run)
        #[arg(long)]
        apply: bool,

        /// Also remove destination files absent from the source
        #[arg(long)]
        delete: bool,
    },

    /// Manage git hooks
    Hooks {
        #[command(subcommand)]
        subcommand: cmd::hooks::HooksSubcommand,
    },

    /// Scan for secrets (used by the pre-commit hook)
    Scan {
        /// Scan only files staged for commit
        #[arg(long)]
        staged: bool,

        /// Paths to scan (default: whole tree)
        paths: Vec<PathBuf>,
    },

    /// Show or update the session state
    State {
        #[command(subcommand)]
        subcommand: Option<StateSubcommand>,
    },

    /// Append a dated entry to a canonical log
    Log {
        /// Log kind: decision, lesson, or consideration
        kind: String,

        /// Entry title, becomes the `## date: title` heading
        title: String,

        /// Optional body text below the heading
        #[arg(long)]
        body: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Verify => cmd::verify::run(&root, cli.json),
        Commands::Registry { subcommand } => cmd::registry::run(&root, subcommand, cli.json),
        Commands::Sync {
            source,
            apply,
            delete,
        } => cmd::sync::run(&root, &source, apply, delete, cli.json),
        Commands::Hooks { subcommand } => cmd::hooks::run(&root, subcommand),
        Commands::Scan { staged, paths } => cmd::scan::run(&root, staged, &paths, cli.json),
        Commands::State { subcommand } => cmd::state::run(&root, subcommand, cli.json),
        Commands::Log { kind, title, body } => {
            cmd::log::run(&root, &kind, &title, body.as_deref())
        }
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
