use crate::output::print_json;
use airules_core::state::SessionState;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum StateSubcommand {
    /// Show the current session state (default)
    Show,

    /// Set the current focus line
    Focus { text: String },

    /// Stamp the checkpoint time
    Checkpoint,

    /// Record a blocker
    Block { reason: String },

    /// Clear all blockers
    Unblock,

    /// Manage pending tasks
    Task {
        #[command(subcommand)]
        subcommand: TaskSubcommand,
    },
}

#[derive(Subcommand)]
pub enum TaskSubcommand {
    /// Add a pending task
    Add { text: String },

    /// Mark a pending task done (matches exact text)
    Done { text: String },
}

pub fn run(root: &Path, subcommand: Option<StateSubcommand>, json: bool) -> anyhow::Result<()> {
    match subcommand.unwrap_or(StateSubcommand::Show) {
        StateSubcommand::Show => show(root, json),
        StateSubcommand::Focus { text } => {
            mutate(root, |s| {
                s.set_focus(&text);
                Ok(())
            })?;
            println!("focus: {text}");
            Ok(())
        }
        StateSubcommand::Checkpoint => {
            mutate(root, |s| {
                s.checkpoint();
                Ok(())
            })?;
            println!("checkpoint updated");
            Ok(())
        }
        StateSubcommand::Block { reason } => {
            mutate(root, |s| {
                s.add_blocker(&reason);
                Ok(())
            })?;
            println!("blocked: {reason}");
            Ok(())
        }
        StateSubcommand::Unblock => {
            mutate(root, |s| {
                s.clear_blockers();
                Ok(())
            })?;
            println!("blockers cleared");
            Ok(())
        }
        StateSubcommand::Task { subcommand } => match subcommand {
            TaskSubcommand::Add { text } => {
                mutate(root, |s| {
                    s.add_task(&text);
                    Ok(())
                })?;
                println!("task added: {text}");
                Ok(())
            }
            TaskSubcommand::Done { text } => {
                mutate(root, |s| s.complete_task(&text).map_err(Into::into))?;
                println!("task done: {text}");
                Ok(())
            }
        },
    }
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let state = SessionState::load(root).context("failed to load session state")?;

    if json {
        print_json(&state)?;
        return Ok(());
    }

    println!("focus:      {}", or_dash(&state.current_focus));
    println!("started:    {}", state.session_start.format("%Y-%m-%d %H:%M UTC"));
    println!("checkpoint: {}", state.last_checkpoint.format("%Y-%m-%d %H:%M UTC"));
    print_list("pending", &state.pending_tasks);
    print_list("completed", &state.completed);
    print_list("next steps", &state.next_steps);
    print_list("blockers", &state.blockers);
    print_list("modified", &state.modified_files);
    Ok(())
}

fn mutate<F>(root: &Path, f: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut SessionState) -> anyhow::Result<()>,
{
    let mut state = SessionState::load(root).context("failed to load session state")?;
    f(&mut state)?;
    state.save(root).context("failed to save session state")?;
    Ok(())
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

fn print_list(label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{label}:");
    for item in items {
        println!("  - {item}");
    }
}
