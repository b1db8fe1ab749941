//! # rulebook
//!
//! Command-line entry point: compile agent documents from rule files, list
//! the buildable agents, or regenerate the docs tree.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rulebook_compiler::{BuildReport, available_agents, build_agent, build_all};
use rulebook_core::logging::{init_subscriber, level_for_verbosity};
use rulebook_docs::sync_docs;
use rulebook_settings::{RulebookSettings, load_settings};
use tracing::debug;

/// Agent rulebook compiler.
#[derive(Parser, Debug)]
#[command(name = "rulebook", about = "Compile agent rulebooks and sync docs", version)]
struct Cli {
    /// Repository root; defaults to the current directory.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Log at debug level (overrides the configured level, not `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Compile one agent, or every agent with `--all`.
    Build {
        /// Agent to build.
        agent: Option<String>,

        /// Build every available agent.
        #[arg(long, conflicts_with = "agent")]
        all: bool,
    },
    /// List the buildable agents.
    List,
    /// Regenerate the skills and agents docs trees.
    SyncDocs,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Execute a parsed command line. `Ok(false)` is a reported failure.
async fn run(cli: Cli) -> Result<bool> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("failed to resolve current directory")?,
    };
    let settings = load_settings(&root)
        .with_context(|| format!("failed to load settings under {}", root.display()))?;
    init_subscriber(&level_for_verbosity(cli.verbose, &settings.logging.level));
    debug!(root = %root.display(), "settings loaded");

    match cli.command {
        Command::Build {
            agent: Some(agent), ..
        } => {
            let report = build_agent(&settings, &agent)
                .await
                .with_context(|| format!("failed to build agent '{agent}'"))?;
            print_report(&report);
            Ok(true)
        }
        Command::Build { all: true, .. } => Ok(build_every(&settings).await),
        Command::Build { .. } => {
            eprint!("{}", usage(&settings));
            Ok(false)
        }
        Command::List => {
            for agent in available_agents(&settings) {
                println!("{agent}");
            }
            Ok(true)
        }
        Command::SyncDocs => {
            let owned = settings.clone();
            let report = tokio::task::spawn_blocking(move || sync_docs(&owned))
                .await
                .context("docs sync task failed")?
                .context("failed to sync docs")?;
            println!(
                "synced {} skills ({} rules) and {} agents into {}",
                report.skills,
                report.skill_rules,
                report.agents,
                report.output_root.display()
            );
            Ok(true)
        }
    }
}

async fn build_every(settings: &RulebookSettings) -> bool {
    let mut failed = 0usize;
    for (agent, result) in build_all(settings).await {
        match result {
            Ok(report) => print_report(&report),
            Err(e) => {
                failed += 1;
                eprintln!("error: failed to build agent '{agent}': {e}");
            }
        }
    }
    failed == 0
}

fn print_report(report: &BuildReport) {
    println!(
        "built {}: {} rules in {} sections -> {}",
        report.agent,
        report.rule_count,
        report.section_count,
        report.output_path.display()
    );
    for failure in &report.failures {
        eprintln!("  skipped {}: {}", failure.file.display(), failure.error);
    }
}

fn usage(settings: &RulebookSettings) -> String {
    let mut out = String::from("usage: rulebook build <AGENT>\n       rulebook build --all\n\navailable agents:\n");
    for agent in available_agents(settings) {
        out.push_str("  ");
        out.push_str(&agent);
        out.push('\n');
    }
    out
}
