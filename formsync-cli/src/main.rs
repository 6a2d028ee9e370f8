//! formsync - keep stored forms in step with their provider schemas.
//!
//! Usage:
//!   formsync --store forms/ --schemas schemas/ sync 42 --preview
//!   formsync --store forms/ --schemas schemas/ sync-all
//!
//! Schemas are read from `<schemas>/<type>/<itemId>.json`; forms are one
//! `<formId>.json` file each under `<store>`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use formsync_cli::{load_config, open_orchestrator, run_diff, run_sync, run_sync_all};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "formsync")]
#[command(about = "Reconcile stored form fields with provider schemas")]
struct Args {
    /// Directory holding one JSON file per form
    #[arg(short, long)]
    store: PathBuf,

    /// Directory of cached provider schemas
    #[arg(long)]
    schemas: PathBuf,

    /// JSON config file (partial configs are merged over the defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sync one form and print the report
    Sync {
        form_id: String,
        /// Compute the result without writing it
        #[arg(long)]
        preview: bool,
    },
    /// Sync the given forms, or every bound form
    SyncAll { form_ids: Vec<String> },
    /// Show what a sync would change
    Diff { form_id: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = load_config(args.config.as_deref())?;
    let orchestrator = open_orchestrator(&args.store, &args.schemas, config)?;

    let outcome = match args.command {
        Command::Sync { form_id, preview } => run_sync(&orchestrator, &form_id, preview).await?,
        Command::SyncAll { form_ids } => run_sync_all(&orchestrator, form_ids).await?,
        Command::Diff { form_id } => run_diff(&orchestrator, &form_id).await?,
    };

    println!("{}", serde_json::to_string_pretty(&outcome.output)?);
    Ok(if outcome.success { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
