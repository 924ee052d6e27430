use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use transport_catalogue::{load_snapshot, save_snapshot, TransportRouter};

mod handler;
mod reader;
mod requests;

use handler::handle_requests;
use reader::build_catalogue;
use requests::{read_document, InputDocument};

#[derive(Parser, Debug)]
#[command(
    name = "transit",
    author,
    version,
    about = "Transport catalogue with fastest-route queries",
    long_about = "Builds a transport catalogue from JSON base requests and stores it, \
                  together with the precomputed router, in a snapshot file (make-base). \
                  A second run loads the snapshot and answers JSON stat requests \
                  (process-requests) without rebuilding anything."
)]
struct Args {
    /// Verbose output (show debug messages)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the catalogue and router and write the snapshot
    MakeBase {
        /// Input JSON document (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Load the snapshot and answer stat requests
    ProcessRequests {
        /// Input JSON document (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output JSON file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn make_base(document: &InputDocument) -> Result<()> {
    let settings = document
        .routing_settings
        .context("make-base requires routing_settings")?;

    let catalogue = build_catalogue(&document.base_requests)?;
    let router = TransportRouter::new(Arc::new(catalogue), settings)
        .context("Failed to build the router")?;

    let path = &document.serialization_settings.file;
    save_snapshot(path, &router)
        .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
    Ok(())
}

fn process_requests(document: &InputDocument) -> Result<Value> {
    let path = &document.serialization_settings.file;
    let router = load_snapshot(path)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))?;

    log::info!("Answering {} stat requests", document.stat_requests.len());
    Ok(handle_requests(&router, &document.stat_requests))
}

fn write_responses(responses: &Value, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            serde_json::to_writer_pretty(file, responses).context("Failed to write responses")?;
            log::info!("Wrote responses to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, responses)
                .context("Failed to write responses")?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    match args.command {
        Command::MakeBase { input } => {
            let document = read_document(input.as_deref())?;
            make_base(&document)
        }
        Command::ProcessRequests { input, output } => {
            let document = read_document(input.as_deref())?;
            let responses = process_requests(&document)?;
            write_responses(&responses, output.as_deref())
        }
    }
}
