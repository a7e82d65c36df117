//! Salesboard - main entry point.
//!
//! Loads configuration, registers the sample collections, and runs one
//! subcommand against them.

mod chat;
mod commands;
mod error;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use salesboard_core::{AppConfig, CollectionKind};
use salesboard_query::{samples, QueryEngine};

use crate::commands::{Context, ListArgs};
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "salesboard", about = "Sales dashboard over the built-in sample data")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List records, optionally filtered
    List {
        #[arg(long, short)]
        kind: Option<CollectionKind>,
        /// Case-insensitive search term
        #[arg(long, short)]
        search: Option<String>,
        /// Exact status ("All" for no constraint)
        #[arg(long)]
        status: Option<String>,
        /// First day (YYYY-MM-DD) of the date range
        #[arg(long)]
        from: Option<String>,
        /// Last day (YYYY-MM-DD) of the date range
        #[arg(long)]
        to: Option<String>,
    },
    /// Search by relevance on the title field
    Rank {
        term: String,
        #[arg(long, short)]
        kind: Option<CollectionKind>,
    },
    /// Count, sum and mean of a numeric field
    Summary {
        field: String,
        #[arg(long, short)]
        kind: Option<CollectionKind>,
    },
    /// Dashboard headline numbers
    Report,
    /// Records with the highest value of a numeric field
    Top {
        field: String,
        #[arg(long, short)]
        kind: Option<CollectionKind>,
        #[arg(long, short = 'n')]
        limit: Option<usize>,
        /// Include inactive records
        #[arg(long)]
        all: bool,
    },
    /// Count of records per value of a field
    Distribution {
        #[arg(long, short)]
        kind: Option<CollectionKind>,
        /// Field to count (defaults to the status field)
        #[arg(long)]
        field: Option<String>,
    },
    /// Talk to the assistant; reads stdin when no message is given
    Chat {
        message: Vec<String>,
        /// Reply without the typing delay
        #[arg(long)]
        no_delay: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig, CliError> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    Ok(config)
}

fn create_engine() -> Result<QueryEngine, CliError> {
    let registry = samples::registry()?;
    tracing::info!("Registered {} sample collections", registry.count());
    Ok(QueryEngine::new(Arc::new(registry)))
}

fn run(cli: Cli) -> Result<String, CliError> {
    let ctx = Context {
        engine: create_engine()?,
        config: load_config(cli.config.as_ref())?,
        json: cli.json,
    };

    match cli.command {
        Command::List {
            kind,
            search,
            status,
            from,
            to,
        } => commands::list(
            &ctx,
            ListArgs {
                kind,
                search,
                status,
                from,
                to,
            },
        ),
        Command::Rank { term, kind } => commands::rank(&ctx, kind, &term),
        Command::Summary { field, kind } => commands::summary(&ctx, kind, &field),
        Command::Report => commands::report(&ctx),
        Command::Top {
            field,
            kind,
            limit,
            all,
        } => commands::top(&ctx, kind, &field, limit, all),
        Command::Distribution { kind, field } => {
            commands::distribution(&ctx, kind, field.as_deref())
        }
        Command::Chat { message, no_delay } => {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            rt.block_on(chat::run(&ctx.config.chat, message, no_delay))
        }
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
