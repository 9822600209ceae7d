//! Terminal front end for the CEFR vocabulary trainer.

use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use services::{TrainerService, load_catalog};
use storage::repository::Storage;
use vocab_core::model::Level;

mod commands;
mod config;
mod console;
mod logging;

use console::Console;

#[derive(Parser)]
#[command(name = "vocab", version, about = "Learn English words level by level")]
struct Cli {
    /// SQLite database holding learner progress
    #[arg(long, global = true, env = "VOCAB_DB_URL", default_value = config::DEFAULT_DB_URL)]
    db: String,

    /// Word catalog JSON file
    #[arg(long, global = true, env = "VOCAB_CATALOG", default_value = config::DEFAULT_CATALOG)]
    catalog: PathBuf,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, env = "VOCAB_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show known and review counts plus per-level progress
    Stats,

    /// List every level with its completion percentage
    Levels,

    /// Learn unknown words at the current level
    Learn,

    /// Review every word of one level in random order
    Practice {
        /// Level to practice (A1, A2, B1, B2, C1, C2)
        #[arg(long)]
        level: Level,

        /// Seed for a reproducible word order
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Erase all progress
    Reset {
        /// Skip the confirmation prompts
        #[arg(long)]
        yes: bool,
    },
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let catalog = load_catalog(&cli.catalog)
        .context("Error loading word data. Please check if the catalog file exists.")?;

    let db_url = config::normalize_sqlite_url(&cli.db);
    config::prepare_sqlite_file(&db_url)?;
    let storage = Storage::sqlite(&db_url)
        .await
        .with_context(|| format!("failed to open progress database {db_url}"))?;

    let mut trainer = TrainerService::open(Arc::new(catalog), storage.kv)
        .await
        .context("failed to save refreshed progress")?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    match cli.command {
        Commands::Stats => commands::stats::execute(&trainer, &mut console),
        Commands::Levels => commands::levels::execute(&trainer, &mut console),
        Commands::Learn => commands::learn::execute(&mut trainer, &mut console).await,
        Commands::Practice { level, seed } => {
            commands::practice::execute(&mut trainer, &mut console, level, seed).await
        }
        Commands::Reset { yes } => commands::reset::execute(&mut trainer, &mut console, yes).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
