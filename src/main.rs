mod commands;
mod notice;
mod render;
mod tui;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hollowcal")]
#[command(about = "A calendar whose events live in a ledger-backed key-value contract")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect a wallet backend
    Connect {
        backend: String, // "arweave" or "ethereum"
    },
    /// Disconnect the active wallet
    Disconnect,
    /// Deploy a fresh data contract owned by the connected wallet
    Deploy,
    /// List the events stored on the contract
    Events,
    /// Create an event
    New {
        title: String,

        /// Start date/time (e.g. "2026-03-20T15:00", or "2026-03-20" for all-day)
        #[arg(short, long)]
        start: String,

        /// End date/time; defaults to an hour after start (a day for --all-day)
        #[arg(short, long)]
        end: Option<String>,

        /// All-day event
        #[arg(long)]
        all_day: bool,
    },
    /// Delete an event by id
    Delete {
        id: String,
    },
    /// Show connection and contract status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Connect { backend } => commands::connect::run(&backend).await,
        Commands::Disconnect => commands::disconnect::run().await,
        Commands::Deploy => commands::deploy::run().await,
        Commands::Events => commands::events::run().await,
        Commands::New {
            title,
            start,
            end,
            all_day,
        } => commands::new::run(title, &start, end.as_deref(), all_day).await,
        Commands::Delete { id } => commands::delete::run(&id).await,
        Commands::Status => commands::status::run().await,
    }
}
