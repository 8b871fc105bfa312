mod commands;
mod envelope;
mod http;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vedaq")]
#[command(author, version, about = "Adaptive confidence filtering for Rig Veda semantic search")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Ranker configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank and filter saved search results
    Rank {
        /// JSON file with backend results
        file: PathBuf,

        /// Search query (default: the `query` field of the file)
        #[arg(short, long)]
        query: Option<String>,

        /// Print the response envelope as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show randomly selected verses without filtering
    Explore {
        /// JSON file with backend results
        file: PathBuf,

        /// Print the response envelope as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Allowed CORS origin (default: any)
        #[arg(long)]
        cors_origin: Option<String>,
    },
}

fn init_logging(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Rank { file, query, json } => commands::rank(&file, query, cli.config, json),
        Commands::Explore { file, json } => commands::explore(&file, cli.config, json),
        Commands::Serve { port, cors_origin } => {
            commands::serve(cli.config, port, cors_origin).await
        }
    }
}
