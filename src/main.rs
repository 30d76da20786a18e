//! # `folio` CLI
//!
//! Command-line front end for the portfolio chatbot.
//!
//! ## Usage
//!
//! ```bash
//! folio --config ./config/folio.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `folio ask "<question>"` | Answer one question and print the reply |
//! | `folio rank "<query>"` | Show which documents would ground an answer |
//! | `folio sources` | Show the active responder and document load status |
//! | `folio serve` | Start the JSON HTTP endpoint for the site |
//!
//! Without `--config`, `./config/folio.toml` is used when it exists and the
//! built-in defaults otherwise (canned answers only unless `FOLIO_API_KEY`
//! is set).

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use portfolio_chat::config::{self, Config};
use portfolio_chat::{logging, responder, search, server, sources};

const DEFAULT_CONFIG: &str = "./config/folio.toml";

/// Portfolio chatbot: answers questions about a CV, grounded on its
/// documents, with a canned fallback.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/folio.toml` if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at `info` instead of `warn` (`RUST_LOG` overrides both).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a question.
    Ask {
        /// The visitor's question.
        question: String,

        /// Print which path produced the answer (completion, canned, apology).
        #[arg(long)]
        origin: bool,
    },

    /// Rank the configured documents against a query.
    Rank {
        query: String,

        /// Also print the joined context that would be sent.
        #[arg(long)]
        context: bool,
    },

    /// Show the active responder and document status.
    Sources,

    /// Start the HTTP server.
    Serve,
}

fn resolve_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(p) => config::load_config(p),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG);
            if default_path.exists() {
                config::load_config(default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(if cli.verbose { "info" } else { "warn" });

    let cfg = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Ask { question, origin } => {
            responder::run_ask(&cfg, &question, origin).await?;
        }
        Commands::Rank { query, context } => {
            search::run_rank(&cfg, &query, context).await?;
        }
        Commands::Sources => {
            sources::list_sources(&cfg).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
