//! BookVerse CLI - Browse the catalog and shop from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List every book, or narrow the listing
//! bookverse books list
//! bookverse books list --search tolkien
//! bookverse books list --genre "science fiction"
//!
//! # Show one book
//! bookverse books show 3
//!
//! # Which deployment slot is live, and is it healthy?
//! bookverse status
//!
//! # Interactive shopping session
//! bookverse shop
//! ```
//!
//! # Commands
//!
//! - `books list` / `books show` - Read the catalog
//! - `status` - One-shot deployment banner and health line
//! - `shop` - Interactive cart session with a live deployment banner
//!
//! The service URL comes from `--url` or `BOOKVERSE_URL`
//! (default `http://127.0.0.1:3000`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::Duration;

use bookverse_core::BookId;
use bookverse_shop::config::DEFAULT_BASE_URL;
use bookverse_shop::{ClientError, HttpCatalogClient, ShopConfig};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bookverse")]
#[command(author, version, about = "BookVerse terminal storefront")]
struct Cli {
    /// Catalog service base URL
    #[arg(long, global = true, env = "BOOKVERSE_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Books {
        #[command(subcommand)]
        action: BooksAction,
    },
    /// Show the deployment banner and health line once
    Status,
    /// Start an interactive shopping session
    Shop {
        /// Seconds between deployment banner refreshes
        #[arg(long, default_value_t = 10)]
        version_interval: u64,

        /// Seconds between health refreshes
        #[arg(long, default_value_t = 30)]
        health_interval: u64,
    },
}

#[derive(Subcommand)]
enum BooksAction {
    /// List books
    List {
        /// Only books whose card text contains this (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only books of this genre (`all` for every genre)
        #[arg(short, long)]
        genre: Option<String>,
    },
    /// Show a single book
    Show {
        /// Book ID
        id: i32,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Client configuration from the global flags. A zero timeout is raised to
/// one second.
fn shop_config(cli: &Cli) -> Result<ShopConfig, ClientError> {
    let mut config = ShopConfig::new(&cli.url)?;
    config.request_timeout = Duration::from_secs(cli.timeout.max(1));
    Ok(config)
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = shop_config(&cli)?;

    match cli.command {
        Commands::Books { action } => {
            let client = HttpCatalogClient::new(&config)?;
            match action {
                BooksAction::List { search, genre } => {
                    commands::books::list(&client, search.as_deref(), genre.as_deref()).await?;
                }
                BooksAction::Show { id } => {
                    commands::books::show(&client, BookId::new(id)).await?;
                }
            }
        }
        Commands::Status => {
            let client = HttpCatalogClient::new(&config)?;
            commands::status::show(&client).await;
        }
        Commands::Shop {
            version_interval,
            health_interval,
        } => {
            config.version_interval = Duration::from_secs(version_interval.max(1));
            config.health_interval = Duration::from_secs(health_interval.max(1));
            commands::shop::run(&config).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_is_clamped() {
        let cli = Cli::try_parse_from(["bookverse", "--timeout", "0", "status"]).unwrap();
        let config = shop_config(&cli).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_timeout_flag_is_applied() {
        let cli = Cli::try_parse_from([
            "bookverse",
            "--url",
            "http://10.0.0.5:3000",
            "--timeout",
            "25",
            "books",
            "list",
        ])
        .unwrap();
        let config = shop_config(&cli).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(25));
        assert_eq!(config.base_url.as_str(), "http://10.0.0.5:3000/");
    }
}
