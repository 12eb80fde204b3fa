//! `deeplink`: resolve deep links against a TOML route manifest.
//!
//! # Commands
//! - `check`: load and validate the manifest
//! - `routes`: print the registered patterns
//! - `resolve <URL>...`: print one JSON resolution per URL
//! - `watch`: resolve URLs read from stdin, hot-reloading the manifest

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use clap::{Parser, Subcommand};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};

use deeplink_router::config::{load_config, ConfigWatcher, RouterConfig};
use deeplink_router::observability::logging;
use deeplink_router::DeepLinkTable;

#[derive(Parser)]
#[command(name = "deeplink")]
#[command(about = "Resolve deep links against a route manifest", long_about = None)]
struct Cli {
    /// Route manifest (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Override the manifest's log level.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the manifest and build the route table
    Check,
    /// List registered patterns and targets
    Routes,
    /// Resolve one or more URLs
    Resolve {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Resolve URLs from stdin, reloading the manifest on change
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    logging::init(&config.observability)?;

    tracing::info!(
        path = ?cli.config,
        routes = config.routes.len(),
        "Route manifest loaded"
    );

    let table = DeepLinkTable::from_config(&config)?;

    match cli.command {
        Commands::Check => {
            println!("ok: {} routes", table.route_count());
        }
        Commands::Routes => {
            let routes: Vec<_> = table
                .routes()
                .into_iter()
                .map(|entry| json!({ "pattern": entry.pattern, "target": entry.slots.type_slot }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&routes)?);
        }
        Commands::Resolve { urls } => {
            for url in &urls {
                print_resolution(&table, url)?;
            }
        }
        Commands::Watch => {
            watch(&cli.config, config, table).await?;
        }
    }

    Ok(())
}

fn print_resolution(table: &DeepLinkTable, input: &str) -> Result<(), Box<dyn std::error::Error>> {
    match table.parse(input) {
        Ok(path) => {
            let resolution = table.resolve_type(&path);
            println!("{}", serde_json::to_string(&resolution)?);
        }
        Err(e) => {
            tracing::warn!(input = %input, error = %e, "Unparseable link");
            println!("{}", json!({ "input": input, "error": e.to_string() }));
        }
    }
    Ok(())
}

async fn watch(
    path: &Path,
    config: RouterConfig,
    table: DeepLinkTable,
) -> Result<(), Box<dyn std::error::Error>> {
    let current = ArcSwap::from_pointee(table);
    let mut log_config = config.observability.clone();
    let (watcher, mut updates) = ConfigWatcher::new(path, Some(config));
    let _watcher = watcher.run()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(new_config) = updates.recv() => {
                match DeepLinkTable::from_config(&new_config) {
                    Ok(table) => {
                        current.store(Arc::new(table));
                        tracing::info!(routes = new_config.routes.len(), "Route table swapped");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Rebuilding route table failed, keeping current routes");
                    }
                }
                if new_config.observability != log_config {
                    tracing::warn!("Observability settings changed; restart to apply them");
                    log_config = new_config.observability;
                }
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) if line.trim().is_empty() => {}
                    Some(line) => print_resolution(&current.load(), line.trim())?,
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping watch");
                break;
            }
        }
    }

    Ok(())
}
