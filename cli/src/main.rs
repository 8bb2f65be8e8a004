//! Hotel Console CLI
//!
//! Command-line front end for the hotel-management backend.
//!
//! ```sh
//! # Log in once; the token is kept for later commands
//! hotel-console login admin --password secret
//!
//! # Book a room and pay for it in one go
//! hotel-console reservations create --guest 3 --room 12 \
//!     --start 2024-06-01 --end 2024-06-04 --pay card
//!
//! # Try everything against built-in sample data
//! hotel-console --demo rooms eligible
//! ```

mod commands;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use hotel_console::application::{SessionContext, TokenStore};
use hotel_console::config::AppConfig;
use hotel_console::domain::HotelBackend;
use hotel_console::infrastructure::{FileTokenStore, InMemoryBackend, MemoryTokenStore, RestGateway};
use hotel_console::shared::ViewScope;
use hotel_console::{default_config_path, init_tracing};

use commands::{Command, Context};

/// Hotel Console: rooms, guests, reservations, payments and reports.
#[derive(Parser, Debug)]
#[command(
    name = "hotel-console",
    version,
    about = "Administrative console for the hotel-management backend",
    long_about = "Hotel Console: manage rooms, guests, reservations and payments \
                  through the hotel REST API.\n\n\
                  Default config: ~/.config/hotel-console/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "HOTEL_CONSOLE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Use built-in sample data instead of the backend (nothing is saved).
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config.logging);

    match &load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    if let Some(ref url) = cli.api_url {
        info!("CLI override: api.base_url = {}", url);
        config.api.base_url = url.clone();
    }

    // ── Config validation mode ─────────────────────────────────
    if matches!(cli.command, Command::Check) {
        if let Some(e) = load_error {
            println!("❌ Configuration is invalid: {}", e);
            std::process::exit(2);
        }
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API base URL: {}", config.api.base_url);
        println!("   Timeout     : {}s", config.api.timeout_secs);
        println!("   Token file  : {}", config.session.token_path().display());
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Run command ────────────────────────────────────────────
    let outcome = if cli.demo {
        let backend = Arc::new(InMemoryBackend::seeded());
        let store = MemoryTokenStore::default();
        store.save(&backend.issue_token("admin")?)?;
        warn!("Demo mode: using sample data, changes are discarded on exit");
        run(cli.command, backend, store).await?
    } else {
        let backend = Arc::new(RestGateway::new(&config.api.base_url, config.api.timeout())?);
        let store = FileTokenStore::new(config.session.token_path());
        run(cli.command, backend, store).await?
    };

    if let Err(e) = outcome {
        error!(error = %e, "Command failed");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
    Ok(())
}

/// Run one command under a view scope that Ctrl+C closes.
async fn run<S: TokenStore>(
    command: Command,
    backend: Arc<dyn HotelBackend>,
    store: S,
) -> Result<hotel_console::domain::DomainResult<()>, Box<dyn std::error::Error>> {
    let session = SessionContext::restore(store)?;
    let scope = ViewScope::new();
    let ctrl_c = scope.close_on_ctrl_c();

    let mut ctx = Context::new(backend, session);
    let outcome = scope.guard(commands::dispatch(&mut ctx, command)).await;
    ctrl_c.abort();

    match outcome {
        Some(result) => Ok(result),
        None => {
            eprintln!("Cancelled.");
            std::process::exit(130);
        }
    }
}
