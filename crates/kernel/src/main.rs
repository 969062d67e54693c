//! Banquillo server and command-line tools.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use banquillo_kernel::config::{Config, SessionBackend};
use banquillo_kernel::state::AppState;
use banquillo_kernel::{auth, menu, routes, session};

/// Club management shell.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Print the navigation menu for a role as JSON.
    Menu {
        /// Role id, e.g. admin, coach, player, parent.
        role: String,
    },
    /// Print an Argon2id hash for the users file.
    HashPassword {
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Menu { role } => {
            let entries = menu::resolve_str(&role);
            println!("{}", serde_json::to_string_pretty(&entries)?);
            Ok(())
        }
        Command::HashPassword { password } => {
            println!("{}", auth::hash_password(&password)?);
            Ok(())
        }
    }
}

async fn serve() -> Result<()> {
    init_tracing();

    info!("Starting Banquillo");

    let config = Config::from_env().context("failed to load configuration")?;
    info!(port = config.port, "Configuration loaded");

    let state = AppState::new(&config).context("failed to initialize application state")?;

    let same_site = session::same_site_from_str(&config.cookie_same_site);
    let app = match config.session_backend {
        SessionBackend::Memory => {
            info!("Using in-memory session store");
            routes::app(
                state,
                session::memory_session_layer(same_site, config.cookie_secure),
            )
        }
        SessionBackend::Redis => {
            let layer =
                session::redis_session_layer(&config.redis_url, same_site, config.cookie_secure)
                    .await
                    .context("failed to create session layer")?;
            info!("Redis session store connected");
            routes::app(state, layer)
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;

    info!(%addr, "Server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
