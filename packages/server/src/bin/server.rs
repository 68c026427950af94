//! Chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin taiwa-server
//! cargo run --bin taiwa-server -- --host 0.0.0.0 --port 3000 --users-file users.json
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use taiwa_server::{
    domain::User,
    infrastructure::{
        dto::encoder::JsonFrameEncoder,
        notifier::LoggingOfflineNotifier,
        repository::InMemoryChatRepository,
        seed::{SeedError, demo_users, load_users_from_file},
        session_registry::WebSocketSessionRegistry,
    },
    ui::{AppState, Server},
};
use taiwa_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "taiwa-server")]
#[command(about = "Two-party realtime chat relay over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "TAIWA_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "TAIWA_PORT", default_value = "8080")]
    port: u16,

    /// JSON file with the users to seed the store with
    #[arg(long, env = "TAIWA_USERS_FILE")]
    users_file: Option<PathBuf>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "TAIWA_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn load_users(path: Option<&PathBuf>) -> Result<Vec<User>, SeedError> {
    match path {
        Some(path) => load_users_from_file(path),
        None => {
            tracing::warn!("No users file given, seeding demo users");
            Ok(demo_users())
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. SessionRegistry / OfflineNotifier
    // 3. UseCases (AppState)
    // 4. Server

    // 1. Create Repository (in-memory store)
    let users = match load_users(args.users_file.as_ref()) {
        Ok(users) => users,
        Err(e) => {
            tracing::error!("Failed to load users: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Seeded {} users", users.len());
    let repository = Arc::new(InMemoryChatRepository::with_users(
        users,
        Arc::new(SystemClock),
    ));

    // 2. Create SessionRegistry, OfflineNotifier and FrameEncoder
    let registry = Arc::new(WebSocketSessionRegistry::new());
    let notifier = Arc::new(LoggingOfflineNotifier);
    let encoder = Arc::new(JsonFrameEncoder);

    // 3. Create UseCases
    let state = AppState::wire(repository, registry, notifier, encoder);

    // 4. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
