use std::sync::Arc;

use clap::{
    Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use tunerelay::{
    config, error, info,
    management::{CredentialStore, LoginStateRegistry, TokenRefresher},
    server::{self, AppState},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the relay HTTP server
    Serve(ServeOptions),

    /// List users with stored credentials
    Sessions,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Bind address, e.g. 0.0.0.0:8888 (overrides SERVER_ADDRESS)
    #[clap(long)]
    pub address: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => {
            // Fail fast on incomplete settings rather than mid-request.
            if let Err(e) = config::check_required() {
                error!("Invalid configuration: {}", e);
            }

            let store = open_store().await;
            let state = AppState {
                refresher: Arc::new(TokenRefresher::from_config(Arc::clone(&store))),
                store,
                login_states: Arc::new(LoginStateRegistry::new()),
                frontend_url: config::frontend_url(),
            };

            let address = opt.address.unwrap_or_else(config::server_addr);
            server::start_api_server(state, &address).await;
        }
        Command::Sessions => {
            let store = open_store().await;
            let users = store.list().await;
            if users.is_empty() {
                info!("No users with stored credentials.");
            } else {
                for user_id in users {
                    info!("{}", user_id);
                }
            }
        }
    }
}

async fn open_store() -> Arc<CredentialStore> {
    match CredentialStore::open(config::credentials_path()).await {
        Ok(store) => Arc::new(store),
        Err(e) => error!("Failed to open credential store: {}", e),
    }
}
