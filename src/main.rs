//! Velto main entry point

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use velto_api::{start_server, AppState};
use velto_config::{AuthProviderKind, Config};
use velto_core::{AuthProvider, CredentialsAuthProvider, MockAuthProvider, RequestStore};

#[derive(Parser, Debug)]
#[command(name = "velto")]
#[command(version = "0.1.0")]
#[command(about = "Create, share and track payment requests from a lightweight web interface", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn auth_provider(config: &Config) -> Arc<dyn AuthProvider> {
    let latency = Duration::from_millis(config.auth.latency_ms);
    match config.auth.provider {
        AuthProviderKind::Mock => Arc::new(MockAuthProvider::new(latency)),
        AuthProviderKind::Credentials => {
            if config.auth.users.is_empty() {
                log::warn!("Credentials provider selected without users; only sign-up will work");
            }
            Arc::new(CredentialsAuthProvider::new(&config.auth))
        }
    }
}

fn load_store(config: &Config) -> anyhow::Result<RequestStore> {
    let result = match &config.data.seed_file {
        Some(path) => {
            log::info!("Loading payment requests from {}", path.display());
            RequestStore::from_seed_file(path)
        }
        None => {
            log::info!("No seed file configured, using built-in sample data");
            RequestStore::sample()
        }
    };

    result.map_err(|e| {
        eprintln!("{}", e.to_details());
        anyhow::anyhow!("failed to load payment requests: {}", e)
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = Config::load_or_default(args.config.clone()).map_err(|e| {
        eprintln!("{}", e.to_details());
        anyhow::anyhow!("failed to load configuration from {}", args.config.display())
    })?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if !args.config.exists() {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }
    log::info!(
        "Config loaded: {}:{}, auth provider={}",
        config.server.host,
        config.server.port,
        config.auth.provider
    );

    let store = load_store(&config)?;
    let auth = auth_provider(&config);
    let state = AppState::new(config, store, auth);

    start_server(state).await
}
