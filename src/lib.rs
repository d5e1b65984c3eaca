pub mod cache;
pub mod catalog;
pub mod cli;
pub mod clients;
pub mod config;
pub mod domain;
pub mod geo;
pub mod models;
pub mod services;
pub mod state;
pub mod view;

pub use config::Config;
pub use state::AppState;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    config.validate()?;
    init_tracing(&config);

    let cli = cli::Cli::parse();
    cli::dispatch(cli, config).await
}
