//! Family Travel Tracker server binary.

use tracker_server::{config::Config, init_tracing, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!(
        database = ?config.database_kind(),
        static_dir = %config.static_dir.display(),
        "Starting travel tracker"
    );

    run(config).await
}
