//! Development server for wine directory UI work
//!
//! Serves the in-memory catalog API seeded with wineries and wines in every
//! moderation status. Settings come from the environment (or a `.env` file);
//! see `test_helpers::Config::from_env`.
//!
//! Usage: cargo run -p dev-server

use anyhow::Result;
use test_helpers::mock::DevDataset;
use test_helpers::{Config, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = telemetry::get_subscriber("info".into());
    telemetry::init_subscriber(subscriber)?;

    info!("🚀 Starting wine directory development server");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            telemetry::log_error(e);
            anyhow::bail!("Set ADMIN_USERNAME and ADMIN_PASSWORD, e.g. in .env");
        }
    };
    let admin_username = config.admin_username.clone();
    let app = test_helpers::spawn_app_with(config).await?;

    info!("✅ API server running on http://127.0.0.1:{}", app.port);

    info!("📊 Setting up development test data...");
    let dataset = DevDataset::create(&app).await?;

    info!("🎯 Development server ready!");
    info!("   API: http://127.0.0.1:{}/api", app.port);
    info!(
        "   UI:  cd ui && BACKEND_URL=http://127.0.0.1:{} trunk serve",
        app.port
    );
    info!("   Admin login: {admin_username}");
    info!("");
    dataset.print_summary();
    info!("");
    info!("👋 Press Ctrl+C to shutdown");

    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutting down development server");
    Ok(())
}
