use tracing_subscriber::EnvFilter;

use muni_api::database::manager::DatabaseManager;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = muni_api::config::config();
    tracing::info!("Starting Muni API in {:?} mode", config.environment);

    if config.database.run_migrations {
        // A missing database only degrades /health; the server still starts
        if let Err(e) = DatabaseManager::run_migrations().await {
            tracing::warn!("Skipping migrations: {}", e);
        }
    }

    let app = muni_api::app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("MUNI_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("Muni API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
