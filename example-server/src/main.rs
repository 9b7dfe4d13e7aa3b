use axum::{routing::get, Router};
use db_dashboard::{DashboardConfig, DashboardLayer};
use sqlx::sqlite::SqlitePool;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod database;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Defaults to a file next to the working directory
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:example.db?mode=rwc".to_string());
    let hostname = std::env::var("HOSTNAME").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());

    let pool = SqlitePool::connect(&database_url).await?;

    // Run database setup and seed sample data
    database::setup(&pool).await?;

    // The schema is discovered before the router exists; a table the
    // dashboard cannot serve stops startup here.
    let dashboard = DashboardLayer::sqlite(pool, DashboardConfig::default().with_base_path("/admin")).await?;

    let app = Router::new()
        .route("/", get(root_handler))
        .merge(dashboard.into_router());

    let address = format!("{}:{}", hostname, port);
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!("Server running at http://{}", address);
    info!("Dashboard available at http://{}/admin", address);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn root_handler() -> &'static str {
    "Welcome to the db-dashboard example server"
}
