use clap::Parser;
use comanda::config::{CliArgs, get_config};
use comanda::{create_app, db, run_migrations};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before anything reads them
    if std::fs::metadata(".env").is_ok() {
        dotenv::dotenv().ok();
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = get_config(CliArgs::parse());

    let pool = Arc::new(db::init_pool(&config.database_url));

    {
        let mut conn = pool.get()?;
        run_migrations(&mut conn);
    }

    // The dashboard talks to the API from another origin during development
    let mut app = create_app(pool).layer(CorsLayer::permissive());

    // Serve the built dashboard when it is present, otherwise just the API
    match config.static_dir.as_ref().filter(|dir| dir.join("index.html").exists()) {
        Some(dir) => {
            info!("Serving dashboard from {:?}", dir);
            let index = ServeFile::new(dir.join("index.html"));
            app = app.fallback_service(ServeDir::new(dir).fallback(index));
        }
        None => {
            app = app.route(
                "/",
                axum::routing::get(|| async { "Backend API running. Use /api/* endpoints." }),
            );
        }
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
