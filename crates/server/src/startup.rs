use std::net::SocketAddr;

use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use common::env::ensure_upload_dir;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Public entry: load config, prepare the database and upload dir, serve HTTP.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    if cfg.auth.uses_dev_secret() {
        warn!("JWT_SECRET not set; using the development secret");
    }

    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }

    ensure_upload_dir(&cfg.files.upload_dir).await.map_err(|e| StartupError::Runtime(e.to_string()))?;

    let state = ServerState::from_db(db, &cfg);
    let app = routes::build_router(state, build_cors(), cfg.files.max_upload_bytes);

    let addr = bind_addr(&cfg)?;
    info!(%addr, host_api = %cfg.files.host_api, "starting teslo api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
