use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::product::repo::seaorm::SeaOrmProductRepository;
use service::product::ProductService;
use service::seller::repo::seaorm::SeaOrmSellerRepository;
use service::seller::{SellerService, TokenIssuer};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the SeaORM repositories into the handler state.
pub fn state_from_db(db: DatabaseConnection, auth: &configs::AuthConfig) -> ServerState {
    let tokens = TokenIssuer::new(auth.jwt_secret.clone(), auth.token_ttl_hours);
    ServerState {
        products: ProductService::new(Arc::new(SeaOrmProductRepository { db: db.clone() })),
        sellers: SellerService::new(Arc::new(SeaOrmSellerRepository { db }), tokens),
    }
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Connect, migrate if configured, then serve until Ctrl+C.
pub async fn serve(cfg: AppConfig) -> anyhow::Result<()> {
    if cfg.auth.jwt_secret == configs::DEV_JWT_SECRET {
        warn!("using the development JWT secret; set JWT_SECRET in production");
    }
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await.map_err(|e| StartupError::Database(e.to_string()))?;
        info!("migrations applied");
    }

    let state = state_from_db(db, &cfg.auth);
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting seller panel");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}
