use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::AppConfig;
use service::{
    addresses::repo::seaorm::SeaOrmAddressRepository,
    credentials::CredentialHasher,
    token::TokenIssuer,
    users::repo::seaorm::SeaOrmUserRepository,
};

use crate::{errors::StartupError, routes, state::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {}", e)))
}

/// Connect, migrate and wire the SeaORM-backed services.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(e.to_string()))?;
        info!("migrations applied");
    }

    let hasher = CredentialHasher::new(cfg.auth.password_hash_cost)
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let tokens = TokenIssuer::new(&cfg.auth.jwt_secret, cfg.auth.jwt_expiration_seconds);
    Ok(ServerState::new(
        Arc::new(SeaOrmUserRepository { db: db.clone() }),
        Arc::new(SeaOrmAddressRepository { db }),
        hasher,
        tokens,
    ))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, draining connections");
    }
}

/// Load and validate configuration from `config.toml` and the environment.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Public entry: build the app from `cfg` and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    run_until(cfg, shutdown_signal()).await
}

/// Same as [`run`], stopping gracefully once `shutdown` resolves.
pub async fn run_until<F>(cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, token_ttl = cfg.auth.jwt_expiration_seconds, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(anyhow::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_rejects_bad_host() {
        let mut cfg = AppConfig::default();
        assert_eq!(bind_addr(&cfg).unwrap().port(), 8080);
        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn run_until_uses_the_given_config() {
        let mut cfg = AppConfig::default();
        cfg.database.url = "unsupported://nowhere".into();
        let err = run_until(cfg, std::future::ready(())).await.unwrap_err();
        assert!(matches!(err, StartupError::Database(_)));
    }
}
