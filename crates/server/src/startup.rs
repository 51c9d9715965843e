use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::auth::{repo::seaorm::SeaOrmAuthRepository, AuthConfig, AuthService};
use service::customer::{repo::seaorm::SeaOrmCustomerRepository, CustomerService};
use service::files::{repo::seaorm::SeaOrmBlobRepository, FileStore};
use service::measurement::{repo::seaorm::SeaOrmMeasurementRepository, MeasurementService};
use service::order::{repo::seaorm::SeaOrmOrderRepository, OrderService};
use service::staff::{repo::seaorm::SeaOrmStaffRepository, StaffService};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `config.toml` (or `CONFIG_PATH`) when present, otherwise environment variables only.
pub fn load_config() -> Result<AppConfig, StartupError> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let loaded = if Path::new(&path).exists() {
        AppConfig::load_and_validate()
    } else {
        warn!(%path, "config file not found; using environment variables");
        AppConfig::from_env()
    };
    loaded.map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Wire the SeaORM repositories into the services.
pub fn build_state(db: DatabaseConnection, cfg: &AppConfig) -> ServerState {
    let files = FileStore::new(Arc::new(SeaOrmBlobRepository { db: db.clone() }), cfg.storage.max_file_bytes);
    let staff_repo = Arc::new(SeaOrmStaffRepository { db: db.clone() });
    let customer_repo = Arc::new(SeaOrmCustomerRepository { db: db.clone() });
    let measurement_repo = Arc::new(SeaOrmMeasurementRepository { db: db.clone() });
    let order_repo = Arc::new(SeaOrmOrderRepository { db: db.clone() });

    ServerState {
        auth: AuthService::new(Arc::new(SeaOrmAuthRepository { db }), AuthConfig::from(&cfg.auth)),
        staff: StaffService::new(staff_repo.clone(), files.clone()),
        customers: CustomerService::new(customer_repo.clone(), measurement_repo.clone(), order_repo.clone()),
        measurements: MeasurementService::new(measurement_repo.clone(), customer_repo.clone()),
        orders: OrderService::new(order_repo, customer_repo, staff_repo, measurement_repo, files.clone()),
        files,
        max_request_bytes: cfg.storage.max_request_bytes,
    }
}

/// Build the router for `state`; shared by `run` and the HTTP tests.
pub fn app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Public entry: load config, migrate, bootstrap and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = load_config()?;

    let db = models::db::connect_with_config(&models::db::DatabaseConfig::from(&cfg.database))
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Database(format!("migrations failed: {e}")))?;

    let state = build_state(db, &cfg);

    if let Some((username, pin)) = cfg.auth.bootstrap_admin() {
        if let Some(admin) = state.staff.bootstrap_admin(&username, &pin).await.map_err(anyhow::Error::from)? {
            info!(staff_id = %admin.id, "bootstrap admin account created");
        }
    }

    let app = app(state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
