//! Shared application state for the Axum API server.

use finagent_common::config::{AppConfig, StoreBackend};
use finagent_common::db::{create_pool, run_migrations};
use finagent_common::error::AppError;
use finagent_engine::seed::seed_sample_data;
use finagent_engine::{GoalsReserve, Stores};

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub config: AppConfig,
    pub goals_reserve: GoalsReserve,
}

impl AppState {
    pub fn new(stores: Stores, config: AppConfig) -> Self {
        let goals_reserve = GoalsReserve::from_config(&config);
        Self {
            stores,
            config,
            goals_reserve,
        }
    }
}

/// Open the configured record store. The in-memory store is seeded when
/// `seed_sample_data` is set; PostgreSQL gets its migrations applied.
pub async fn build_stores(config: &AppConfig) -> anyhow::Result<Stores> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                AppError::Config("DATABASE_URL is required for STORE_BACKEND=postgres".to_string())
            })?;
            let pool = create_pool(url, config.db_max_connections).await?;
            run_migrations(&pool).await?;
            Ok(Stores::postgres(pool))
        }
        StoreBackend::Memory => {
            let stores = Stores::in_memory();
            if config.seed_sample_data {
                seed_sample_data(&stores, config.default_owner_id).await?;
            }
            tracing::info!(seeded = config.seed_sample_data, "Using in-memory stores");
            Ok(stores)
        }
    }
}
