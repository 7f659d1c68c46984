//! # CETIS DB
//!
//! PostgreSQL connection pool and embedded migrations.
//!
//! ```ignore
//! use cetis_config::DatabaseConfig;
//!
//! let config = DatabaseConfig::from_env().expect("DATABASE_URL must be set");
//! let pool = cetis_db::init_db_pool(&config).await?;
//! if config.run_migrations {
//!     cetis_db::run_migrations(&pool).await?;
//! }
//! ```

use std::time::Duration;

use cetis_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use sqlx::PgPool;

/// Schema migrations from the workspace `migrations/` directory.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Connects a pool sized by `config.max_connections`.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

/// Builds a pool that connects on first use. Used where no query may run,
/// e.g. router tests.
pub fn lazy_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(1))
        .connect_lazy(url)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
