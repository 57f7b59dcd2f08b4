use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use configs::DatabaseConfig;

/// Connect using explicit pool options from the `[database]` config section.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    tracing::debug!(max = cfg.max_connections, min = cfg.min_connections, "opening database pool");
    Database::connect(opts).await
}
