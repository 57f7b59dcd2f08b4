#![cfg(test)]
use tokio::sync::OnceCell;

use configs::DatabaseConfig;

use crate::storage::SeaOrmStore;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_db_config() -> Option<DatabaseConfig> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(DatabaseConfig { url, max_connections: 20, acquire_timeout_secs: 10, ..Default::default() })
}

/// Connect to the test database, or `None` when Postgres tests should be skipped.
pub async fn get_store() -> Result<Option<SeaOrmStore>, anyhow::Error> {
    let Some(cfg) = test_db_config() else {
        eprintln!("DATABASE_URL missing or SKIP_DB_TESTS set; skip postgres tests");
        return Ok(None);
    };

    let migrated = *MIGRATED
        .get_or_init(|| async {
            let mut migrate_cfg = cfg.clone();
            migrate_cfg.run_migrations = true;
            match SeaOrmStore::connect(&migrate_cfg).await {
                Ok(store) => {
                    let _ = crate::storage::ItemStore::close(&store).await;
                    true
                }
                Err(e) => {
                    eprintln!("skip: cannot prepare test database: {e}");
                    false
                }
            }
        })
        .await;
    if !migrated {
        return Ok(None);
    }

    // Fresh connection for the current test's runtime
    Ok(Some(SeaOrmStore::connect(&cfg).await?))
}
