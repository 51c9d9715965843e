

/// Transaction handling tests
pub mod transaction_tests;

use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Database tests only run against an explicitly configured server.
pub(crate) fn db_tests_enabled() -> bool {
    std::env::var("DATABASE_URL").is_ok() && std::env::var("SKIP_DB_TESTS").is_err()
}

pub(crate) async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = crate::db::connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
