#![cfg(test)]
use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;

/// Fresh, fully migrated in-memory database. Each call is isolated.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_and_migrate(&DatabaseConfig::sqlite_memory()).await
}
