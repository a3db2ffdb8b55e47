use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

/// Environment variable holding the connection string
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Creates a pooled database connection
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options
        .max_connections(20)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging_level(log::LevelFilter::Debug);

    Database::connect(options).await
}
