use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::persistence::PersistenceError;

/// Build the bounded connection pool described by the configuration and
/// establish an initial connection, so a bad config fails here rather than
/// on the first query.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, PersistenceError> {
    debug!(
        database = %config.connection.summary(),
        pool = %config.pool.name,
        size = config.pool.size,
        "creating connection pool"
    );

    let pool = pool_options(config)
        .connect_with(connect_options(config))
        .await?;

    debug!(pool = %config.pool.name, "connection pool created");
    Ok(pool)
}

fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.connection.host)
        .port(config.connection.port)
        .database(&config.connection.database)
        .username(&config.connection.user)
        .password(&config.connection.password)
        .application_name(&config.pool.name)
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.pool.size)
        .test_before_acquire(config.pool.reset_session)
}
