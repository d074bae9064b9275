//! # Classroom DB
//!
//! Storage for the Classroom API.
//!
//! - [`repositories`]: The repository traits the service layer depends on
//! - [`postgres`]: PostgreSQL implementations of those traits
//! - `memory` (feature `test-utils`): An in-memory store implementing every
//!   trait, for tests that should not need a database
//!
//! # Example
//!
//! ```ignore
//! use classroom_config::DatabaseConfig;
//! use classroom_db::{Repositories, init_db_pool};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//! let repositories = Repositories::postgres(pool.clone());
//! // ... serve requests ...
//! pool.close().await;
//! ```

use anyhow::Context;
use classroom_config::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::info;

#[cfg(feature = "test-utils")]
pub mod memory;
pub mod postgres;
pub mod repositories;

pub use repositories::{
    RegistrationScope, Repositories, StudentRepo, TeacherRepo, TeacherStudentRepo,
    TransactionManager,
};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connection options for `config`. A full `DATABASE_URL` wins over the
/// individual host/port/credential fields.
pub fn connect_options(config: &DatabaseConfig) -> anyhow::Result<PgConnectOptions> {
    if let Some(url) = &config.url {
        return url
            .parse::<PgConnectOptions>()
            .context("Invalid DATABASE_URL");
    }

    Ok(PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
        .database(&config.database))
}

/// Opens the PostgreSQL connection pool.
///
/// Call once at startup and hand the pool to [`Repositories::postgres`];
/// close it with [`PgPool::close`] on shutdown.
pub async fn init_db_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let options = connect_options(config)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    info!(
        max_connections = config.max_connections,
        "Database pool initialised"
    );

    Ok(pool)
}
