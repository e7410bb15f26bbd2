//! Repository layer for database operations
//!
//! Every request works through its own [`Session`]: a pooled connection with
//! an open transaction. `close(true)` commits, `close(false)` rolls back, and
//! a session dropped on an early return rolls back on its own, so the
//! connection always goes back to the pool.

pub mod books;
pub mod members;

use std::str::FromStr;
use std::time::Duration;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite, SqliteConnection, Transaction,
};

use crate::{config::DatabaseConfig, error::AppResult};

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Open the store described by `config`, creating the file if needed
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let in_memory = config.url.contains(":memory:");
        let mut pool_options = SqlitePoolOptions::new().max_connections(if in_memory {
            // Each in-memory connection is its own database
            1
        } else {
            config.max_connections
        });
        if in_memory {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;
        Ok(Self::new(pool))
    }

    /// Create the `books` and `members` tables if they are missing
    pub async fn init_schema(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    /// Acquire a connection and start a transaction on it
    pub async fn open(&self) -> AppResult<Session> {
        let tx = self.pool.begin().await?;
        Ok(Session { tx })
    }

    /// Round-trip to the store (readiness probe)
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// A per-request handle on the store
pub struct Session {
    tx: Transaction<'static, Sqlite>,
}

impl Session {
    /// Commit (or roll back) pending writes and release the connection
    pub async fn close(self, commit: bool) -> AppResult<()> {
        if commit {
            self.tx.commit().await?;
        } else {
            self.tx.rollback().await?;
        }
        Ok(())
    }

    fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }
}

/// Build a substring pattern for `LIKE ... ESCAPE '\'`.
/// Wildcards typed by the user match literally. Case is kept as typed; the
/// SQL applies `LOWER` to both sides.
pub(crate) fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
