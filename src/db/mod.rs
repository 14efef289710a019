pub mod messages;
pub mod users;

use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

pub use messages::{Message, NewMessage};
pub use users::{NewUser, Role, User};

pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("parse DATABASE_URL {database_url}"))?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(16)
        .connect_with(options)
        .await
        .with_context(|| format!("connect to {database_url}"))
}

/// Single-connection pool over a private in-memory database.
pub async fn connect_in_memory() -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?
        .foreign_keys(true);

    // the shared in-memory database is dropped with its last connection, so keep one open while idle
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .context("connect to in-memory sqlite")
}

const MIGRATIONS: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS messages (
        id     INTEGER PRIMARY KEY AUTOINCREMENT,
        text   TEXT NOT NULL,
        tag    TEXT NOT NULL,
        author TEXT
    )"#,
    r#"CREATE INDEX IF NOT EXISTS messages_tag ON messages (tag)"#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id       TEXT PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        active   BOOLEAN NOT NULL
    )"#,
    r#"
    CREATE TABLE IF NOT EXISTS user_roles (
        user_id TEXT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        role    TEXT NOT NULL,
        PRIMARY KEY (user_id, role)
    )"#,
];

pub async fn run_migrations(db_pool: &SqlitePool) -> anyhow::Result<()> {
    for statement in MIGRATIONS {
        sqlx::query(statement)
            .execute(db_pool)
            .await
            .with_context(|| format!("apply migration: {}", statement.trim().lines().next().unwrap_or_default()))?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let db_pool = connect_in_memory().await.unwrap();
    run_migrations(&db_pool).await.unwrap();
    db_pool
}
