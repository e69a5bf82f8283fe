//! Embedded PostgreSQL helpers for integration tests.
//!
//! - Each test gets its own temporary database on the shared cluster.
//! - Schema setup runs the embedded Diesel migrations so test schemas never
//!   drift from `backend/migrations`.
//! - Raw SQL goes through `postgres` to stay outside Diesel transactions.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use postgres::{Client, NoTls};

use super::format_postgres_error;

/// Embedded migrations from the backend/migrations directory.
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Password pinned so reused data directories keep accepting connections.
const EMBEDDED_PASSWORD: &str = "user_registry_embedded_test";

/// Ensures `PG_PASSWORD` is stable across processes sharing a data directory.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster bootstrap spawns threads.
        unsafe {
            std::env::set_var("PG_PASSWORD", EMBEDDED_PASSWORD);
        }
    }
}

/// Creates a migrated temporary database on the shared embedded cluster.
pub fn migrated_database() -> Result<TemporaryDatabase, String> {
    ensure_stable_password();
    let cluster = pg_embedded_setup_unpriv::test_support::shared_cluster_handle()
        .map_err(|err| format!("shared cluster: {err:?}"))?;
    let database = cluster
        .create_temporary_database()
        .map_err(|err| format!("create database: {err:?}"))?;
    migrate_schema(&database.url().to_string())?;
    Ok(database)
}

/// Runs all pending Diesel migrations against the test database.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err}"))?;
    Ok(())
}

/// Executes raw SQL against the given database URL.
pub fn execute_sql(url: &str, sql: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(sql)
        .map_err(|err| format_postgres_error(&err))
}

/// Drops both user tables to simulate schema loss.
pub fn drop_user_tables(url: &str) -> Result<(), String> {
    execute_sql(url, "DROP TABLE IF EXISTS user_deletes; DROP TABLE IF EXISTS users;")
}
