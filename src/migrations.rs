//! Schema for the five service tables.
//!
//! Each entry is applied at most once, tracked by `PRAGMA user_version`.
//! Statements are also `IF NOT EXISTS`, so databases created before
//! versioning existed migrate cleanly.

use sqlx::SqlitePool;

use crate::error::StoreError;

pub const MIGRATIONS: &[&str] = &[V1, V2];

// language=sql
const V1: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        password TEXT DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS data (
        plant_id INTEGER NOT NULL,
        soil_humidity REAL NOT NULL,
        light_level REAL NOT NULL,
        temperature REAL NOT NULL,
        timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
    );

    CREATE TABLE IF NOT EXISTS plants (
        plant_id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
        user_id INTEGER NOT NULL,
        plantType_id INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS alerts (
        message TEXT NOT NULL,
        plant_id INTEGER NOT NULL,
        timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
    );

    CREATE TABLE IF NOT EXISTS plant_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
        nombre TEXT NOT NULL,
        max_hum REAL NOT NULL,
        min_hum REAL NOT NULL,
        max_temp REAL NOT NULL,
        min_temp REAL NOT NULL,
        max_luz REAL NOT NULL,
        min_luz REAL NOT NULL
    );
"#;

// Readings are always read per plant in time order, and the mailbox pops by time.
// language=sql
const V2: &str = r#"
    CREATE INDEX IF NOT EXISTS data_plant_id_timestamp ON data (plant_id, timestamp);
    CREATE INDEX IF NOT EXISTS alerts_timestamp ON alerts (timestamp DESC);
    CREATE INDEX IF NOT EXISTS users_name ON users (name);
"#;

/// Apply pending migrations. Returns the number applied.
pub async fn migrate(pool: &SqlitePool) -> Result<usize, StoreError> {
    let current: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;
    let current = usize::try_from(current).unwrap_or(0);

    let mut applied = 0;
    for (i, migration) in MIGRATIONS.iter().enumerate().skip(current) {
        let version = i + 1;
        tracing::info!(version, "applying schema migration");

        let mut tx = pool.begin().await?;
        sqlx::raw_sql(migration).execute(&mut *tx).await?;
        // PRAGMA does not accept bound parameters; version is our own counter
        sqlx::raw_sql(&format!("PRAGMA user_version = {version}"))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        applied += 1;
    }

    if applied == 0 {
        tracing::debug!(version = current, "schema up to date");
    }
    Ok(applied)
}
