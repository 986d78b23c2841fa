//! SQLite data-access layer.
//!
//! [`Store`] wraps a connection pool; every operation checks out a handle
//! for its own duration and returns it on drop, so no connection is shared
//! between requests. All values reach SQL as bound parameters. Table and
//! column identifiers only ever come from [`Table`].

use std::str::FromStr;
use std::time::Duration;

use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, QueryBuilder, Row as _, Sqlite, SqlitePool, TypeInfo, ValueRef};

use crate::error::StoreError;
use crate::models::{Alert, NewPlantType, NewReading, Row};

const MAX_CONNECTIONS: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// The five service tables and what the generic query may project from each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Users,
    Plants,
    PlantTypes,
    Data,
    Alerts,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Plants => "plants",
            Table::PlantTypes => "plant_types",
            Table::Data => "data",
            Table::Alerts => "alerts",
        }
    }

    /// Projected columns, in table order. `users.password` is never projected.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Table::Users => &["id", "name"],
            Table::Plants => &["plant_id", "user_id", "plantType_id"],
            Table::PlantTypes => &[
                "id", "nombre", "max_hum", "min_hum", "max_temp", "min_temp", "max_luz", "min_luz",
            ],
            Table::Data => &[
                "plant_id",
                "soil_humidity",
                "light_level",
                "temperature",
                "timestamp",
            ],
            Table::Alerts => &["message", "plant_id", "timestamp"],
        }
    }

    pub fn has_timestamp(self) -> bool {
        matches!(self, Table::Data | Table::Alerts)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Int(i64),
    Real(f64),
    Text(String),
}

/// `column = value` restriction for [`Store::query`].
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: &'static str,
    pub value: FilterValue,
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<FilterValue>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Int(v)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::Real(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

/// Outcome of resolving a plant to its threshold profile.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeLookup {
    Found(Row),
    NoPlant,
    NoPlantType(i64),
}

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (creating if missing) the database at `url`, e.g. `sqlite://DATABASE.db`.
    /// Does not touch the schema; see [`Store::migrate`].
    pub async fn open(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        tracing::debug!(url, "opened sqlite pool");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<usize, StoreError> {
        crate::migrations::migrate(&self.pool).await
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Generic table read: every row of `table`, optionally restricted to
    /// `filter.column = filter.value`, optionally only the most recent row.
    pub async fn query(
        &self,
        table: Table,
        filter: Option<&Filter>,
        latest_only: bool,
    ) -> Result<Vec<Row>, StoreError> {
        if latest_only && !table.has_timestamp() {
            return Err(StoreError::NoTimestamp(table.name()));
        }

        let mut qb = QueryBuilder::<Sqlite>::new("SELECT ");
        qb.push(table.columns().join(", "));
        qb.push(" FROM ");
        qb.push(table.name());

        if let Some(filter) = filter {
            if !table.columns().contains(&filter.column) {
                return Err(StoreError::UnknownColumn(table.name(), filter.column));
            }
            qb.push(" WHERE ");
            qb.push(filter.column);
            qb.push(" = ");
            match &filter.value {
                FilterValue::Int(v) => qb.push_bind(*v),
                FilterValue::Real(v) => qb.push_bind(*v),
                FilterValue::Text(v) => qb.push_bind(v.clone()),
            };
        }

        if latest_only {
            qb.push(" ORDER BY timestamp DESC, rowid DESC LIMIT 1");
        } else {
            qb.push(" ORDER BY rowid");
        }

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(row_to_map).collect()
    }

    /// Resolve plant -> plant type id -> plant type row, on one connection.
    pub async fn plant_range(&self, plant_id: i64) -> Result<RangeLookup, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let plant_type_id: Option<i64> =
            sqlx::query_scalar("SELECT plantType_id FROM plants WHERE plant_id = ?")
                .bind(plant_id)
                .fetch_optional(&mut *conn)
                .await?;

        let Some(plant_type_id) = plant_type_id else {
            return Ok(RangeLookup::NoPlant);
        };

        let row = sqlx::query(
            "SELECT id, nombre, max_hum, min_hum, max_temp, min_temp, max_luz, min_luz \
             FROM plant_types WHERE id = ?",
        )
        .bind(plant_type_id)
        .fetch_optional(&mut *conn)
        .await?;

        match row {
            Some(row) => Ok(RangeLookup::Found(row_to_map(&row)?)),
            None => Ok(RangeLookup::NoPlantType(plant_type_id)),
        }
    }

    /// Append one reading; returns its rowid. The timestamp is left to the
    /// column default (UTC).
    pub async fn insert_reading(&self, reading: &NewReading) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO data (plant_id, soil_humidity, light_level, temperature) VALUES (?, ?, ?, ?)",
        )
        .bind(reading.plant_id)
        .bind(reading.soil_humidity)
        .bind(reading.light_level)
        .bind(reading.temperature)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Append many readings in a single transaction.
    pub async fn insert_readings(&self, readings: &[NewReading]) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for reading in readings {
            sqlx::query(
                "INSERT INTO data (plant_id, soil_humidity, light_level, temperature) VALUES (?, ?, ?, ?)",
            )
            .bind(reading.plant_id)
            .bind(reading.soil_humidity)
            .bind(reading.light_level)
            .bind(reading.temperature)
            .execute(&mut *tx)
            .await?;
            inserted += 1;
        }
        tx.commit().await?;
        Ok(inserted)
    }

    pub async fn insert_plant(&self, user_id: i64, plant_type_id: i64) -> Result<i64, StoreError> {
        let result = sqlx::query("INSERT INTO plants (user_id, plantType_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(plant_type_id)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn insert_plant_type(&self, plant_type: &NewPlantType) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO plant_types (nombre, max_hum, min_hum, max_temp, min_temp, max_luz, min_luz) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&plant_type.nombre)
        .bind(plant_type.max_hum)
        .bind(plant_type.min_hum)
        .bind(plant_type.max_temp)
        .bind(plant_type.min_temp)
        .bind(plant_type.max_luz)
        .bind(plant_type.min_luz)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Passwords are stored and compared in plaintext.
    pub async fn create_user(&self, name: &str, password: &str) -> Result<i64, StoreError> {
        let result = sqlx::query("INSERT INTO users (name, password) VALUES (?, ?)")
            .bind(name)
            .bind(password)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Id of the user named `username` if `password` matches. Unknown user and
    /// wrong password are deliberately indistinguishable to the caller.
    pub async fn check_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<i64>, StoreError> {
        let user: Option<(i64, Option<String>)> =
            sqlx::query_as("SELECT id, password FROM users WHERE name = ? ORDER BY id LIMIT 1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        Ok(match user {
            Some((id, Some(saved))) if saved == password => Some(id),
            _ => None,
        })
    }

    pub async fn insert_alert(&self, message: &str, plant_id: i64) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO alerts (message, plant_id) VALUES (?, ?)")
            .bind(message)
            .bind(plant_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Pop the most recent alert. The select and delete are one statement in
    /// one transaction, so a pending alert is handed to exactly one caller.
    pub async fn take_latest_alert(&self) -> Result<Option<Alert>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let alert: Option<Alert> = sqlx::query_as(
            "DELETE FROM alerts WHERE rowid = ( \
                 SELECT rowid FROM alerts ORDER BY timestamp DESC, rowid DESC LIMIT 1 \
             ) RETURNING message, plant_id, timestamp",
        )
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(alert)
    }

    pub async fn count(&self, table: Table) -> Result<i64, StoreError> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM ");
        qb.push(table.name());
        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Fresh store backed by a per-test, per-process file in the temp dir.
    #[cfg(test)]
    pub(crate) async fn open_temp(name: &str) -> Result<Self, StoreError> {
        let path = temp_db_path(name);
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
        Self::open(&format!("sqlite://{}", path.display())).await
    }
}

#[cfg(test)]
fn temp_db_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "plant_monitor_test_{}_{name}.db",
        std::process::id()
    ))
}

fn row_to_map(row: &SqliteRow) -> Result<Row, StoreError> {
    let mut map = Row::new();
    for column in row.columns() {
        let idx = column.ordinal();
        map.insert(column.name().to_string(), column_value(row, idx)?);
    }
    Ok(map)
}

/// Decode by the value's runtime storage class; SQLite column types are advisory.
fn column_value(row: &SqliteRow, idx: usize) -> Result<Value, StoreError> {
    let kind = {
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        raw.type_info().name().to_string()
    };

    let value = match kind.as_str() {
        "INTEGER" | "BOOLEAN" => Value::from(row.try_get_unchecked::<i64, _>(idx)?),
        "REAL" | "NUMERIC" => Value::from(row.try_get_unchecked::<f64, _>(idx)?),
        "BLOB" => Value::from(row.try_get_unchecked::<Vec<u8>, _>(idx)?),
        _ => Value::from(row.try_get_unchecked::<String, _>(idx)?),
    };
    Ok(value)
}
