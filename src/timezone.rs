//! Read-side time zone conversion.
//!
//! Rows are written with SQLite's `CURRENT_TIMESTAMP`, which is UTC in
//! `YYYY-MM-DD HH:MM:SS` form. Nothing is converted on write; rendering
//! in the display zone happens here, just before serialization.

use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::Value;

use crate::models::Row;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a stored UTC timestamp in `tz`. Returns `None` for values that
/// do not parse as a stored timestamp.
pub fn utc_to_local(utc_timestamp: &str, tz: &Tz) -> Option<String> {
    let naive = NaiveDateTime::parse_from_str(utc_timestamp.trim(), TIMESTAMP_FORMAT).ok()?;
    let local = Utc.from_utc_datetime(&naive).with_timezone(tz);
    Some(local.format(TIMESTAMP_FORMAT).to_string())
}

/// Inverse of [`utc_to_local`], mostly useful to clients and tests.
/// Ambiguous local times (DST fold) resolve to the earlier instant.
pub fn local_to_utc(local_timestamp: &str, tz: &Tz) -> Option<NaiveDateTime> {
    let naive = NaiveDateTime::parse_from_str(local_timestamp.trim(), TIMESTAMP_FORMAT).ok()?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.naive_utc())
}

/// Convert the `timestamp` column of every row in place. Unparseable or
/// empty values become `null`.
pub fn localize_rows(rows: &mut [Row], tz: &Tz) {
    for row in rows.iter_mut() {
        if let Some(value) = row.get_mut("timestamp") {
            let local = value.as_str().and_then(|ts| utc_to_local(ts, tz));
            *value = local.map(Value::String).unwrap_or(Value::Null);
        }
    }
}
