//! Synthetic sensor readings for development databases.
//!
//! Only reachable through the dev-mode `/create_data/{count}` route and the
//! `load_data` binary.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::error::StoreError;
use crate::models::NewReading;
use crate::store::Store;

pub const SEED_PLANT_IDS: RangeInclusive<i64> = 1..=5;
pub const HUMIDITY_RANGE: RangeInclusive<i64> = 200..=3000;
pub const LIGHT_RANGE: RangeInclusive<i64> = 100..=1000;
pub const TEMPERATURE_RANGE: RangeInclusive<i64> = -8..=40;

/// Upper bound on `count` per request, to keep one call from filling the disk.
pub const MAX_SEED_COUNT: u32 = 10_000;

/// `count` random readings for each seed plant. Values are whole numbers
/// drawn uniformly from the ranges above.
pub fn synthetic_readings<R: Rng>(rng: &mut R, count: u32) -> Vec<NewReading> {
    let mut readings = Vec::with_capacity(count as usize * SEED_PLANT_IDS.clone().count());
    for plant_id in SEED_PLANT_IDS {
        for _ in 0..count {
            readings.push(NewReading {
                plant_id,
                soil_humidity: rng.gen_range(HUMIDITY_RANGE) as f64,
                light_level: rng.gen_range(LIGHT_RANGE) as f64,
                temperature: rng.gen_range(TEMPERATURE_RANGE) as f64,
            });
        }
    }
    readings
}

/// Insert `count` synthetic readings for each seed plant in one transaction.
/// Returns the number of rows written.
pub async fn create_data(store: &Store, count: u32) -> Result<u64, StoreError> {
    // ThreadRng is !Send; keep it out of the await below
    let readings = synthetic_readings(&mut rand::thread_rng(), count);
    let inserted = store.insert_readings(&readings).await?;
    tracing::info!(count, inserted, "created synthetic readings");
    Ok(inserted)
}
