//! Load data script for the plant monitor store
//!
//! Prepares a development database:
//! - Schema: applies pending migrations
//! - Reference data: plant type threshold profiles, a demo user
//! - Plants: ids 1-5 owned by the demo user (the synthetic generator targets these)
//! - Readings: a couple of synthetic readings per plant
//! Run: cargo run --bin load_data
//! Re-running only tops up readings; reference rows are inserted once.

use plant_monitor::models::NewPlantType;
use plant_monitor::store::{Filter, Table};
use plant_monitor::{logging, seed, Config, Store};

const DEMO_USER: &str = "demo";
const DEMO_PASSWORD: &str = "demo";
const READINGS_PER_PLANT: u32 = 2;

fn plant_types() -> Vec<NewPlantType> {
    let profile = |nombre: &str, hum: (f64, f64), temp: (f64, f64), luz: (f64, f64)| NewPlantType {
        nombre: nombre.to_string(),
        max_hum: hum.1,
        min_hum: hum.0,
        max_temp: temp.1,
        min_temp: temp.0,
        max_luz: luz.1,
        min_luz: luz.0,
    };

    vec![
        profile("Albahaca", (900.0, 2500.0), (15.0, 30.0), (300.0, 900.0)),
        profile("Helecho", (1500.0, 2800.0), (12.0, 26.0), (150.0, 600.0)),
        profile("Cactus", (200.0, 900.0), (5.0, 38.0), (500.0, 1000.0)),
        profile("Tomate", (1000.0, 2600.0), (16.0, 32.0), (450.0, 1000.0)),
        profile("Potus", (800.0, 2400.0), (10.0, 30.0), (120.0, 700.0)),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    let _log_guard = logging::init(config.log_format);

    let store = Store::open(&config.database_url).await?;
    let applied = store.migrate().await?;
    tracing::info!(applied, database = %config.database_url, "schema ready");

    if store.count(Table::PlantTypes).await? == 0 {
        for plant_type in plant_types() {
            let id = store.insert_plant_type(&plant_type).await?;
            tracing::info!(id, nombre = %plant_type.nombre, "added plant type");
        }
    }

    let demo = store
        .query(Table::Users, Some(&Filter::eq("name", DEMO_USER)), false)
        .await?;
    let user_id = match demo.first().and_then(|row| row.get("id")).and_then(|v| v.as_i64()) {
        Some(id) => id,
        None => {
            let id = store.create_user(DEMO_USER, DEMO_PASSWORD).await?;
            tracing::info!(id, name = DEMO_USER, "added demo user");
            id
        }
    };

    if store.count(Table::Plants).await? == 0 {
        for plant_type_id in 1..=5 {
            let plant_id = store.insert_plant(user_id, plant_type_id).await?;
            tracing::info!(plant_id, plant_type_id, "added plant");
        }
    }

    let inserted = seed::create_data(&store, READINGS_PER_PLANT).await?;
    println!("Loaded reference data and {inserted} synthetic readings into {}", config.database_url);

    Ok(())
}
