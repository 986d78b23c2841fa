//! REST API layer using Axum (exposed on $PORT, default 8080)
//!
//! HTTP/JSON endpoints for devices and the mobile app:
//! - Reads: plants, plant types, users, sensor data (timestamps localized), ranges.
//! - Writes: sensor readings, plant registration, alerts.
//! - Login (plaintext credential check) and the alert mailbox.
//! - Dev mode only: synthetic data generator.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono_tz::Tz;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{
    AddPlantRequest, AddPlantResponse, AlertEcho, AlertRequest, IdField, LogDataRequest,
    LogDataResponse, LoginRequest, LoginResponse, MessageResponse, NewReading, Row,
};
use crate::seed::{self, MAX_SEED_COUNT};
use crate::store::{Filter, RangeLookup, Store, Table};
use crate::timezone::localize_rows;

/// Shared app state for REST handlers (Arc-wrapped for concurrency)
#[derive(Clone)]
pub struct AppState {
    store: Store,
    timezone: Tz,
    dev_mode: bool,
}

impl AppState {
    pub fn new(store: Store, timezone: Tz, dev_mode: bool) -> Self {
        Self {
            store,
            timezone,
            dev_mode,
        }
    }

    pub fn from_config(store: Store, config: &Config) -> Self {
        Self::new(store, config.timezone, config.debug)
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Create Axum router with the plant monitor endpoints
pub fn create_router(state: AppState) -> Router {
    let dev_mode = state.dev_mode;
    let state = Arc::new(state);

    let mut router = Router::new()
        .route("/health", get(health_handler))
        .route("/getrange/:plant_id", get(range_handler))
        .route("/plants", get(plants_handler))
        .route("/plants/:user_id", get(plants_by_user_handler))
        .route("/plant_types", get(plant_types_handler))
        .route("/users", get(users_handler))
        .route("/data", get(data_handler))
        .route("/data/:plant_id", get(data_by_plant_handler))
        .route("/logdata", post(log_data_handler))
        .route("/addplant", post(add_plant_handler))
        .route("/login", post(login_handler))
        .route("/alert", post(alert_handler))
        .route("/getalert", get(get_alert_handler));

    if dev_mode {
        tracing::warn!("dev mode: mounting /create_data/:count");
        router = router.route("/create_data/:count", get(create_data_handler));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    state.store.ping().await?;
    Ok(Json(json!({ "status": "ok" })))
}

async fn range_handler(
    State(state): State<Arc<AppState>>,
    plant_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Row>> {
    let Path(plant_id) = plant_id?;

    match state.store.plant_range(plant_id).await? {
        RangeLookup::Found(row) => Ok(Json(row)),
        RangeLookup::NoPlant => Err(ApiError::NotFound(
            "No plant found with the specified ID".to_string(),
        )),
        RangeLookup::NoPlantType(type_id) => {
            tracing::warn!(plant_id, type_id, "plant references a missing plant type");
            Err(ApiError::NotFound(
                "No data found for the specified plant type".to_string(),
            ))
        }
    }
}

async fn plants_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Row>>> {
    Ok(Json(state.store.query(Table::Plants, None, false).await?))
}

async fn plants_by_user_handler(
    State(state): State<Arc<AppState>>,
    user_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<Row>>> {
    let Path(user_id) = user_id?;
    let filter = Filter::eq("user_id", user_id);
    Ok(Json(state.store.query(Table::Plants, Some(&filter), false).await?))
}

async fn plant_types_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Row>>> {
    Ok(Json(state.store.query(Table::PlantTypes, None, false).await?))
}

async fn users_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Row>>> {
    Ok(Json(state.store.query(Table::Users, None, false).await?))
}

async fn data_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Row>>> {
    let mut rows = state.store.query(Table::Data, None, false).await?;
    localize_rows(&mut rows, &state.timezone);
    Ok(Json(rows))
}

async fn data_by_plant_handler(
    State(state): State<Arc<AppState>>,
    plant_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<Row>>> {
    let Path(plant_id) = plant_id?;
    let filter = Filter::eq("plant_id", plant_id);
    let mut rows = state.store.query(Table::Data, Some(&filter), false).await?;
    localize_rows(&mut rows, &state.timezone);
    Ok(Json(rows))
}

/// Handler: ingest one sensor reading. All four fields are required; the
/// columns are NOT NULL so a null could never be stored anyway.
async fn log_data_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LogDataRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<LogDataResponse>)> {
    let Json(payload) = payload?;

    let plant_id = required_id(payload.plant_id.as_ref(), "Plant id is required")?;
    let reading = NewReading {
        plant_id,
        soil_humidity: payload
            .soil_humidity
            .ok_or_else(|| ApiError::BadRequest("Humidity is required".to_string()))?,
        light_level: payload
            .light_level
            .ok_or_else(|| ApiError::BadRequest("Light level is required".to_string()))?,
        temperature: payload
            .temperature
            .ok_or_else(|| ApiError::BadRequest("Temperature is required".to_string()))?,
    };

    let id = state.store.insert_reading(&reading).await?;
    tracing::debug!(id, plant_id, "logged sensor reading");

    Ok((
        StatusCode::CREATED,
        Json(LogDataResponse {
            id,
            plant_id,
            humidity: reading.soil_humidity,
            light_level: reading.light_level,
            temperature: reading.temperature,
        }),
    ))
}

async fn add_plant_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddPlantRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AddPlantResponse>)> {
    let Json(payload) = payload?;

    let user_id = required_id(payload.user_id.as_ref(), "user_id is required")?;
    let plant_type_id = required_id(payload.plant_type.as_ref(), "plantType is required")?;

    let plant_id = state.store.insert_plant(user_id, plant_type_id).await?;
    tracing::info!(plant_id, user_id, plant_type_id, "registered plant");

    Ok((
        StatusCode::CREATED,
        Json(AddPlantResponse {
            plant_id,
            user_id,
            plant_type_id,
        }),
    ))
}

/// Handler: plaintext credential check. Unknown user and wrong password
/// share one response so usernames cannot be probed.
async fn login_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(payload) = payload?;

    let username = payload
        .username
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::BadRequest("username not detected".to_string()))?;
    let password = payload
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("password not detected".to_string()))?;

    match state.store.check_login(&username, &password).await? {
        Some(id) => Ok(Json(LoginResponse { id })),
        None => {
            tracing::info!("rejected login attempt");
            Err(ApiError::Conflict("Wrong username or password".to_string()))
        }
    }
}

async fn alert_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AlertRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AlertEcho>)> {
    let Json(payload) = payload?;

    let message = payload
        .message
        .ok_or_else(|| ApiError::BadRequest("message is required".to_string()))?;
    let plant_id = payload
        .plant_id
        .as_ref()
        .and_then(IdField::as_id)
        .ok_or_else(|| ApiError::BadRequest("plant_id is required".to_string()))?;

    state.store.insert_alert(&message, plant_id).await?;
    tracing::info!(plant_id, "alert queued");

    Ok((StatusCode::CREATED, Json(AlertEcho { plant_id, message })))
}

/// Handler: pop the latest alert. An empty mailbox answers `""`, which is
/// what the app polls for.
async fn get_alert_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    match state.store.take_latest_alert().await? {
        Some(alert) => Ok(Json(json!(alert))),
        None => Ok(Json(Value::String(String::new()))),
    }
}

async fn create_data_handler(
    State(state): State<Arc<AppState>>,
    count: Result<Path<u32>, PathRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Path(count) = count?;
    if count > MAX_SEED_COUNT {
        return Err(ApiError::BadRequest(format!(
            "count must be at most {MAX_SEED_COUNT}"
        )));
    }

    seed::create_data(&state.store, count).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("Created {count} more entries for ids 1-5"),
        }),
    ))
}

/// Present, non-blank and numeric, or a 400 with `message`.
fn required_id(field: Option<&IdField>, message: &str) -> ApiResult<i64> {
    field
        .filter(|id| !id.is_blank())
        .and_then(IdField::as_id)
        .ok_or_else(|| ApiError::BadRequest(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TIMEZONE;
    use crate::models::NewPlantType;
    use crate::timezone::{local_to_utc, TIMESTAMP_FORMAT};
    use axum::{body::Body, http::Request};
    use tower::ServiceExt; // For .oneshot() testing

    async fn setup(name: &str, dev_mode: bool) -> (Router, Store) {
        let store = Store::open_temp(name).await.expect("Storage for REST test");
        store.migrate().await.expect("migrate for REST test");
        let app = create_router(AppState::new(store.clone(), DEFAULT_TIMEZONE, dev_mode));
        (app, store)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri).method(method);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .expect("request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, value)
    }

    fn fern() -> NewPlantType {
        NewPlantType {
            nombre: "Fern".to_string(),
            max_hum: 2800.0,
            min_hum: 1500.0,
            max_temp: 26.0,
            min_temp: 12.0,
            max_luz: 600.0,
            min_luz: 150.0,
        }
    }

    #[tokio::test]
    async fn test_rest_health() {
        let (app, _) = setup("rest_health", false).await;
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_getrange_returns_plant_type_row() {
        let (app, store) = setup("rest_getrange", false).await;
        let type_id = store.insert_plant_type(&fern()).await.unwrap();
        let plant_id = store.insert_plant(1, type_id).await.unwrap();

        let (status, body) = send(&app, "GET", &format!("/getrange/{plant_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "id": type_id,
                "nombre": "Fern",
                "max_hum": 2800.0,
                "min_hum": 1500.0,
                "max_temp": 26.0,
                "min_temp": 12.0,
                "max_luz": 600.0,
                "min_luz": 150.0
            })
        );
    }

    #[tokio::test]
    async fn test_getrange_not_found() {
        let (app, store) = setup("rest_getrange_404", false).await;
        let orphan = store.insert_plant(1, 77).await.unwrap();

        let (status, body) = send(&app, "GET", "/getrange/12345", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "No plant found with the specified ID" }));

        let (status, body) = send(&app, "GET", &format!("/getrange/{orphan}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "No data found for the specified plant type" }));

        let (status, body) = send(&app, "GET", "/getrange/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_list_endpoints() {
        let (app, store) = setup("rest_lists", false).await;
        store.create_user("ana", "secret").await.unwrap();
        let type_id = store.insert_plant_type(&fern()).await.unwrap();
        store.insert_plant(1, type_id).await.unwrap();
        store.insert_plant(2, type_id).await.unwrap();

        let (status, plants) = send(&app, "GET", "/plants", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(plants.as_array().unwrap().len(), 2);

        let (status, mine) = send(&app, "GET", "/plants/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mine, json!([{ "plant_id": 2, "user_id": 2, "plantType_id": type_id }]));

        let (status, none) = send(&app, "GET", "/plants/99", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(none, json!([]));

        let (status, types) = send(&app, "GET", "/plant_types", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(types[0]["nombre"], json!("Fern"));

        let (status, users) = send(&app, "GET", "/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(users, json!([{ "id": 1, "name": "ana" }]));
    }

    #[tokio::test]
    async fn test_logdata_then_read_back_localized() {
        let (app, _) = setup("rest_logdata", false).await;

        let (status, echo) = send(
            &app,
            "POST",
            "/logdata",
            Some(json!({
                "plant_id": "2",
                "soil_humidity": 134.42,
                "light_level": 835.43,
                "temperature": 23.42
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(echo["plant_id"], json!(2));
        assert_eq!(echo["Humidity"], json!(134.42));
        assert!(echo["id"].as_i64().unwrap() > 0);
        let logged_at = chrono::Utc::now().naive_utc();

        let (status, rows) = send(&app, "GET", "/data/2", None).await;
        assert_eq!(status, StatusCode::OK);
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["soil_humidity"], json!(134.42));
        assert_eq!(rows[0]["light_level"], json!(835.43));
        assert_eq!(rows[0]["temperature"], json!(23.42));

        let local = rows[0]["timestamp"].as_str().unwrap();
        let utc = local_to_utc(local, &DEFAULT_TIMEZONE).unwrap();
        let drift = (logged_at - utc).num_seconds().abs();
        assert!(drift <= 2, "timestamp {local} drifted {drift}s");
        // rendered local time is not the stored UTC value
        assert_ne!(local, utc.format(TIMESTAMP_FORMAT).to_string());

        let (status, all) = send(&app, "GET", "/data", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.as_array().unwrap().len(), 1);
        assert_eq!(all[0]["timestamp"], json!(local));

        let (_, other) = send(&app, "GET", "/data/3", None).await;
        assert_eq!(other, json!([]));
    }

    #[tokio::test]
    async fn test_logdata_missing_field() {
        let (app, store) = setup("rest_logdata_400", false).await;

        let (status, body) = send(
            &app,
            "POST",
            "/logdata",
            Some(json!({ "plant_id": 1, "soil_humidity": 1.0, "light_level": 2.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Temperature is required" }));

        let (status, _) = send(
            &app,
            "POST",
            "/logdata",
            Some(json!({ "plant_id": null, "soil_humidity": 1.0, "light_level": 2.0, "temperature": 3.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(store.count(Table::Data).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_logdata_rejects_non_numeric_plant_id() {
        let (app, store) = setup("rest_logdata_bad_id", false).await;

        let (status, body) = send(
            &app,
            "POST",
            "/logdata",
            Some(json!({ "plant_id": "abc", "soil_humidity": 1.0, "light_level": 2.0, "temperature": 3.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Plant id is required" }));
        assert_eq!(store.count(Table::Data).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_non_numeric_path_ids() {
        let (app, _) = setup("rest_bad_path_ids", false).await;

        for uri in ["/plants/abc", "/data/abc", "/getrange/abc"] {
            let (status, body) = send(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body["error"].is_string(), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_addplant_accepts_whole_float_ids() {
        let (app, store) = setup("rest_addplant_float", false).await;

        let (status, body) = send(
            &app,
            "POST",
            "/addplant",
            Some(json!({ "user_id": 1, "plantType": 1.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["plantType_id"], json!(1));

        let (status, body) = send(
            &app,
            "POST",
            "/addplant",
            Some(json!({ "user_id": 1, "plantType": 1.5 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "plantType is required" }));
        assert_eq!(store.count(Table::Plants).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_addplant() {
        let (app, store) = setup("rest_addplant", false).await;
        let existing = store.insert_plant(1, 1).await.unwrap();

        let (status, body) = send(&app, "POST", "/addplant", Some(json!({ "plantType": 1 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "user_id is required" }));

        let (status, body) = send(&app, "POST", "/addplant", Some(json!({ "user_id": 1 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "plantType is required" }));

        let (status, body) = send(
            &app,
            "POST",
            "/addplant",
            Some(json!({ "user_id": 1, "plantType": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let new_id = body["plant_id"].as_i64().unwrap();
        assert_ne!(new_id, existing);
        assert_eq!(body, json!({ "plant_id": new_id, "user_id": 1, "plantType_id": 3 }));
        assert_eq!(store.count(Table::Plants).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_login() {
        let (app, store) = setup("rest_login", false).await;
        let id = store.create_user("ana", "secret").await.unwrap();

        let (status, body) = send(
            &app,
            "POST",
            "/login",
            Some(json!({ "username": "ana", "password": "secret" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": id }));

        let wrong_password = send(
            &app,
            "POST",
            "/login",
            Some(json!({ "username": "ana", "password": "nope" })),
        )
        .await;
        let unknown_user = send(
            &app,
            "POST",
            "/login",
            Some(json!({ "username": "bob", "password": "secret" })),
        )
        .await;
        assert_eq!(wrong_password.0, StatusCode::CONFLICT);
        assert_eq!(wrong_password, unknown_user);
    }

    #[tokio::test]
    async fn test_login_validation_is_json() {
        let (app, _) = setup("rest_login_400", false).await;

        let (status, body) = send(&app, "POST", "/login", Some(json!({ "password": "x" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "username not detected" }));

        let (status, body) = send(
            &app,
            "POST",
            "/login",
            Some(json!({ "username": "ana", "password": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "password not detected" }));

        // malformed body still answers with the JSON error shape
        let request = Request::builder()
            .uri("/login")
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_alert_mailbox_consumes_once() {
        let (app, _) = setup("rest_alerts", false).await;

        let (status, echo) = send(
            &app,
            "POST",
            "/alert",
            Some(json!({ "message": "Luz por debajo del rango minimo", "plant_id": 4 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(echo, json!({ "plant_id": 4, "message": "Luz por debajo del rango minimo" }));

        let (status, first) = send(&app, "GET", "/getalert", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["message"], json!("Luz por debajo del rango minimo"));
        assert_eq!(first["plant_id"], json!(4));
        assert!(first["timestamp"].is_string());

        let (status, second) = send(&app, "GET", "/getalert", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second, json!(""));
    }

    #[tokio::test]
    async fn test_alert_missing_field() {
        let (app, store) = setup("rest_alert_400", false).await;

        let (status, body) = send(&app, "POST", "/alert", Some(json!({ "message": "x" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "plant_id is required" }));

        let (status, body) = send(&app, "POST", "/alert", Some(json!({ "plant_id": 1 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "message is required" }));

        assert_eq!(store.count(Table::Alerts).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_getalert_single_delivery() {
        let (app, store) = setup("rest_alerts_race", false).await;
        store.insert_alert("water me", 1).await.unwrap();

        let (a, b) = tokio::join!(
            send(&app, "GET", "/getalert", None),
            send(&app, "GET", "/getalert", None)
        );
        assert_eq!(a.0, StatusCode::OK);
        assert_eq!(b.0, StatusCode::OK);

        let delivered = [a.1, b.1]
            .into_iter()
            .filter(|body| body != &json!(""))
            .count();
        assert_eq!(delivered, 1);
        assert_eq!(store.count(Table::Alerts).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_data_only_in_dev_mode() {
        let (app, store) = setup("rest_create_data_off", false).await;
        let (status, _) = send(&app, "GET", "/create_data/2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(store.count(Table::Data).await.unwrap(), 0);

        let (app, store) = setup("rest_create_data_on", true).await;
        let (status, body) = send(&app, "GET", "/create_data/2", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "message": "Created 2 more entries for ids 1-5" }));
        assert_eq!(store.count(Table::Data).await.unwrap(), 10);

        let (status, _) = send(&app, "GET", "/create_data/999999", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
