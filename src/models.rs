use serde::{Deserialize, Serialize};

/// One database row as column name -> value, in database column order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// An id as sent by clients: devices quote their plant id (`"3"`), the app
/// sends a bare integer and JSON encoders sometimes turn that into `3.0`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum IdField {
    Int(i64),
    Float(f64),
    Text(String),
}

impl IdField {
    pub fn as_id(&self) -> Option<i64> {
        match self {
            IdField::Int(i) => Some(*i),
            // whole numbers only; 1.5 is not an id
            IdField::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Some(*f as i64)
            }
            IdField::Float(_) => None,
            IdField::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Empty strings and zero count as missing.
    pub fn is_blank(&self) -> bool {
        match self {
            IdField::Int(i) => *i == 0,
            IdField::Float(f) => *f == 0.0,
            IdField::Text(s) => s.trim().is_empty(),
        }
    }
}

impl From<i64> for IdField {
    fn from(id: i64) -> Self {
        IdField::Int(id)
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct LogDataRequest {
    pub plant_id: Option<IdField>,
    pub soil_humidity: Option<f64>,
    pub light_level: Option<f64>,
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewReading {
    pub plant_id: i64,
    pub soil_humidity: f64,
    pub light_level: f64,
    pub temperature: f64,
}

/// Echo of an ingested reading. Key names match what deployed clients parse.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogDataResponse {
    pub id: i64,
    pub plant_id: i64,
    #[serde(rename = "Humidity")]
    pub humidity: f64,
    #[serde(rename = "Light Level")]
    pub light_level: f64,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AddPlantRequest {
    pub user_id: Option<IdField>,
    #[serde(rename = "plantType")]
    pub plant_type: Option<IdField>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AddPlantResponse {
    pub plant_id: i64,
    pub user_id: i64,
    #[serde(rename = "plantType_id")]
    pub plant_type_id: i64,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoginResponse {
    pub id: i64,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AlertRequest {
    pub message: Option<String>,
    pub plant_id: Option<IdField>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AlertEcho {
    pub plant_id: i64,
    pub message: String,
}

/// A consumed alert; `timestamp` is the stored UTC value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Alert {
    pub message: String,
    pub plant_id: i64,
    pub timestamp: String,
}

/// Reference profile row written by the loader.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewPlantType {
    pub nombre: String,
    pub max_hum: f64,
    pub min_hum: f64,
    pub max_temp: f64,
    pub min_temp: f64,
    pub max_luz: f64,
    pub min_luz: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}
