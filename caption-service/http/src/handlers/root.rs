use axum::Json;
use serde_json::{json, Value};

pub const WELCOME_MESSAGE: &str = "Welcome to the caption API!";

pub async fn root() -> Json<Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
