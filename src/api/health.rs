use axum::response::Json;
use serde_json::{Value, json};

pub async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Spotify relay API",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
