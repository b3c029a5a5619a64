use axum::{
    http::header,
    response::{IntoResponse, Json},
};
use serde_json::{Value, json};

pub async fn index() -> &'static str {
    "sporelay is live!"
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn openapi() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/yaml")],
        include_str!("../../openapi.yaml"),
    )
}
