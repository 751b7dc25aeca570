pub mod audio;
pub mod booking;
pub mod chat;
pub mod evaluate;
pub mod health;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "API endpoint not found" })),
    )
}
