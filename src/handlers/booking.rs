use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::TimeSlot;
use crate::services::booking::{self, BookingRequest};
use crate::state::AppState;

// GET /api/book-trial
#[derive(Serialize)]
pub struct SlotsResponse {
    pub slots: Vec<TimeSlot>,
}

pub async fn list_slots(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SlotsResponse>, AppError> {
    let slots = {
        let db = state.db.lock().unwrap();
        queries::list_available_slots(&db, Utc::now().date_naive(), booking::MAX_SLOTS_LISTED)?
    };

    Ok(Json(SlotsResponse { slots }))
}

// POST /api/book-trial
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let details = {
        let mut db = state.db.lock().unwrap();
        booking::create_booking(&mut db, body)?
    };

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Trial class booked successfully!",
            "booking": details,
        })),
    ))
}
