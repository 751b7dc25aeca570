use chrono::{Duration, Utc};
use rusqlite::Connection;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::BookingDetails;

/// Listings never return more than this many upcoming slots.
pub const MAX_SLOTS_LISTED: i64 = 50;

const COOLDOWN_HOURS: i64 = 24;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
    pub message: Option<String>,
    pub slot_id: Option<String>,
}

struct ValidBooking {
    name: String,
    phone: String,
    email: String,
    course: String,
    message: Option<String>,
    slot_id: String,
}

/// Validates, enforces the per-email cooldown, then claims the slot and
/// inserts the booking through the storage layer's single transaction.
pub fn create_booking(
    conn: &mut Connection,
    request: BookingRequest,
) -> Result<BookingDetails, AppError> {
    let valid = validate(request)?;

    let now = Utc::now().naive_utc();
    let window_start = now - Duration::hours(COOLDOWN_HOURS);
    if let Some(last) = queries::latest_booking_since(conn, &valid.email, &window_start)? {
        let retry_at = last + Duration::hours(COOLDOWN_HOURS);
        return Err(AppError::RateLimited(format!(
            "You have already booked a trial class in the last 24 hours. You can book again after {}.",
            retry_at.format("%Y-%m-%d %H:%M")
        )));
    }

    let booking_id = queries::book_slot(
        conn,
        &valid.slot_id,
        &valid.name,
        &valid.email,
        &valid.phone,
        &valid.course,
        valid.message.as_deref(),
    )?
    .ok_or_else(|| {
        AppError::Conflict("This time slot is no longer available. Please select another.".to_string())
    })?;

    tracing::info!(booking_id = %booking_id, slot_id = %valid.slot_id, "trial class booked");

    queries::get_booking_details(conn, &booking_id)?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("booking {booking_id} missing after insert")))
}

// First failure wins.
fn validate(request: BookingRequest) -> Result<ValidBooking, AppError> {
    let (Some(name), Some(phone), Some(email), Some(course), Some(slot_id)) = (
        non_empty(request.name),
        non_empty(request.phone),
        non_empty(request.email),
        non_empty(request.course),
        non_empty(request.slot_id),
    ) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    let name = name.trim().to_string();
    let name_len = name.chars().count();
    if !(2..=100).contains(&name_len) {
        return Err(AppError::Validation(
            "Invalid name (2-100 characters required)".to_string(),
        ));
    }

    let email = email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(AppError::Validation("Invalid email format".to_string()));
    }

    let phone = phone.trim().to_string();
    if !is_valid_phone(&phone) {
        return Err(AppError::Validation(
            "Invalid phone number (10-15 digits required)".to_string(),
        ));
    }

    Ok(ValidBooking {
        name,
        phone,
        email,
        course,
        message: request
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty()),
        slot_id,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// local@domain.tld shape: no whitespace, exactly one '@', dotted domain.
fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

// 10-15 digits once display separators (spaces, hyphens) are stripped.
fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone.chars().filter(|c| *c != ' ' && *c != '-').collect();
    (10..=15).contains(&digits.chars().count()) && digits.chars().all(|c| c.is_ascii_digit())
}
