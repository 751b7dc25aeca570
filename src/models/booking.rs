use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub slot_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub message: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A booking joined with its slot's schedule, as returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub slot_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}
