use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A bookable trial-class window. Seeded administratively; `is_available`
/// flips to false exactly once, when a booking claims the slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
    pub slot_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}
