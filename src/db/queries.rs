use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{BookingDetails, CefrLevel, TestAttempt, TestType, TimeSlot};

const DATE_FMT: &str = "%Y-%m-%d";
const TIME_FMT: &str = "%H:%M:%S";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

// ── Time slots ──

pub fn insert_time_slot(conn: &Connection, slot: &TimeSlot) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO time_slots (id, slot_date, start_time, end_time, is_available)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            slot.id,
            slot.slot_date.format(DATE_FMT).to_string(),
            slot.start_time.format(TIME_FMT).to_string(),
            slot.end_time.format(TIME_FMT).to_string(),
            slot.is_available as i32,
        ],
    )?;
    Ok(())
}

pub fn list_available_slots(
    conn: &Connection,
    from: NaiveDate,
    limit: i64,
) -> anyhow::Result<Vec<TimeSlot>> {
    let mut stmt = conn.prepare(
        "SELECT id, slot_date, start_time, end_time, is_available
         FROM time_slots
         WHERE is_available = 1 AND slot_date >= ?1
         ORDER BY slot_date, start_time
         LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![from.format(DATE_FMT).to_string(), limit], |row| {
        Ok(parse_slot_row(row))
    })?;

    let mut slots = vec![];
    for row in rows {
        slots.push(row??);
    }
    Ok(slots)
}

pub fn get_slot(conn: &Connection, id: &str) -> anyhow::Result<Option<TimeSlot>> {
    let result = conn.query_row(
        "SELECT id, slot_date, start_time, end_time, is_available
         FROM time_slots WHERE id = ?1",
        params![id],
        |row| Ok(parse_slot_row(row)),
    );

    match result {
        Ok(slot) => Ok(Some(slot?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_slot_row(row: &rusqlite::Row) -> anyhow::Result<TimeSlot> {
    let id: String = row.get(0)?;
    let slot_date: String = row.get(1)?;
    let start_time: String = row.get(2)?;
    let end_time: String = row.get(3)?;
    let is_available: i32 = row.get(4)?;

    Ok(TimeSlot {
        id,
        slot_date: NaiveDate::parse_from_str(&slot_date, DATE_FMT).unwrap_or_default(),
        start_time: NaiveTime::parse_from_str(&start_time, TIME_FMT).unwrap_or_default(),
        end_time: NaiveTime::parse_from_str(&end_time, TIME_FMT).unwrap_or_default(),
        is_available: is_available != 0,
    })
}

// ── Bookings ──

/// Claims the slot and inserts the booking as one transaction. Returns the
/// new booking id, or `None` when the slot was already taken (or unknown).
///
/// The availability check and the flip happen in a single UPDATE, so two
/// concurrent callers can never both claim the same slot; the loser's
/// transaction rolls back without inserting anything.
pub fn book_slot(
    conn: &mut Connection,
    slot_id: &str,
    name: &str,
    email: &str,
    phone: &str,
    course: &str,
    message: Option<&str>,
) -> anyhow::Result<Option<String>> {
    let tx = conn.transaction()?;

    let claimed = tx.execute(
        "UPDATE time_slots SET is_available = 0 WHERE id = ?1 AND is_available = 1",
        params![slot_id],
    )?;
    if claimed == 0 {
        return Ok(None);
    }

    let id = uuid::Uuid::new_v4().to_string();
    let created_at = Utc::now().naive_utc().format(DATETIME_FMT).to_string();

    tx.execute(
        "INSERT INTO bookings (id, slot_id, name, email, phone, course, message, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![id, slot_id, name, email, phone, course, message, created_at],
    )?;

    tx.commit()?;
    Ok(Some(id))
}

/// Most recent booking timestamp for this email after `since`, if any.
pub fn latest_booking_since(
    conn: &Connection,
    email: &str,
    since: &NaiveDateTime,
) -> anyhow::Result<Option<NaiveDateTime>> {
    let result = conn.query_row(
        "SELECT created_at FROM bookings
         WHERE email = ?1 AND created_at > ?2
         ORDER BY created_at DESC LIMIT 1",
        params![email, since.format(DATETIME_FMT).to_string()],
        |row| row.get::<_, String>(0),
    );

    match result {
        Ok(created_at) => Ok(Some(
            NaiveDateTime::parse_from_str(&created_at, DATETIME_FMT)
                .unwrap_or_else(|_| Utc::now().naive_utc()),
        )),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_booking_details(conn: &Connection, id: &str) -> anyhow::Result<Option<BookingDetails>> {
    let result = conn.query_row(
        "SELECT b.id, b.slot_id, b.name, b.email, b.phone, b.course, b.message, b.created_at,
                ts.slot_date, ts.start_time, ts.end_time
         FROM bookings b
         JOIN time_slots ts ON b.slot_id = ts.id
         WHERE b.id = ?1",
        params![id],
        |row| {
            let created_at: String = row.get(7)?;
            let slot_date: String = row.get(8)?;
            let start_time: String = row.get(9)?;
            let end_time: String = row.get(10)?;

            Ok(BookingDetails {
                booking: crate::models::Booking {
                    id: row.get(0)?,
                    slot_id: row.get(1)?,
                    name: row.get(2)?,
                    email: row.get(3)?,
                    phone: row.get(4)?,
                    course: row.get(5)?,
                    message: row.get(6)?,
                    created_at: NaiveDateTime::parse_from_str(&created_at, DATETIME_FMT)
                        .unwrap_or_else(|_| Utc::now().naive_utc()),
                },
                slot_date: NaiveDate::parse_from_str(&slot_date, DATE_FMT).unwrap_or_default(),
                start_time: NaiveTime::parse_from_str(&start_time, TIME_FMT).unwrap_or_default(),
                end_time: NaiveTime::parse_from_str(&end_time, TIME_FMT).unwrap_or_default(),
            })
        },
    );

    match result {
        Ok(details) => Ok(Some(details)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Test attempts ──

pub fn insert_test_attempt(conn: &Connection, attempt: &TestAttempt) -> anyhow::Result<()> {
    let answers = serde_json::to_string(&attempt.answers)?;
    let ai_evaluation = serde_json::to_string(&attempt.ai_evaluation)?;
    let completed_at = attempt.completed_at.format(DATETIME_FMT).to_string();

    conn.execute(
        "INSERT INTO test_attempts (id, test_type, user_name, user_email, answers,
                                    score_percentage, cefr_level, recommended_course,
                                    ai_evaluation, completed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            attempt.id,
            attempt.test_type.as_str(),
            attempt.user_name,
            attempt.user_email,
            answers,
            attempt.score_percentage,
            attempt.cefr_level.as_str(),
            attempt.recommended_course,
            ai_evaluation,
            completed_at,
        ],
    )?;
    Ok(())
}

pub fn get_test_attempt(conn: &Connection, id: &str) -> anyhow::Result<Option<TestAttempt>> {
    let result = conn.query_row(
        "SELECT id, test_type, user_name, user_email, answers, score_percentage,
                cefr_level, recommended_course, ai_evaluation, completed_at
         FROM test_attempts WHERE id = ?1",
        params![id],
        |row| {
            let test_type: String = row.get(1)?;
            let answers_json: String = row.get(4)?;
            let cefr_level: String = row.get(6)?;
            let ai_evaluation_json: String = row.get(8)?;
            let completed_at: String = row.get(9)?;

            Ok(TestAttempt {
                id: row.get(0)?,
                test_type: TestType::parse(&test_type),
                user_name: row.get(2)?,
                user_email: row.get(3)?,
                answers: serde_json::from_str(&answers_json).unwrap_or_default(),
                score_percentage: row.get(5)?,
                cefr_level: CefrLevel::parse(&cefr_level),
                recommended_course: row.get(7)?,
                ai_evaluation: serde_json::from_str(&ai_evaluation_json)
                    .unwrap_or(serde_json::Value::Null),
                completed_at: NaiveDateTime::parse_from_str(&completed_at, DATETIME_FMT)
                    .unwrap_or_else(|_| Utc::now().naive_utc()),
            })
        },
    );

    match result {
        Ok(attempt) => Ok(Some(attempt)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn setup_db() -> Connection {
        db::init_db(":memory:").unwrap()
    }

    fn slot(id: &str, date: &str, start: &str) -> TimeSlot {
        TimeSlot {
            id: id.to_string(),
            slot_date: NaiveDate::parse_from_str(date, DATE_FMT).unwrap(),
            start_time: NaiveTime::parse_from_str(start, TIME_FMT).unwrap(),
            end_time: NaiveTime::parse_from_str(start, TIME_FMT).unwrap() + chrono::Duration::hours(1),
            is_available: true,
        }
    }

    #[test]
    fn test_book_slot_claims_exactly_once() {
        let mut conn = setup_db();
        insert_time_slot(&conn, &slot("s1", "2099-01-10", "10:00:00")).unwrap();

        let first = book_slot(&mut conn, "s1", "Asha", "asha@example.com", "9876543210", "student", None)
            .unwrap();
        assert!(first.is_some());

        let second = book_slot(&mut conn, "s1", "Ravi", "ravi@example.com", "9876543211", "student", None)
            .unwrap();
        assert!(second.is_none());

        let s = get_slot(&conn, "s1").unwrap().unwrap();
        assert!(!s.is_available);
    }

    #[test]
    fn test_book_slot_unknown_slot() {
        let mut conn = setup_db();
        let result =
            book_slot(&mut conn, "nope", "Asha", "asha@example.com", "9876543210", "student", None)
                .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_lost_claim_inserts_nothing() {
        let mut conn = setup_db();
        insert_time_slot(&conn, &slot("s1", "2099-01-10", "10:00:00")).unwrap();

        book_slot(&mut conn, "s1", "Asha", "asha@example.com", "9876543210", "student", None).unwrap();
        book_slot(&mut conn, "s1", "Ravi", "ravi@example.com", "9876543211", "student", None).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM bookings WHERE slot_id = 's1'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_listing_orders_and_filters() {
        let conn = setup_db();
        insert_time_slot(&conn, &slot("later", "2099-01-11", "09:00:00")).unwrap();
        insert_time_slot(&conn, &slot("early", "2099-01-10", "09:00:00")).unwrap();
        insert_time_slot(&conn, &slot("midday", "2099-01-10", "14:00:00")).unwrap();
        insert_time_slot(&conn, &slot("past", "2000-01-01", "09:00:00")).unwrap();

        let from = NaiveDate::parse_from_str("2099-01-01", DATE_FMT).unwrap();
        let slots = list_available_slots(&conn, from, 50).unwrap();
        let ids: Vec<&str> = slots.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "midday", "later"]);
    }

    #[test]
    fn test_booked_slot_leaves_listing() {
        let mut conn = setup_db();
        insert_time_slot(&conn, &slot("s1", "2099-01-10", "10:00:00")).unwrap();
        book_slot(&mut conn, "s1", "Asha", "asha@example.com", "9876543210", "student", None).unwrap();

        let from = NaiveDate::parse_from_str("2099-01-01", DATE_FMT).unwrap();
        assert!(list_available_slots(&conn, from, 50).unwrap().is_empty());
    }

    #[test]
    fn test_booking_details_join_slot() {
        let mut conn = setup_db();
        insert_time_slot(&conn, &slot("s1", "2099-01-10", "10:00:00")).unwrap();
        let id = book_slot(&mut conn, "s1", "Asha", "asha@example.com", "9876543210", "student", Some("hi"))
            .unwrap()
            .unwrap();

        let details = get_booking_details(&conn, &id).unwrap().unwrap();
        assert_eq!(details.booking.email, "asha@example.com");
        assert_eq!(details.slot_date.to_string(), "2099-01-10");
        assert_eq!(details.start_time.to_string(), "10:00:00");
    }

    #[test]
    fn test_test_attempt_round_trip() {
        let conn = setup_db();
        let attempt = TestAttempt {
            id: "att-1".to_string(),
            test_type: TestType::Written,
            user_name: Some("Asha".to_string()),
            user_email: None,
            answers: vec![],
            score_percentage: 80,
            cefr_level: CefrLevel::C1,
            recommended_course: "Professional English".to_string(),
            ai_evaluation: serde_json::json!({"summary": "solid"}),
            completed_at: Utc::now().naive_utc(),
        };
        insert_test_attempt(&conn, &attempt).unwrap();

        let loaded = get_test_attempt(&conn, "att-1").unwrap().unwrap();
        assert_eq!(loaded.score_percentage, 80);
        assert_eq!(loaded.cefr_level, CefrLevel::C1);
        assert_eq!(loaded.ai_evaluation["summary"], "solid");
    }
}
