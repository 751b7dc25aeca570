pub mod booking;
pub mod evaluation;
pub mod slot;
pub mod test_attempt;

pub use booking::{Booking, BookingDetails};
pub use evaluation::{CefrLevel, Evaluation, QuestionScore};
pub use slot::TimeSlot;
pub use test_attempt::{TestAnswer, TestAttempt, TestType};
