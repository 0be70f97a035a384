//! Translation between UI booking vocabulary and the server status enum
//!
//! Screens talk about "confirming" or "declining" a booking and sometimes use
//! British spelling; the API only knows `pending`, `accepted`, `completed` and
//! `canceled`. This table is the single place where the two meet.

use crate::error::{ValidationError, ValidationResult};
use crate::schema;
use crate::types::BookingStatus;

/// Every accepted spelling, lower-case
pub const STATUS_VOCABULARY: &[(&str, BookingStatus)] = &[
    ("pending", BookingStatus::Pending),
    ("accept", BookingStatus::Accepted),
    ("accepted", BookingStatus::Accepted),
    ("confirm", BookingStatus::Accepted),
    ("confirmed", BookingStatus::Accepted),
    ("complete", BookingStatus::Completed),
    ("completed", BookingStatus::Completed),
    ("cancel", BookingStatus::Canceled),
    ("canceled", BookingStatus::Canceled),
    ("cancelled", BookingStatus::Canceled),
    ("decline", BookingStatus::Canceled),
    ("declined", BookingStatus::Canceled),
];

/// Map a UI or wire word to the server status
pub fn parse_status(word: &str) -> ValidationResult<BookingStatus> {
    let word = word.trim().to_ascii_lowercase();
    STATUS_VOCABULARY
        .iter()
        .find(|(spelling, _)| *spelling == word)
        .map(|(_, status)| *status)
        .ok_or_else(|| {
            ValidationError::new(
                schema::booking::STATUS,
                "must be one of: pending, accepted, completed, canceled",
            )
        })
}
