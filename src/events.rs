use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{BorrowRejection, ReturnRejection};

/// Outcome of a single lending operation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LendingEvent {
    /// Copies were added to (or removed from) the inventory
    BookAdded { book_id: String, quantity: i32, available: i32 },
    /// A copy was lent to a user
    Borrowed { book_id: String, user_id: String },
    /// A borrow request was refused
    BorrowRejected { book_id: String, user_id: String, reason: BorrowRejection },
    /// A copy came back from its borrower
    Returned { book_id: String, user_id: String },
    /// A return request was refused
    ReturnRejected { book_id: String, user_id: String, reason: ReturnRejection },
}

/// A serializable wall-clock timestamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub struct TimeStamp {
    /// Seconds since Unix epoch
    pub seconds: u64,
    /// Nanoseconds part
    pub nanos: u32,
}

impl TimeStamp {
    /// Capture the current system time.
    ///
    /// A clock set before the Unix epoch yields the zero timestamp.
    #[must_use]
    pub fn now() -> Self {
        let duration = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        Self { seconds: duration.as_secs(), nanos: duration.subsec_nanos() }
    }
}

/// An event together with the moment it happened
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LendingRecord {
    /// What happened
    pub event: LendingEvent,
    /// When it happened
    pub timestamp: TimeStamp,
}

impl LendingRecord {
    /// Stamp an event with the current time
    #[must_use]
    pub fn now(event: LendingEvent) -> Self {
        Self { event, timestamp: TimeStamp::now() }
    }
}
