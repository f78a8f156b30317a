use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by library operations that cannot be answered with a plain refusal
#[derive(Debug, Error)]
pub enum LibraryError {
    /// A late fee was requested for a negative number of overdue days
    #[error("Overdue days cannot be negative.")]
    NegativeOverdueDays,
    /// The configuration could not be read or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
    /// The lending history could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a borrow request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Deserialize, Serialize)]
pub enum BorrowRejection {
    /// The user service reports the account as inactive
    #[error("account is not active")]
    InactiveAccount,
    /// The book has never been added to the inventory
    #[error("book is not in the inventory")]
    UnknownBook,
    /// The book is known but has no copies left to lend
    #[error("no copies available")]
    NoCopiesAvailable,
}

/// Why a return request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Deserialize, Serialize)]
pub enum ReturnRejection {
    /// The book has no active loan
    #[error("book is not on loan")]
    NotBorrowed,
    /// The book is on loan to somebody else
    #[error("book is on loan to another user")]
    BorrowedByAnotherUser,
}
