use std::{collections::HashMap, fmt};

use crate::{
    config::LibraryConfig,
    error::{BorrowRejection, LibraryError, ReturnRejection},
    events::{LendingEvent, LendingRecord},
    fee::FeePolicy,
    services::{NotificationService, UserService},
};

/// Message sent when an inactive account tries to borrow
pub const INACTIVE_ACCOUNT_MESSAGE: &str = "Your account is not active.";

/// In-memory lending desk: tracks copies on the shelf and who holds what
pub struct LibraryManager {
    /// Available copies per book id
    inventory: HashMap<String, i32>,
    /// Current borrower per book id
    loans: HashMap<String, String>,
    /// Record of lending outcomes, oldest first
    history: Vec<LendingRecord>,
    /// Maximum number of history entries to keep
    max_history_size: usize,
    /// Late fee constants
    fee_policy: FeePolicy,
    /// Account activity lookup
    user_service: Box<dyn UserService>,
    /// Outgoing user messages
    notification_service: Box<dyn NotificationService>,
}

// Collaborators are trait objects without Debug
impl fmt::Debug for LibraryManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryManager")
            .field("inventory", &self.inventory)
            .field("loans", &self.loans)
            .field("history_len", &self.history.len())
            .field("max_history_size", &self.max_history_size)
            .field("fee_policy", &self.fee_policy)
            .finish_non_exhaustive()
    }
}

impl LibraryManager {
    /// Create a manager with the default configuration
    #[must_use]
    pub fn new(
        user_service: Box<dyn UserService>,
        notification_service: Box<dyn NotificationService>,
    ) -> Self {
        Self::from_parts(&LibraryConfig::default(), user_service, notification_service)
    }

    /// Create a manager with an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Config` if any fee constant in `config` is
    /// negative or not finite
    pub fn with_config(
        config: &LibraryConfig,
        user_service: Box<dyn UserService>,
        notification_service: Box<dyn NotificationService>,
    ) -> Result<Self, LibraryError> {
        config.validate()?;
        Ok(Self::from_parts(config, user_service, notification_service))
    }

    /// Assemble a manager from an already validated configuration
    fn from_parts(
        config: &LibraryConfig,
        user_service: Box<dyn UserService>,
        notification_service: Box<dyn NotificationService>,
    ) -> Self {
        Self {
            inventory: HashMap::new(),
            loans: HashMap::new(),
            history: Vec::new(),
            max_history_size: config.max_history_size,
            fee_policy: config.fee,
            user_service,
            notification_service,
        }
    }

    /// Add `quantity` copies of a book, registering it if unseen.
    ///
    /// Zero and negative quantities are applied as given. The count saturates
    /// at the bounds of `i32`.
    pub fn add_book(&mut self, book_id: &str, quantity: i32) {
        let available = self
            .inventory
            .entry(book_id.to_string())
            .and_modify(|count| *count = count.saturating_add(quantity))
            .or_insert(quantity);
        let available = *available;

        log::debug!("Inventory for {book_id} changed by {quantity}, now {available}");
        self.record(LendingEvent::BookAdded { book_id: book_id.to_string(), quantity, available });
    }

    /// Copies of a book currently on the shelf, or 0 for an unknown book
    #[must_use]
    pub fn available_copies(&self, book_id: &str) -> i32 {
        self.inventory.get(book_id).copied().unwrap_or(0)
    }

    /// Lend a copy of `book_id` to `user_id`, returning whether it succeeded
    pub fn borrow_book(&mut self, book_id: &str, user_id: &str) -> bool {
        self.try_borrow_book(book_id, user_id).is_ok()
    }

    /// Lend a copy of `book_id` to `user_id`.
    ///
    /// An inactive user is told so through the notification service. A refused
    /// request leaves the inventory and loans untouched.
    ///
    /// # Errors
    ///
    /// Returns the `BorrowRejection` explaining why the book was not lent
    pub fn try_borrow_book(&mut self, book_id: &str, user_id: &str) -> Result<(), BorrowRejection> {
        let outcome = self.lend(book_id, user_id);

        match outcome {
            Ok(()) => {
                log::info!("Book {book_id} borrowed by {user_id}");
                self.record(LendingEvent::Borrowed {
                    book_id: book_id.to_string(),
                    user_id: user_id.to_string(),
                });
            }
            Err(reason) => {
                log::warn!("Refused to lend {book_id} to {user_id}: {reason}");
                self.record(LendingEvent::BorrowRejected {
                    book_id: book_id.to_string(),
                    user_id: user_id.to_string(),
                    reason,
                });
            }
        }

        outcome
    }

    /// Apply the borrow checks and state changes, sending notifications
    fn lend(&mut self, book_id: &str, user_id: &str) -> Result<(), BorrowRejection> {
        if !self.user_service.is_user_active(user_id) {
            self.notification_service.notify_user(user_id, INACTIVE_ACCOUNT_MESSAGE);
            return Err(BorrowRejection::InactiveAccount);
        }

        let available = self.inventory.get_mut(book_id).ok_or(BorrowRejection::UnknownBook)?;
        if *available <= 0 {
            return Err(BorrowRejection::NoCopiesAvailable);
        }
        *available = available.saturating_sub(1);

        // A later borrower of the same id replaces the earlier record
        self.loans.insert(book_id.to_string(), user_id.to_string());
        self.notification_service
            .notify_user(user_id, &format!("You have borrowed the book: {book_id}"));
        Ok(())
    }

    /// Take back `book_id` from `user_id`, returning whether it succeeded
    pub fn return_book(&mut self, book_id: &str, user_id: &str) -> bool {
        self.try_return_book(book_id, user_id).is_ok()
    }

    /// Take back `book_id` from `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `ReturnRejection::NotBorrowed` if the book is not on loan, or
    /// `ReturnRejection::BorrowedByAnotherUser` if someone else holds it
    pub fn try_return_book(&mut self, book_id: &str, user_id: &str) -> Result<(), ReturnRejection> {
        let outcome = match self.loans.get(book_id) {
            None => Err(ReturnRejection::NotBorrowed),
            Some(borrower) if borrower != user_id => Err(ReturnRejection::BorrowedByAnotherUser),
            Some(_) => Ok(()),
        };

        match outcome {
            Ok(()) => {
                self.loans.remove(book_id);
                let available = self.inventory.entry(book_id.to_string()).or_insert(0);
                *available = available.saturating_add(1);
                self.notification_service
                    .notify_user(user_id, &format!("You have returned the book: {book_id}"));

                log::info!("Book {book_id} returned by {user_id}");
                self.record(LendingEvent::Returned {
                    book_id: book_id.to_string(),
                    user_id: user_id.to_string(),
                });
            }
            Err(reason) => {
                log::warn!("Refused return of {book_id} from {user_id}: {reason}");
                self.record(LendingEvent::ReturnRejected {
                    book_id: book_id.to_string(),
                    user_id: user_id.to_string(),
                    reason,
                });
            }
        }

        outcome
    }

    /// Late fee for a return `overdue_days` past due, using this manager's policy
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NegativeOverdueDays` if `overdue_days` is negative
    pub fn calculate_dynamic_late_fee(
        &self,
        overdue_days: i32,
        is_bestseller: bool,
        is_premium_member: bool,
    ) -> Result<f64, LibraryError> {
        self.fee_policy.late_fee(overdue_days, is_bestseller, is_premium_member)
    }

    /// The user currently holding `book_id`, if any
    #[must_use]
    pub fn borrower_of(&self, book_id: &str) -> Option<&str> {
        self.loans.get(book_id).map(String::as_str)
    }

    /// All current loans as `(book_id, user_id)` pairs, in no particular order
    pub fn active_loans(&self) -> impl Iterator<Item = (&str, &str)> {
        self.loans.iter().map(|(book, user)| (book.as_str(), user.as_str()))
    }

    /// The fee policy in effect
    #[must_use]
    pub fn fee_policy(&self) -> &FeePolicy {
        &self.fee_policy
    }

    /// Recorded lending outcomes, oldest first
    #[must_use]
    pub fn history(&self) -> &[LendingRecord] {
        &self.history
    }

    /// Serialize the lending history as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Serialization` if serialization fails
    pub fn history_json(&self) -> Result<String, LibraryError> {
        Ok(serde_json::to_string_pretty(&self.history)?)
    }

    /// Append an event to the history, dropping the oldest entries past the limit
    fn record(&mut self, event: LendingEvent) {
        self.history.push(LendingRecord::now(event));
        if self.history.len() > self.max_history_size {
            let excess = self.history.len().saturating_sub(self.max_history_size);
            self.history.drain(..excess);
        }
    }
}
