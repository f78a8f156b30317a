//! In-memory library lending manager.
//!
//! This crate tracks how many copies of each book are on the shelf, lends
//! and takes back books on behalf of user accounts, and prices late returns.
//! Account activity and user messaging are delegated to injected services.

pub mod config;
pub mod error;
pub mod events;
pub mod fee;
pub mod manager;
pub mod services;

pub use config::LibraryConfig;
pub use error::{BorrowRejection, LibraryError, ReturnRejection};
pub use events::{LendingEvent, LendingRecord};
pub use fee::FeePolicy;
pub use manager::LibraryManager;
pub use services::{LogNotificationService, NotificationService, RosterUserService, UserService};
