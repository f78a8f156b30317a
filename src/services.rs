use std::collections::HashSet;

/// Answers whether a user account may currently borrow books
pub trait UserService {
    /// Returns true if the account identified by `user_id` is active
    fn is_user_active(&self, user_id: &str) -> bool;
}

/// Delivers messages to library users
pub trait NotificationService {
    /// Send `message` to the user identified by `user_id`
    fn notify_user(&self, user_id: &str, message: &str);
}

/// User service backed by a fixed set of active account ids
#[derive(Debug, Default, Clone)]
pub struct RosterUserService {
    /// Ids of accounts allowed to borrow
    active: HashSet<String>,
}

impl RosterUserService {
    /// Create a roster with the given accounts already active
    #[must_use]
    pub fn new<I, S>(active: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { active: active.into_iter().map(Into::into).collect() }
    }

    /// Mark an account as active
    pub fn activate(&mut self, user_id: &str) {
        self.active.insert(user_id.to_string());
    }

    /// Mark an account as inactive
    pub fn deactivate(&mut self, user_id: &str) {
        self.active.remove(user_id);
    }
}

impl UserService for RosterUserService {
    fn is_user_active(&self, user_id: &str) -> bool {
        self.active.contains(user_id)
    }
}

/// Writes every notification to the `notification` log target
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotificationService;

impl NotificationService for LogNotificationService {
    fn notify_user(&self, user_id: &str, message: &str) {
        log::info!(target: "notification", "to {user_id}: {message}");
    }
}
