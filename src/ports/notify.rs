//! Notification port for short user-facing messages.

/// Shows a short transient message to the user.
pub trait Notifier: Send + Sync {
    /// Displays `message`.
    fn notify(&self, message: &str);
}
