//! Transient completion message shown over the timer.

use tokio::time::{Duration, Instant};

/// How long a completion message stays visible.
pub const MESSAGE_DURATION: Duration = Duration::from_secs(5);

/// Completion message state with its auto-dismiss deadline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionMessage {
    text: String,
    visible: bool,
    deadline: Option<Instant>,
}

impl CompletionMessage {
    /// Shows `text` until `now + MESSAGE_DURATION`.
    ///
    /// Showing again while visible replaces the text and restarts the window.
    pub fn show(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        self.visible = true;
        self.deadline = Some(now + MESSAGE_DURATION);
    }

    /// Hides the message and drops the pending deadline.
    pub fn dismiss(&mut self) {
        self.text.clear();
        self.visible = false;
        self.deadline = None;
    }

    /// Hides the message if its deadline has passed.
    ///
    /// Returns true if the message was hidden by this call.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.dismiss();
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Pending auto-dismiss time, if a message is visible.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_hidden() {
        let message = CompletionMessage::default();
        assert!(!message.is_visible());
        assert!(message.text().is_empty());
        assert!(message.deadline().is_none());
    }

    #[test]
    fn test_show_sets_deadline() {
        let now = Instant::now();
        let mut message = CompletionMessage::default();
        message.show("Done", now);

        assert!(message.is_visible());
        assert_eq!(message.text(), "Done");
        assert_eq!(message.deadline(), Some(now + MESSAGE_DURATION));
    }

    #[test]
    fn test_expire_before_and_after_deadline() {
        let now = Instant::now();
        let mut message = CompletionMessage::default();
        message.show("Done", now);

        assert!(!message.expire(now + Duration::from_secs(4)));
        assert!(message.is_visible());

        assert!(message.expire(now + Duration::from_secs(5)));
        assert!(!message.is_visible());
        assert!(message.deadline().is_none());
    }

    #[test]
    fn test_second_show_restarts_window() {
        let now = Instant::now();
        let mut message = CompletionMessage::default();
        message.show("First", now);
        message.show("Second", now + Duration::from_secs(3));

        assert!(!message.expire(now + Duration::from_secs(5)));
        assert_eq!(message.text(), "Second");
        assert!(message.expire(now + Duration::from_secs(8)));
    }

    #[test]
    fn test_dismiss_clears_deadline() {
        let now = Instant::now();
        let mut message = CompletionMessage::default();
        message.show("Done", now);
        message.dismiss();

        assert!(!message.is_visible());
        assert!(message.deadline().is_none());
        assert!(!message.expire(now + Duration::from_secs(10)));
    }
}
