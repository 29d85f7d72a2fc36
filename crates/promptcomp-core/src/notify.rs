//! User-facing notifications and error alerts.
//!
//! `Notifier` is the seam between the library and whatever surface shows
//! messages to the user. Notifications are transient and dismissed by id;
//! alerts are one-shot error messages.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Message shown when neither the caller nor the error has anything to say.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Failure that has already been shown to the user through a [`Notifier`].
///
/// Front ends should exit without printing it again.
#[derive(Debug)]
pub struct ReportedError;

impl std::fmt::Display for ReportedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Already reported")
    }
}

impl std::error::Error for ReportedError {}

/// Identifies a notification so it can be dismissed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(pub u64);

pub trait Notifier: Send + Sync {
    /// Shows a transient notification.
    fn notify(&self, message: &str) -> NotificationId;

    /// Removes a notification. Unknown ids are ignored.
    fn dismiss(&self, id: NotificationId);

    /// Shows an error message that the user has to acknowledge.
    fn alert(&self, message: &str);
}

/// Logs `error` once and alerts the user.
///
/// The alert text is `user_message` when given, else the error's own
/// description, else [`GENERIC_ERROR_MESSAGE`].
pub fn report_error(
    notifier: &dyn Notifier,
    error: &(dyn std::error::Error + 'static),
    user_message: Option<&str>,
) {
    tracing::error!(error = %error, "operation failed");

    let derived = error.to_string();
    let message = user_message
        .filter(|m| !m.trim().is_empty())
        .or_else(|| Some(derived.as_str()).filter(|m| !m.trim().is_empty()))
        .unwrap_or(GENERIC_ERROR_MESSAGE);

    notifier.alert(message);
}

/// Notifier that writes to stderr, used by the command line front end.
///
/// Stderr keeps notifications out of piped HTML output.
#[derive(Debug, Default)]
pub struct TerminalNotifier {
    next_id: AtomicU64,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) -> NotificationId {
        let id = NotificationId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let _ = writeln!(std::io::stderr(), "{message}");
        id
    }

    fn dismiss(&self, id: NotificationId) {
        tracing::trace!(id = id.0, "notification dismissed");
    }

    fn alert(&self, message: &str) {
        let _ = writeln!(std::io::stderr(), "Error: {message}");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording notifier shared by unit tests.

    use std::sync::Mutex;

    use tokio::time::Instant;

    use super::{NotificationId, Notifier};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Event {
        Notified(NotificationId, String),
        Dismissed(NotificationId),
        Alerted(String),
    }

    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        pub events: Mutex<Vec<(Instant, Event)>>,
        next_id: Mutex<u64>,
    }

    impl RecordingNotifier {
        pub fn events(&self) -> Vec<Event> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .map(|(_, e)| e.clone())
                .collect()
        }

        pub fn timed_events(&self) -> Vec<(Instant, Event)> {
            self.events.lock().unwrap().clone()
        }

        pub fn alerts(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Alerted(m) => Some(m),
                    _ => None,
                })
                .collect()
        }

        fn record(&self, event: Event) {
            self.events.lock().unwrap().push((Instant::now(), event));
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str) -> NotificationId {
            let mut next = self.next_id.lock().unwrap();
            let id = NotificationId(*next);
            *next += 1;
            self.record(Event::Notified(id, message.to_string()));
            id
        }

        fn dismiss(&self, id: NotificationId) {
            self.record(Event::Dismissed(id));
        }

        fn alert(&self, message: &str) {
            self.record(Event::Alerted(message.to_string()));
        }
    }
}
