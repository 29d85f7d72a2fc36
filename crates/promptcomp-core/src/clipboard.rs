//! Clipboard copy with user feedback.
//!
//! Provides clipboard access with multiple transport fallbacks:
//! 1. OSC 52 - Terminal clipboard escape sequence (works over SSH)
//! 2. System clipboard via `arboard` crate
//!
//! `copy_to_clipboard` wraps a backend write with a transient success
//! notification or a single error alert.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::notify::{self, Notifier};

/// How long the "copied" notification stays up.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(2000);

pub const COPIED_MESSAGE: &str = "Copied to clipboard!";
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy to clipboard.";

/// Clipboard operation errors.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// OSC 52 write failed.
    #[error("OSC 52 clipboard failed: {0}")]
    Osc52(String),
    /// System clipboard operation failed.
    #[error("System clipboard failed: {0}")]
    System(String),
    /// The write task did not run to completion.
    #[error("clipboard task failed: {0}")]
    Task(String),
}

/// Completion of a clipboard write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed(String),
}

pub trait ClipboardBackend: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard interface with multiple transport fallbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard {
    /// Skip the OSC 52 escape sequence (stdout is not a terminal).
    pub disable_osc52: bool,
    /// On Linux, block the write until another program takes ownership of
    /// the selection. X11 and Wayland selections are served by the owning
    /// process, so a short-lived process must stay alive until then.
    pub wait_for_handoff: bool,
}

impl ClipboardBackend for SystemClipboard {
    /// Tries OSC 52 first, then the system clipboard.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if !self.disable_osc52 && Self::copy_osc52(text).is_ok() {
            return Ok(());
        }
        self.copy_system(text)
    }
}

impl SystemClipboard {
    /// Copies text using OSC 52 escape sequence.
    ///
    /// This writes directly to stdout, which the terminal intercepts
    /// and copies to the system clipboard.
    fn copy_osc52(text: &str) -> Result<(), ClipboardError> {
        use base64::Engine;

        let encoded = base64::engine::general_purpose::STANDARD.encode(text);

        // ESC ] 52 ; c ; <base64-data> ESC \   ('c' selects the system clipboard)
        let mut stdout = std::io::stdout();
        write!(stdout, "\x1b]52;c;{encoded}\x1b\\")
            .map_err(|e| ClipboardError::Osc52(e.to_string()))?;
        stdout
            .flush()
            .map_err(|e| ClipboardError::Osc52(e.to_string()))?;

        Ok(())
    }

    fn copy_system(self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::System(e.to_string()))?;

        #[cfg(target_os = "linux")]
        if self.wait_for_handoff {
            use arboard::SetExtLinux;

            tracing::debug!("waiting for another program to take the selection");
            return clipboard
                .set()
                .wait()
                .text(text)
                .map_err(|e| ClipboardError::System(e.to_string()));
        }

        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::System(e.to_string()))?;

        Ok(())
    }
}

/// Copies `text` and reports the result through `notifier`.
///
/// Returns `None` without touching the backend when `text` is empty.
/// On success a notification is shown and dismissed after
/// [`NOTIFICATION_TTL`] by a spawned task. On failure the error is logged and
/// alerted once. The write has no timeout.
pub async fn copy_to_clipboard(
    backend: Arc<dyn ClipboardBackend>,
    notifier: Arc<dyn Notifier>,
    text: &str,
) -> Option<CopyOutcome> {
    if text.is_empty() {
        return None;
    }

    let owned = text.to_string();
    let result = tokio::task::spawn_blocking(move || backend.write_text(&owned))
        .await
        .unwrap_or_else(|e| Err(ClipboardError::Task(e.to_string())));

    match result {
        Ok(()) => {
            tracing::debug!(bytes = text.len(), "copied to clipboard");
            let id = notifier.notify(COPIED_MESSAGE);
            tokio::spawn(async move {
                tokio::time::sleep(NOTIFICATION_TTL).await;
                notifier.dismiss(id);
            });
            Some(CopyOutcome::Copied)
        }
        Err(err) => {
            notify::report_error(notifier.as_ref(), &err, Some(COPY_FAILED_MESSAGE));
            Some(CopyOutcome::Failed(err.to_string()))
        }
    }
}
