//! Copy command handler.

use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use promptcomp_core::clipboard::{self, CopyOutcome, SystemClipboard};
use promptcomp_core::notify::{ReportedError, TerminalNotifier};

use super::read_input;

pub fn run(input: Option<&Path>) -> Result<()> {
    let text = read_input(input)?;

    let backend = Arc::new(system_clipboard(std::io::stdout().is_terminal()));
    let notifier = Arc::new(TerminalNotifier::new());

    // Dropping the runtime on return cancels the pending dismissal timer;
    // a terminal line cannot be taken back anyway.
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    let outcome = rt.block_on(clipboard::copy_to_clipboard(backend, notifier, &text));

    match outcome {
        None => {
            eprintln!("Nothing to copy.");
            Ok(())
        }
        Some(CopyOutcome::Copied) => Ok(()),
        // The alert is already on stderr.
        Some(CopyOutcome::Failed(_)) => Err(ReportedError.into()),
    }
}

/// Without a terminal there is no OSC 52 and the system clipboard has to
/// outlive this process, so the write waits for another program to take it.
fn system_clipboard(stdout_is_terminal: bool) -> SystemClipboard {
    SystemClipboard {
        disable_osc52: !stdout_is_terminal,
        wait_for_handoff: !stdout_is_terminal,
    }
}
