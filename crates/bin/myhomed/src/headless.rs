//! Surface and dialogs for an unattended session.

use myhome_app::ports::{Dialogs, Effect, Surface};

/// Renders editor effects as log lines.
#[derive(Debug, Default)]
pub struct LogSurface;

impl Surface for LogSurface {
    fn apply(&mut self, effect: Effect) {
        tracing::debug!(?effect, "surface");
    }
}

/// Nobody is there to answer: prompts are cancelled, confirmations declined
/// and alerts logged.
#[derive(Debug, Default)]
pub struct HeadlessDialogs;

impl Dialogs for HeadlessDialogs {
    fn prompt(&mut self, message: &str) -> Option<String> {
        tracing::debug!(%message, "prompt cancelled");
        None
    }

    fn confirm(&mut self, message: &str) -> bool {
        tracing::debug!(%message, "confirmation declined");
        false
    }

    fn alert(&mut self, message: &str) {
        tracing::warn!(%message, "alert");
    }
}
