//! Blocking user dialogs.

/// Modal prompts the editor needs from the user.
///
/// Implementations block until the user answers, like browser dialogs do.
pub trait Dialogs: Send {
    /// Ask for a line of text; `None` when cancelled.
    fn prompt(&mut self, message: &str) -> Option<String>;

    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;

    fn alert(&mut self, message: &str);
}
