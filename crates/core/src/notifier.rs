//! Failure notification used when no `on_failed` callback is registered.

/// Presents the game-over message to the player.
pub trait FailureNotifier: Send {
    fn notify_failure(&mut self, message: &str);
}

/// Discards notifications. Handy in tests and headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl FailureNotifier for NoopNotifier {
    fn notify_failure(&mut self, _message: &str) {}
}

/// Writes the message to the log at warn level.
///
/// This is what a game gets until the host installs something visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl FailureNotifier for LogNotifier {
    fn notify_failure(&mut self, message: &str) {
        tracing::warn!(target: "tiles::game", "{message}");
    }
}

impl<F> FailureNotifier for F
where
    F: FnMut(&str) + Send,
{
    fn notify_failure(&mut self, message: &str) {
        self(message)
    }
}
