//! On-screen failure notice.

use std::sync::{Arc, Mutex, PoisonError};

use crate::core::FailureNotifier;

/// Shared slot holding the message the view should overlay, if any.
#[derive(Debug, Clone, Default)]
pub struct Notice {
    message: Arc<Mutex<Option<String>>>,
}

impl Notice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.message
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, message: impl Into<String>) {
        *self.message.lock().unwrap_or_else(PoisonError::into_inner) = Some(message.into());
    }

    pub fn clear(&self) {
        *self.message.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// A notifier that posts failure messages to this slot.
    pub fn notifier(&self) -> OverlayNotifier {
        OverlayNotifier {
            notice: self.clone(),
        }
    }
}

/// Shows the failure message as an overlay on the playfield.
#[derive(Debug, Clone)]
pub struct OverlayNotifier {
    notice: Notice,
}

impl FailureNotifier for OverlayNotifier {
    fn notify_failure(&mut self, message: &str) {
        self.notice.set(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifier_posts_to_shared_slot() {
        let notice = Notice::new();
        let mut notifier = notice.notifier();
        assert_eq!(notice.get(), None);

        notifier.notify_failure("Game over!");
        assert_eq!(notice.get().as_deref(), Some("Game over!"));

        notice.clear();
        assert_eq!(notice.get(), None);
    }
}
