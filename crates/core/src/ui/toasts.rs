//! On-screen toast queue.

use crate::notify::{Notifier, Toast, ToastKind};
use std::time::Instant;

/// A toast waiting to be shown or on screen.
#[derive(Clone, Debug)]
pub struct QueuedToast {
    pub kind: ToastKind,
    pub toast: Toast,
    pub raised_at: Instant,
}

impl QueuedToast {
    /// Shown once its delay has passed, until its duration runs out.
    pub fn is_visible(&self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.raised_at);
        elapsed >= self.toast.delay && elapsed < self.toast.delay + self.toast.duration
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= self.toast.delay + self.toast.duration
    }
}

/// [`Notifier`] backing the GUI. The renderer reads it every frame.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<QueuedToast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_at(&mut self, kind: ToastKind, toast: Toast, raised_at: Instant) {
        self.toasts.push(QueuedToast {
            kind,
            toast,
            raised_at,
        });
    }

    /// Toasts to draw at `now`, oldest first.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &QueuedToast> {
        self.toasts.iter().filter(move |t| t.is_visible(now))
    }

    /// Drops expired toasts and reports whether any are still pending.
    pub fn prune(&mut self, now: Instant) -> bool {
        self.toasts.retain(|t| !t.is_expired(now));
        !self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, kind: ToastKind, toast: Toast) {
        tracing::debug!(%kind, title = %toast.title, "toast raised");
        self.push_at(kind, toast, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ToastStyle;
    use std::time::Duration;

    fn queue_with_one(start: Instant) -> ToastQueue {
        let mut queue = ToastQueue::new();
        queue.push_at(
            ToastKind::Info,
            Toast::new(
                "Fill in the Blanks",
                "Please provide proper prompt",
                &ToastStyle::default(),
            ),
            start,
        );
        queue
    }

    #[test]
    fn test_toast_waits_for_delay() {
        let start = Instant::now();
        let queue = queue_with_one(start);
        assert_eq!(queue.visible(start).count(), 0);
        assert_eq!(queue.visible(start + Duration::from_millis(199)).count(), 0);
        assert_eq!(queue.visible(start + Duration::from_millis(200)).count(), 1);
    }

    #[test]
    fn test_toast_hides_after_duration() {
        let start = Instant::now();
        let queue = queue_with_one(start);
        assert_eq!(queue.visible(start + Duration::from_millis(2799)).count(), 1);
        assert_eq!(queue.visible(start + Duration::from_millis(2800)).count(), 0);
    }

    #[test]
    fn test_prune_keeps_pending_toasts() {
        let start = Instant::now();
        let mut queue = queue_with_one(start);
        assert!(queue.prune(start + Duration::from_millis(100)));
        assert_eq!(queue.len(), 1);
        assert!(!queue.prune(start + Duration::from_secs(3)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_notifier_enqueues() {
        let mut queue = ToastQueue::new();
        queue.error(Toast::new("Error Occurred", "boom", &ToastStyle::default()));
        assert_eq!(queue.len(), 1);
    }
}
