//! User-facing notifications.
//!
//! The form never renders anything itself. It reports outcomes through a
//! [`Notifier`], which the GUI backs with an on-screen toast queue and the
//! headless CLI backs with [`LogNotifier`].

use std::fmt;
use std::time::Duration;

/// Severity of a toast, which also selects its styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        };
        f.write_str(label)
    }
}

/// Screen corner or edge a toast stacks against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ToastPosition {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

impl ToastPosition {
    pub const ALL: [ToastPosition; 6] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];
}

/// Timing and placement shared by every toast the form raises.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToastStyle {
    /// Time before the toast appears.
    pub delay: Duration,
    /// Time the toast stays on screen once shown.
    pub duration: Duration,
    /// Lay the text out right-to-left (right aligned).
    pub rtl: bool,
    pub position: ToastPosition,
}

impl Default for ToastStyle {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(200),
            duration: Duration::from_millis(2600),
            rtl: true,
            position: ToastPosition::BottomRight,
        }
    }
}

/// A single transient notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub text: String,
    pub delay: Duration,
    pub duration: Duration,
    pub rtl: bool,
    pub position: ToastPosition,
}

impl Toast {
    pub fn new(title: impl Into<String>, text: impl Into<String>, style: &ToastStyle) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            delay: style.delay,
            duration: style.duration,
            rtl: style.rtl,
            position: style.position,
        }
    }
}

/// Sink for user-visible notices.
///
/// Only [`Notifier::notify`] is required. The per-kind helpers forward to it.
pub trait Notifier {
    fn notify(&mut self, kind: ToastKind, toast: Toast);

    fn info(&mut self, toast: Toast) {
        self.notify(ToastKind::Info, toast);
    }

    fn success(&mut self, toast: Toast) {
        self.notify(ToastKind::Success, toast);
    }

    fn error(&mut self, toast: Toast) {
        self.notify(ToastKind::Error, toast);
    }
}

/// Notifier for headless runs: every toast becomes a tracing event.
#[derive(Debug, Default)]
pub struct LogNotifier {
    errors: usize,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of error toasts seen so far.
    pub fn error_count(&self) -> usize {
        self.errors
    }
}

impl Notifier for LogNotifier {
    fn notify(&mut self, kind: ToastKind, toast: Toast) {
        match kind {
            ToastKind::Info | ToastKind::Success => {
                tracing::info!(title = %toast.title, "{}", toast.text)
            }
            ToastKind::Error => {
                self.errors += 1;
                tracing::error!(title = %toast.title, "{}", toast.text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(ToastKind, String)>);

    impl Notifier for Recorder {
        fn notify(&mut self, kind: ToastKind, toast: Toast) {
            self.0.push((kind, toast.title));
        }
    }

    #[test]
    fn test_helpers_forward_kind() {
        let style = ToastStyle::default();
        let mut recorder = Recorder::default();
        recorder.info(Toast::new("a", "", &style));
        recorder.success(Toast::new("b", "", &style));
        recorder.error(Toast::new("c", "", &style));
        assert_eq!(
            recorder.0,
            vec![
                (ToastKind::Info, "a".to_string()),
                (ToastKind::Success, "b".to_string()),
                (ToastKind::Error, "c".to_string()),
            ]
        );
    }

    #[test]
    fn test_toast_takes_style() {
        let toast = Toast::new("Success", "done", &ToastStyle::default());
        assert_eq!(toast.delay, Duration::from_millis(200));
        assert_eq!(toast.duration, Duration::from_millis(2600));
        assert!(toast.rtl);
        assert_eq!(toast.position, ToastPosition::BottomRight);
    }

    #[test]
    fn test_log_notifier_counts_errors() {
        let style = ToastStyle::default();
        let mut notifier = LogNotifier::new();
        notifier.info(Toast::new("Fill in the Blanks", "", &style));
        notifier.error(Toast::new("Error Occurred", "boom", &style));
        assert_eq!(notifier.error_count(), 1);
    }
}
