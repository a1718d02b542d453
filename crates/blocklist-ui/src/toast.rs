//! Transient notifications.

use crate::dom::ToastArea;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default time a toast stays on screen.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
}

impl ToastKind {
    /// CSS class added next to the base `toast` class.
    pub fn css_class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
            ToastKind::Warning => "toast-warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

/// Appends toasts to an area and removes each one after its duration.
///
/// Toasts are independent: there is no queue and no early dismissal.
/// Removal runs on a spawned task, so a Tokio runtime must be current.
#[derive(Clone)]
pub struct Toaster {
    area: Arc<dyn ToastArea>,
    duration: Duration,
}

impl Toaster {
    pub fn new(area: Arc<dyn ToastArea>) -> Self {
        Self::with_duration(area, DEFAULT_TOAST_DURATION)
    }

    pub fn with_duration(area: Arc<dyn ToastArea>, duration: Duration) -> Self {
        Self { area, duration }
    }

    /// Show `message` for the default duration.
    pub fn notify(&self, message: impl Into<String>, kind: ToastKind) {
        self.notify_for(message, kind, self.duration);
    }

    /// Show `message` for `duration`.
    pub fn notify_for(&self, message: impl Into<String>, kind: ToastKind, duration: Duration) {
        let toast = Toast {
            message: message.into(),
            kind,
        };
        let id = self.area.append(&toast);
        debug!(?kind, message = %toast.message, "Toast shown");

        let area = self.area.clone();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            area.remove(id);
        });
    }
}
