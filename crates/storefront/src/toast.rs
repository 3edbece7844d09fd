//! Toast notification queue.
//!
//! A plain ordered collection. It holds no timers; expiry is driven from
//! outside by [`ToastExpiry`](crate::expiry::ToastExpiry), which calls back
//! into [`ToastQueue::remove_toast`] once a toast's duration has elapsed.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rosegold_core::{ToastId, ToastKind};
use uuid::Uuid;

/// Lifetime given to toasts that don't ask for one.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

/// A queued notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub title: String,
    pub message: Option<String>,
    pub duration_ms: u64,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    /// How long the toast stays up before expiring.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// A toast request, before the queue assigns it an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToast {
    pub kind: ToastKind,
    pub title: String,
    pub message: Option<String>,
    pub duration_ms: Option<u64>,
}

impl NewToast {
    /// A toast with no message and the default duration.
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: None,
            duration_ms: None,
        }
    }

    /// Shorthand for a [`ToastKind::Success`] toast.
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title)
    }

    /// Shorthand for a [`ToastKind::Error`] toast.
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title)
    }

    /// Attach a body line.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Override the display duration.
    #[must_use]
    pub const fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

/// Insertion-ordered queue of live toasts.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    default_duration_ms: u64,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION_MS)
    }
}

impl ToastQueue {
    /// Create an empty queue with the given default duration.
    #[must_use]
    pub const fn new(default_duration_ms: u64) -> Self {
        Self {
            toasts: Vec::new(),
            default_duration_ms,
        }
    }

    /// Append a toast and return its freshly generated id.
    ///
    /// A missing or zero duration becomes the queue default. Ids are UUIDv7,
    /// so they carry their creation timestamp and sort by it.
    pub fn add_toast(&mut self, toast: NewToast) -> ToastId {
        let id = ToastId::new(Uuid::now_v7().to_string());
        let duration_ms = toast
            .duration_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(self.default_duration_ms);

        self.toasts.push(Toast {
            id: id.clone(),
            kind: toast.kind,
            title: toast.title,
            message: toast.message,
            duration_ms,
            created_at: Utc::now(),
        });
        tracing::debug!(toast_id = %id, duration_ms, "Toast queued");
        id
    }

    /// Remove the toast with `id`. Returns whether one was removed.
    pub fn remove_toast(&mut self, id: &ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| &toast.id != id);
        before != self.toasts.len()
    }

    /// Drop every queued toast.
    pub fn clear_toasts(&mut self) {
        self.toasts.clear();
    }

    /// Live toasts in insertion order.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// The toast with `id`, if still queued.
    #[must_use]
    pub fn get(&self, id: &ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|toast| &toast.id == id)
    }

    /// Number of live toasts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Whether no toasts are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Duration applied when a toast doesn't specify one.
    #[must_use]
    pub const fn default_duration_ms(&self) -> u64 {
        self.default_duration_ms
    }
}
