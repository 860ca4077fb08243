//! User-facing notifications (toasts).
//!
//! Notifications carry translation keys rather than text; the toast
//! component resolves them through the active [`Translator`] at render
//! time so a language switch also re-renders open toasts.
//!
//! [`Translator`]: crate::i18n::Translator

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Maximum number of notifications visible at once.
pub const MAX_VISIBLE: usize = 3;

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Severity level; determines styling and auto-dismiss behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Everything worked (dismissed after 4 s).
    Success,
    /// Something worked, something did not (dismissed after 6 s).
    Warning,
    /// Nothing worked (manual dismiss).
    Error,
}

impl Severity {
    /// How long a toast of this severity stays up, or `None` when the
    /// guest has to dismiss it.
    #[must_use]
    pub const fn auto_dismiss_after(self) -> Option<Duration> {
        match self {
            Self::Success => Some(Duration::from_secs(4)),
            Self::Warning => Some(Duration::from_secs(6)),
            Self::Error => None,
        }
    }

    /// CSS modifier class for the toast.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast-success",
            Self::Warning => "toast-warning",
            Self::Error => "toast-error",
        }
    }
}

/// A value interpolated into a translated message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageArg {
    /// A count; participates in plural selection.
    Count(usize),
    /// Free text, inserted verbatim.
    Text(String),
}

/// A notification to be displayed to the guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    title_key: String,
    body_key: Option<String>,
    args: Vec<(String, MessageArg)>,
}

impl Notification {
    /// Create a notification whose title is the translation of `title_key`.
    pub fn new(severity: Severity, title_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::next(),
            severity,
            title_key: title_key.into(),
            body_key: None,
            args: Vec::new(),
        }
    }

    pub fn success(title_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, title_key)
    }

    pub fn warning(title_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, title_key)
    }

    pub fn error(title_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, title_key)
    }

    /// Add a body line, the translation of `body_key`.
    #[must_use]
    pub fn with_body(mut self, body_key: impl Into<String>) -> Self {
        self.body_key = Some(body_key.into());
        self
    }

    /// Add an interpolation argument, shared by title and body.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: MessageArg) -> Self {
        self.args.push((name.into(), value));
        self
    }

    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn title_key(&self) -> &str {
        &self.title_key
    }

    #[must_use]
    pub fn body_key(&self) -> Option<&str> {
        self.body_key.as_deref()
    }

    #[must_use]
    pub fn args(&self) -> &[(String, MessageArg)] {
        &self.args
    }

    /// Look up an argument by name.
    #[must_use]
    pub fn arg(&self, name: &str) -> Option<&MessageArg> {
        self.args.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

/// Visible notifications plus a FIFO queue of ones waiting for room.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    visible: VecDeque<Notification>,
    queue: VecDeque<Notification>,
}

impl NotificationCenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `notification`, or queue it when [`MAX_VISIBLE`] are showing.
    ///
    /// Returns the notification's id.
    pub fn push(&mut self, notification: Notification) -> NotificationId {
        let id = notification.id();
        if self.visible.len() < MAX_VISIBLE {
            self.visible.push_back(notification);
        } else {
            self.queue.push_back(notification);
        }
        id
    }

    /// Remove a notification, visible or queued.
    ///
    /// Dismissing a visible one promotes the oldest queued notification.
    /// Returns `true` if the id was found.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            if let Some(next) = self.queue.pop_front() {
                self.visible.push_back(next);
            }
            return true;
        }
        if let Some(pos) = self.queue.iter().position(|n| n.id() == id) {
            self.queue.remove(pos);
            return true;
        }
        false
    }

    /// Currently visible notifications, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    /// Number of notifications waiting for room.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}
