//! Transient notifications raised by page actions.
//!
//! # Design
//! - At most one notification is visible; pushing replaces the current one.
//! - Expiry is computed from a caller-supplied clock so timing stays testable.
//! - Ids are monotonic so a stale dismiss timer cannot close a newer message.

use serde::{Deserialize, Serialize};

/// Default time a notification stays on screen.
pub const DEFAULT_TTL_MS: u64 = 3_000;

/// Notification variants used across the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Informational notice.
    Info,
    /// Success notice.
    Success,
    /// Error notice.
    Error,
}

impl NoticeKind {
    /// CSS modifier class for the notice.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Message produced by a controller before it is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Display text.
    pub message: String,
}

impl Notice {
    /// Success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// Error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// Informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}

/// Notification currently on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic identifier.
    pub id: u64,
    /// Display text.
    pub message: String,
    /// Severity.
    pub kind: NoticeKind,
    /// Clock value after which the toast is removed.
    pub expires_at_ms: u64,
}

/// Single-slot notification holder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationCenter {
    ttl_ms: u64,
    next_id: u64,
    current: Option<Toast>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_MS)
    }
}

impl NotificationCenter {
    /// Empty center with the given time-to-live.
    #[must_use]
    pub const fn new(ttl_ms: u64) -> Self {
        Self {
            ttl_ms,
            next_id: 1,
            current: None,
        }
    }

    /// Configured time-to-live.
    #[must_use]
    pub const fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Show `notice`, replacing whatever is visible. Returns the new toast id.
    pub fn push(&mut self, notice: Notice, now_ms: u64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if let Some(previous) = &self.current {
            tracing::trace!(replaced = previous.id, id, "notification replaced");
        }
        self.current = Some(Toast {
            id,
            message: notice.message,
            kind: notice.kind,
            expires_at_ms: now_ms.saturating_add(self.ttl_ms),
        });
        id
    }

    /// Visible toast, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Dismiss the toast with `id`. Returns `false` when it is no longer shown.
    pub fn dismiss(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|toast| toast.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Drop the toast if its time-to-live has elapsed at `now_ms`.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        if self
            .current
            .as_ref()
            .is_some_and(|toast| now_ms >= toast.expires_at_ms)
        {
            self.current = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_replaces_the_visible_notice() {
        let mut center = NotificationCenter::default();
        let first = center.push(Notice::success("Saved"), 0);
        let second = center.push(Notice::error("Failed"), 10);
        assert_ne!(first, second);
        let toast = center.current().unwrap();
        assert_eq!(toast.id, second);
        assert_eq!(toast.kind, NoticeKind::Error);
        assert!(!center.dismiss(first));
    }

    #[test]
    fn notices_expire_after_ttl() {
        let mut center = NotificationCenter::new(3_000);
        center.push(Notice::info("Hello"), 1_000);
        assert!(!center.expire(3_999));
        assert!(center.current().is_some());
        assert!(center.expire(4_000));
        assert!(center.current().is_none());
        assert!(!center.expire(5_000));
    }

    #[test]
    fn stale_deadline_leaves_a_newer_toast_alone() {
        let mut center = NotificationCenter::new(3_000);
        center.push(Notice::success("Saved"), 0);
        let newer = center.push(Notice::error("Failed"), 2_000);
        // The first toast's timer fires at its own deadline.
        assert!(!center.expire(3_000));
        assert_eq!(center.current().map(|toast| toast.id), Some(newer));
        assert!(center.expire(5_000));
    }

    #[test]
    fn manual_dismiss_clears_matching_toast() {
        let mut center = NotificationCenter::default();
        let id = center.push(Notice::success("Done"), 0);
        assert!(center.dismiss(id));
        assert!(center.current().is_none());
    }
}
