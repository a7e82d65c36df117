//! Append-only chat log with change notifications.
//!
//! Appending is the only mutation, and every append broadcasts the full log
//! to subscribers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::sync::watch;

use salesboard_core::{ChatMessage, Role};

/// Source of message timestamps.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// =============================================================================
// ObservableChatLog
// =============================================================================

/// A session's messages in append order.
///
/// ## Thread Safety
///
/// `parking_lot::RwLock` guards the messages; `tokio::sync::watch` carries
/// snapshots. Readers never block each other.
///
/// ## Usage
///
/// ```ignore
/// let log = ObservableChatLog::new();
/// let rx = log.subscribe();
///
/// log.append(Role::User, "show promotions");
///
/// assert_eq!(rx.borrow().len(), 1);
/// ```
pub struct ObservableChatLog {
    inner: RwLock<Vec<ChatMessage>>,
    clock: Arc<dyn Clock>,
    tx: watch::Sender<Vec<ChatMessage>>,
    rx: watch::Receiver<Vec<ChatMessage>>,
}

impl ObservableChatLog {
    /// Create an empty log stamped by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty log stamped by `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let (tx, rx) = watch::channel(Vec::new());
        Self {
            inner: RwLock::new(Vec::new()),
            clock,
            tx,
            rx,
        }
    }

    /// Append a message and broadcast the new log.
    pub fn append(&self, role: Role, text: impl Into<String>) -> ChatMessage {
        let message = ChatMessage::new(role, text, self.clock.now());
        let snapshot = {
            let mut inner = self.inner.write();
            inner.push(message.clone());
            tracing::debug!("Appended {:?} message, log length: {}", role, inner.len());
            inner.clone()
        };
        let _ = self.tx.send(snapshot);
        message
    }

    // =========================================================================
    // Query Methods
    // =========================================================================

    /// Snapshot of every message.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.inner.read().clone()
    }

    /// Read the messages without cloning them.
    pub fn with_messages<R>(&self, f: impl FnOnce(&[ChatMessage]) -> R) -> R {
        let inner = self.inner.read();
        f(inner.as_slice())
    }

    pub fn last(&self) -> Option<ChatMessage> {
        self.inner.read().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Receiver that sees every append.
    pub fn subscribe(&self) -> watch::Receiver<Vec<ChatMessage>> {
        self.rx.clone()
    }
}

impl Default for ObservableChatLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_clock() -> Arc<MockClock> {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .returning(|| Utc.with_ymd_and_hms(2025, 7, 1, 10, 0, 0).unwrap());
        Arc::new(clock)
    }

    #[test]
    fn test_append_keeps_order() {
        let log = ObservableChatLog::with_clock(fixed_clock());
        log.append(Role::User, "hi");
        log.append(Role::Assistant, "hello");
        log.append(Role::User, "orders?");

        let texts: Vec<String> = log.messages().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, ["hi", "hello", "orders?"]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_append_stamps_from_clock() {
        let log = ObservableChatLog::with_clock(fixed_clock());
        let message = log.append(Role::User, "hi");
        assert_eq!(
            message.created_at,
            Utc.with_ymd_and_hms(2025, 7, 1, 10, 0, 0).unwrap()
        );
        assert!(message.is_user());
    }

    #[test]
    fn test_clock_called_once_per_append() {
        let mut clock = MockClock::new();
        clock.expect_now().times(2).returning(Utc::now);
        let log = ObservableChatLog::with_clock(Arc::new(clock));
        log.append(Role::User, "a");
        log.append(Role::Assistant, "b");
    }

    #[test]
    fn test_message_ids_unique() {
        let log = ObservableChatLog::with_clock(fixed_clock());
        let a = log.append(Role::User, "same");
        let b = log.append(Role::User, "same");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_subscribe_sees_appends() {
        let log = ObservableChatLog::with_clock(fixed_clock());
        let rx = log.subscribe();
        assert!(rx.borrow().is_empty());

        log.append(Role::User, "hi");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow().len(), 1);
        assert_eq!(log.last().map(|m| m.text), Some("hi".to_string()));
    }

    #[test]
    fn test_empty_log() {
        let log = ObservableChatLog::new();
        assert!(log.is_empty());
        assert!(log.last().is_none());
        assert_eq!(log.with_messages(|m| m.len()), 0);
    }
}
