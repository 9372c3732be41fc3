//! Notification queue
//!
//! Ordered, self-expiring feedback channel. Each auto-closing entry owns
//! exactly one timer task, keyed by the entry's id. Removing an entry, clearing
//! the queue or dropping the queue aborts the matching timers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use chrono::Utc;
use log::{debug, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::model::{NewNotification, Notification, DEFAULT_DURATION};

#[derive(Default)]
struct Entries {
    items: Vec<Notification>,
    timers: HashMap<Uuid, JoinHandle<()>>,
    disposed: bool,
}

struct Shared {
    entries: Mutex<Entries>,
    state: watch::Sender<Vec<Notification>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, entries: &Entries) {
        self.state.send_replace(entries.items.clone());
    }

    /// Called by a timer once its duration has elapsed.
    fn expire(&self, id: Uuid) {
        let mut entries = self.lock();
        // Our own handle: dropping it detaches, it does not abort.
        entries.timers.remove(&id);
        let before = entries.items.len();
        entries.items.retain(|n| n.id != id);
        if entries.items.len() != before {
            debug!("Notification expired: {}", id);
            self.publish(&entries);
        }
    }
}

pub struct NotificationQueue {
    shared: Arc<Shared>,
    default_duration: Duration,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::with_default_duration(DEFAULT_DURATION)
    }

    pub fn with_default_duration(default_duration: Duration) -> Self {
        let (state, _) = watch::channel(Vec::new());
        Self {
            shared: Arc::new(Shared {
                entries: Mutex::new(Entries::default()),
                state,
            }),
            default_duration,
        }
    }

    /// Append a notification and, if it auto-closes, schedule its removal.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn add(&self, request: NewNotification) -> Uuid {
        let id = Uuid::new_v4();
        let duration = match request.duration {
            Some(d) if !d.is_zero() => d,
            _ => self.default_duration,
        };
        let notification = Notification {
            id,
            severity: request.severity,
            message: request.message,
            title: request.title,
            auto_close: request.auto_close,
            duration_ms: duration.as_millis() as u64,
            created_at: Utc::now(),
        };

        let mut entries = self.shared.lock();
        if entries.disposed {
            warn!("Notification dropped, queue already disposed: {}", notification.message);
            return id;
        }

        debug!(
            "Notification added: id={}, severity={}, auto_close={}",
            id,
            notification.severity.as_str(),
            notification.auto_close
        );
        if notification.auto_close {
            let timer = spawn_expiry(Arc::downgrade(&self.shared), id, duration);
            entries.timers.insert(id, timer);
        }
        entries.items.push(notification);
        self.shared.publish(&entries);
        id
    }

    /// Dismiss a notification. Unknown or already removed ids are ignored.
    pub fn remove(&self, id: Uuid) {
        let mut entries = self.shared.lock();
        if let Some(timer) = entries.timers.remove(&id) {
            timer.abort();
        }
        let before = entries.items.len();
        entries.items.retain(|n| n.id != id);
        if entries.items.len() != before {
            debug!("Notification removed: {}", id);
            self.shared.publish(&entries);
        }
    }

    /// Remove every notification and cancel every pending timer.
    pub fn clear(&self) {
        let mut entries = self.shared.lock();
        cancel_all(&mut entries);
        if !entries.items.is_empty() {
            entries.items.clear();
            self.shared.publish(&entries);
        }
    }

    /// Tear the queue down. Later `add` calls are ignored.
    pub fn dispose(&self) {
        let mut entries = self.shared.lock();
        entries.disposed = true;
        cancel_all(&mut entries);
        entries.items.clear();
        self.shared.publish(&entries);
    }

    /// Current entries, oldest first
    pub fn notifications(&self) -> Vec<Notification> {
        self.shared.lock().items.clone()
    }

    pub fn len(&self) -> usize {
        self.shared.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of expiry timers still scheduled
    pub fn pending_timers(&self) -> usize {
        self.shared.lock().timers.len()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.shared.state.subscribe()
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NotificationQueue {
    fn drop(&mut self) {
        let mut entries = self.shared.lock();
        entries.disposed = true;
        cancel_all(&mut entries);
    }
}

fn cancel_all(entries: &mut Entries) {
    let cancelled = entries.timers.len();
    for (_, timer) in entries.timers.drain() {
        timer.abort();
    }
    if cancelled > 0 {
        debug!("Cancelled {} notification timers", cancelled);
    }
}

fn spawn_expiry(shared: Weak<Shared>, id: Uuid, after: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        if let Some(shared) = shared.upgrade() {
            shared.expire(id);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(queue: &NotificationQueue) -> Vec<String> {
        queue.notifications().into_iter().map(|n| n.message).collect()
    }

    /// Let spawned timer tasks observe the advanced clock.
    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_display_order_is_insertion_order() {
        let queue = NotificationQueue::new();
        let mut expected = Vec::new();
        for i in 0..10 {
            let request = NewNotification::info(format!("n{}", i))
                .with_duration(Duration::from_millis(10_000 - i * 500));
            queue.add(request);
            expected.push(format!("n{}", i));
            assert_eq!(messages(&queue), expected);
        }

        // Later entries expire first; survivors keep their relative order.
        tokio::time::advance(Duration::from_millis(8_600)).await;
        settle().await;
        assert_eq!(messages(&queue), vec!["n0", "n1", "n2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_defaults_applied() {
        let queue = NotificationQueue::new();
        queue.add(NewNotification::success("Saved").with_duration(Duration::ZERO));
        let n = &queue.notifications()[0];
        assert!(n.auto_close);
        assert_eq!(n.duration_ms, 5000);
        assert_eq!(n.title, None);
        assert_eq!(queue.pending_timers(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_close_after_duration() {
        let queue = NotificationQueue::new();
        queue.add(NewNotification::warning("Low battery"));

        tokio::time::advance(Duration::from_millis(4_999)).await;
        settle().await;
        assert_eq!(queue.len(), 1);

        tokio::time::advance(Duration::from_millis(2)).await;
        settle().await;
        assert!(queue.is_empty());
        assert_eq!(queue.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sticky_notification_has_no_timer() {
        let queue = NotificationQueue::new();
        queue.add(NewNotification::error("Connection lost").sticky());
        assert_eq!(queue.pending_timers(), 0);

        tokio::time::advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(queue.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_is_idempotent_and_cancels_timer() {
        let queue = NotificationQueue::new();
        let first = queue.add(NewNotification::info("first"));
        queue.add(NewNotification::info("second").sticky());

        queue.remove(first);
        assert_eq!(messages(&queue), vec!["second"]);
        assert_eq!(queue.pending_timers(), 0);

        queue.remove(first);
        queue.remove(Uuid::new_v4());
        assert_eq!(messages(&queue), vec!["second"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_leaves_no_pending_timers() {
        let queue = NotificationQueue::new();
        for i in 0..3 {
            queue.add(NewNotification::info(format!("old{}", i)));
        }
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.pending_timers(), 0);

        // Newer entries must not be touched by the cancelled timers.
        queue.add(NewNotification::info("new").with_duration(Duration::from_secs(30)));
        tokio::time::advance(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(messages(&queue), vec!["new"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_entry_owns_one_timer() {
        let queue = NotificationQueue::new();
        let a = queue.add(NewNotification::info("a"));
        queue.add(NewNotification::info("b"));
        assert_eq!(queue.pending_timers(), 2);

        queue.remove(a);
        queue.add(NewNotification::info("c"));
        assert_eq!(queue.pending_timers(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_stops_timers_and_ignores_new_entries() {
        let queue = NotificationQueue::new();
        queue.add(NewNotification::info("a"));
        queue.dispose();
        assert_eq!(queue.pending_timers(), 0);

        queue.add(NewNotification::info("late"));
        assert!(queue.is_empty());
        assert_eq!(queue.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_queue_timers_do_not_fire() {
        let queue = NotificationQueue::new();
        let mut rx = queue.subscribe();
        queue.add(NewNotification::info("a"));
        rx.borrow_and_update();
        drop(queue);

        tokio::time::advance(Duration::from_secs(10)).await;
        settle().await;
        // The sender is gone; no expiry published anything after the drop.
        assert!(!rx.has_changed().unwrap_or(false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_changes() {
        let queue = NotificationQueue::new();
        let mut rx = queue.subscribe();
        queue.add(NewNotification::info("hello").with_title("Greeting"));
        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].title.as_deref(), Some("Greeting"));
    }
}
