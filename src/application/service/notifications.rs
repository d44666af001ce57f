// src/application/service/notifications.rs
// Notification bus: ordered list of transient messages with subscribers

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::domain::models::{Notification, NotificationId, NotificationKind};

/// How long a notification stays visible unless dismissed
pub const DEFAULT_TTL: Duration = Duration::from_millis(5000);

/// Subscriber callback. Always receives the full current sequence.
pub type Listener = Arc<dyn Fn(&[Notification]) + Send + Sync>;

struct BusState {
    notifications: Vec<Notification>,
    listeners: HashMap<u64, Listener>,
    next_listener_id: u64,
    // Expiry timer per live notification
    timers: HashMap<NotificationId, CancellationToken>,
}

struct BusInner {
    state: Mutex<BusState>,
    ttl: Duration,
    shutdown: CancellationToken,
}

/// Cloneable handle to a shared notification list
#[derive(Clone)]
pub struct NotificationBus {
    inner: Arc<BusInner>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(BusInner {
                state: Mutex::new(BusState {
                    notifications: Vec::new(),
                    listeners: HashMap::new(),
                    next_listener_id: 0,
                    timers: HashMap::new(),
                }),
                ttl,
                shutdown: CancellationToken::new(),
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Append a notification, notify subscribers and schedule its expiry.
    ///
    /// Expiry needs a tokio runtime; without one the notification stays
    /// until dismissed.
    pub fn publish(&self, kind: NotificationKind, message: impl Into<String>) -> NotificationId {
        let message = message.into();
        match kind {
            NotificationKind::Error => log::error!("[notification] {}", message),
            NotificationKind::Warning => log::warn!("[notification] {}", message),
            _ => log::info!("[notification] {}", message),
        }

        let id = Uuid::new_v4();
        if self.inner.shutdown.is_cancelled() {
            log::debug!("Notification bus is shut down, dropping {}", id);
            return id;
        }

        let timer = self.inner.shutdown.child_token();
        {
            let mut state = self.inner.state.lock().unwrap();
            state.notifications.push(Notification { id, kind, message });
            state.timers.insert(id, timer.clone());
        }
        self.broadcast();
        self.schedule_expiry(id, timer);

        id
    }

    /// Remove a notification now. Unknown ids are ignored.
    pub fn dismiss(&self, id: NotificationId) {
        if !self.remove(id) {
            log::debug!("Dismiss of unknown notification {}", id);
        }
    }

    /// Register a listener. It stays registered until the returned
    /// subscription is dropped or unsubscribed.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[Notification]) + Send + Sync + 'static,
    {
        let mut state = self.inner.state.lock().unwrap();
        let id = state.next_listener_id;
        state.next_listener_id += 1;
        state.listeners.insert(id, Arc::new(listener));

        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.state.lock().unwrap().notifications.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.state.lock().unwrap().listeners.len()
    }

    /// Cancel every pending expiry and drop all listeners
    pub fn shutdown(&self) {
        self.inner.shutdown.cancel();

        let mut state = self.inner.state.lock().unwrap();
        state.timers.clear();
        state.listeners.clear();
        log::debug!(
            "Notification bus shut down with {} notifications pending",
            state.notifications.len()
        );
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.shutdown.is_cancelled()
    }

    fn schedule_expiry(&self, id: NotificationId, timer: CancellationToken) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                log::warn!("No async runtime, notification {} will not expire", id);
                return;
            }
        };

        let bus = Arc::downgrade(&self.inner);
        let ttl = self.inner.ttl;
        handle.spawn(async move {
            tokio::select! {
                _ = timer.cancelled() => {}
                _ = tokio::time::sleep(ttl) => {
                    if let Some(inner) = bus.upgrade() {
                        NotificationBus { inner }.remove(id);
                    }
                }
            }
        });
    }

    fn remove(&self, id: NotificationId) -> bool {
        let removed = {
            let mut state = self.inner.state.lock().unwrap();
            let before = state.notifications.len();
            state.notifications.retain(|n| n.id != id);
            if let Some(timer) = state.timers.remove(&id) {
                timer.cancel();
            }
            state.notifications.len() != before
        };

        if removed {
            self.broadcast();
        }
        removed
    }

    // Listeners run outside the lock so they may publish or dismiss.
    fn broadcast(&self) {
        let (snapshot, listeners) = {
            let state = self.inner.state.lock().unwrap();
            let listeners: Vec<Listener> = state.listeners.values().cloned().collect();
            (state.notifications.clone(), listeners)
        };

        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Listener registration; unsubscribes on drop
pub struct Subscription {
    id: u64,
    bus: Weak<BusInner>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            inner.state.lock().unwrap().listeners.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(bus: &NotificationBus) -> (Subscription, Arc<Mutex<Vec<Vec<Notification>>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        let subscription = bus.subscribe(move |list| sink.lock().unwrap().push(list.to_vec()));
        (subscription, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_delivers_full_sequence() {
        let bus = NotificationBus::new();
        let (_sub, calls) = recorder(&bus);

        let first = bus.publish(NotificationKind::Info, "one");
        let second = bus.publish(NotificationKind::Success, "two");
        assert_ne!(first, second);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].len(), 2);
        assert_eq!(calls[1][0].id, first);
        assert_eq!(calls[1][1].message, "two");
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_expires_after_ttl() {
        let bus = NotificationBus::new();
        let (_sub, calls) = recorder(&bus);

        bus.publish(NotificationKind::Warning, "short lived");

        tokio::time::sleep(Duration::from_millis(4999)).await;
        assert_eq!(bus.notifications().len(), 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert!(bus.notifications().is_empty());

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_is_immediate_and_idempotent() {
        let bus = NotificationBus::new();
        let (_sub, calls) = recorder(&bus);

        let id = bus.publish(NotificationKind::Error, "boom");
        bus.dismiss(id);
        bus.dismiss(id);
        assert!(bus.notifications().is_empty());

        // Expiry of a dismissed notification does not notify again
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsubscribe_stops_delivery() {
        let bus = NotificationBus::new();
        let (sub, calls) = recorder(&bus);
        assert_eq!(bus.subscriber_count(), 1);

        sub.unsubscribe();
        assert_eq!(bus.subscriber_count(), 0);

        bus.publish(NotificationKind::Info, "nobody listens");
        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(bus.notifications().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_expiry() {
        let bus = NotificationBus::new();
        bus.publish(NotificationKind::Info, "kept");
        bus.shutdown();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(bus.notifications().len(), 1);
        assert!(bus.is_shut_down());

        bus.publish(NotificationKind::Info, "dropped");
        assert_eq!(bus.notifications().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_listener_can_dismiss_reentrantly() {
        let bus = NotificationBus::new();
        let handle = bus.clone();
        let _sub = bus.subscribe(move |list| {
            if let Some(n) = list.iter().find(|n| n.kind == NotificationKind::Info) {
                handle.dismiss(n.id);
            }
        });

        bus.publish(NotificationKind::Info, "auto dismissed");
        assert!(bus.notifications().is_empty());
    }

    #[test]
    fn test_publish_without_runtime_keeps_notification() {
        let bus = NotificationBus::with_ttl(Duration::from_millis(10));
        let id = bus.publish(NotificationKind::Success, "no runtime");
        assert_eq!(bus.notifications()[0].id, id);
    }
}
