use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::{ClanEvent, EventHandler, EventKind};

/// Identifier of a single subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: u64,
    handler: Arc<dyn EventHandler>,
    once: bool,
}

/// In-process event dispatcher.
///
/// Handlers for a kind run in subscription order; each handler's future is
/// awaited before the next runs. The registry lock is released before any
/// handler is invoked, so a running handler may subscribe or unsubscribe,
/// including removing itself.
pub struct EventBus {
    subscriptions: Mutex<HashMap<EventKind, Vec<Subscription>>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscriptions: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Subscribes a handler under an event kind.
    pub fn subscribe(&self, kind: EventKind, handler: Arc<dyn EventHandler>) -> SubscriptionId {
        self.insert(kind, handler, false)
    }

    /// Subscribes a handler that is removed from the registry before its
    /// first (and only) invocation.
    pub fn once(&self, kind: EventKind, handler: Arc<dyn EventHandler>) -> SubscriptionId {
        self.insert(kind, handler, true)
    }

    fn insert(
        &self,
        kind: EventKind,
        handler: Arc<dyn EventHandler>,
        once: bool,
    ) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.lock()
            .entry(kind)
            .or_default()
            .push(Subscription { id, handler, once });
        SubscriptionId(id)
    }

    /// Removes a subscription. Unknown or already-removed ids are ignored.
    pub fn unsubscribe(&self, kind: EventKind, id: SubscriptionId) {
        if let Some(list) = self.lock().get_mut(&kind) {
            list.retain(|s| s.id != id.0);
        }
    }

    /// Number of handlers currently registered under a kind.
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.lock().get(&kind).map_or(0, Vec::len)
    }

    /// Dispatches an event to every handler registered under its kind.
    ///
    /// One-shot handlers are unregistered before they run, so re-emitting the
    /// same kind cannot invoke them twice.
    pub async fn emit(&self, event: &ClanEvent) {
        let kind = event.kind();
        let handlers: Vec<Arc<dyn EventHandler>> = {
            let mut subscriptions = self.lock();
            match subscriptions.get_mut(&kind) {
                Some(list) => {
                    let snapshot = list.iter().map(|s| Arc::clone(&s.handler)).collect();
                    list.retain(|s| !s.once);
                    snapshot
                }
                None => Vec::new(),
            }
        };

        for handler in handlers {
            handler.handle(event).await;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<EventKind, Vec<Subscription>>> {
        // the map stays coherent even if a lock holder panicked
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Default)]
    struct Recorder {
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EventHandler for Recorder {
        async fn handle(&self, event: &ClanEvent) {
            self.seen
                .lock()
                .unwrap()
                .push(event.kind().as_str().to_owned());
        }
    }

    #[tokio::test]
    async fn test_emit_reaches_subscribed_handler() {
        let bus = EventBus::new();
        let recorder = Recorder::default();
        bus.subscribe(EventKind::PlayerJoined, Arc::new(recorder.clone()));

        bus.emit(&ClanEvent::joined("alice")).await;
        bus.emit(&ClanEvent::left("alice")).await;

        assert_eq!(recorder.seen(), vec!["clan:player_joined"]);
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let recorder = Recorder::default();
        let id = bus.subscribe(EventKind::PlayerJoined, Arc::new(recorder.clone()));

        bus.unsubscribe(EventKind::PlayerJoined, id);
        bus.emit(&ClanEvent::joined("alice")).await;

        assert!(recorder.seen().is_empty());
        assert_eq!(bus.handler_count(EventKind::PlayerJoined), 0);
    }

    #[tokio::test]
    async fn test_unsubscribe_unknown_id_is_noop() {
        let bus = EventBus::new();
        let recorder = Recorder::default();
        bus.subscribe(EventKind::PlayerJoined, Arc::new(recorder.clone()));
        let stale = bus.subscribe(EventKind::PlayerLeft, Arc::new(recorder.clone()));
        bus.unsubscribe(EventKind::PlayerLeft, stale);

        // removing it again, or against the wrong kind, changes nothing
        bus.unsubscribe(EventKind::PlayerLeft, stale);
        bus.unsubscribe(EventKind::PlayerJoined, stale);

        assert_eq!(bus.handler_count(EventKind::PlayerJoined), 1);
    }

    #[tokio::test]
    async fn test_once_fires_exactly_once() {
        let bus = EventBus::new();
        let recorder = Recorder::default();
        bus.once(EventKind::End, Arc::new(recorder.clone()));

        bus.emit(&ClanEvent::End).await;
        bus.emit(&ClanEvent::End).await;

        assert_eq!(recorder.seen().len(), 1);
        assert_eq!(bus.handler_count(EventKind::End), 0);
    }

    #[tokio::test]
    async fn test_same_handler_under_multiple_kinds() {
        let bus = EventBus::new();
        let recorder = Recorder::default();
        let handler: Arc<dyn EventHandler> = Arc::new(recorder.clone());
        bus.subscribe(EventKind::PlayerJoined, Arc::clone(&handler));
        bus.subscribe(EventKind::PlayerLeft, handler);

        bus.emit(&ClanEvent::joined("alice")).await;
        bus.emit(&ClanEvent::left("alice")).await;

        assert_eq!(recorder.seen(), vec!["clan:player_joined", "clan:player_left"]);
    }
}
