//! Activation, reload, and shutdown of the synchronizer.
//!
//! The original shape of this component was a record of handler references
//! attached to a shared host object. Here the host gets an explicit
//! [`SyncHandle`] back from activation instead; the composing application
//! holds at most one handle per component slot.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use async_trait::async_trait;
use chrono::Utc;

use crate::actions::BootstrapAction;
use crate::authz::AuthzClient;
use crate::bus::{ClanEvent, EventBus, EventHandler, EventKind, SubscriptionId};
use crate::config::ClanSyncConfig;
use crate::events::listeners::LoggingListener;
use crate::events::{ListenerSet, SyncEvent};
use crate::router::EventRouter;

const ROUTED_KINDS: [EventKind; 4] = [
    EventKind::PlayerJoined,
    EventKind::PlayerLeft,
    EventKind::PlayerKicked,
    EventKind::ChatMessage,
];

/// One installed set of bus subscriptions.
///
/// At most one generation is attached at any time; reload swaps the whole
/// record, dedup cache included.
struct Generation {
    subscriptions: Vec<(EventKind, SubscriptionId)>,
    end: SubscriptionId,
}

type GenerationSlot = Mutex<Option<Generation>>;

/// Builder for the role synchronizer.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use clansync::{ClanSync, EventBus};
///
/// let bus = Arc::new(EventBus::new());
/// let handle = ClanSync::new(Arc::clone(&bus), client).activate().await;
///
/// // ... events flow ...
///
/// handle.shutdown().await;
/// ```
pub struct ClanSync<C: AuthzClient + Clone> {
    bus: Arc<EventBus>,
    client: C,
    config: ClanSyncConfig,
    listeners: ListenerSet,
}

impl<C: AuthzClient + Clone> ClanSync<C> {
    /// Creates a synchronizer with the default configuration and a logging
    /// listener.
    pub fn new(bus: Arc<EventBus>, client: C) -> Self {
        let mut listeners = ListenerSet::new();
        listeners.listen(LoggingListener::new());
        ClanSync {
            bus,
            client,
            config: ClanSyncConfig::default(),
            listeners,
        }
    }

    pub fn with_config(mut self, config: ClanSyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the default listener set.
    ///
    /// ```rust,ignore
    /// let sync = ClanSync::new(bus, client).with_listeners(|set| {
    ///     set.listen(LoggingListener::new()).listen(MyMetricsListener);
    /// });
    /// ```
    pub fn with_listeners<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut ListenerSet),
    {
        let mut listeners = ListenerSet::new();
        f(&mut listeners);
        self.listeners = listeners;
        self
    }

    /// Installs the component: fires bootstrap, subscribes the four event
    /// handlers, and arms the terminal handler.
    ///
    /// Bootstrap runs as a spawned task so a slow or failing backend never
    /// delays event handling; its outcome arrives through the listener set.
    pub async fn activate(self) -> SyncHandle<C> {
        let handle = SyncHandle {
            bus: self.bus,
            client: self.client,
            config: self.config,
            listeners: Arc::new(self.listeners),
            generation: Arc::new(Mutex::new(None)),
        };
        handle.install();
        handle
            .listeners
            .dispatch(&SyncEvent::Started { at: Utc::now() })
            .await;
        handle
    }
}

/// Handle to an activated synchronizer.
///
/// Dropping the handle does not detach the handlers; the terminal end event
/// or an explicit [`shutdown`](SyncHandle::shutdown) does.
pub struct SyncHandle<C: AuthzClient + Clone> {
    bus: Arc<EventBus>,
    client: C,
    config: ClanSyncConfig,
    listeners: Arc<ListenerSet>,
    generation: Arc<GenerationSlot>,
}

impl<C: AuthzClient + Clone> SyncHandle<C> {
    fn install(&self) {
        let bootstrap = BootstrapAction::new(self.client.clone(), self.config.clone());
        let listeners = Arc::clone(&self.listeners);
        tokio::spawn(async move {
            match bootstrap.execute().await {
                Ok(()) => {
                    listeners
                        .dispatch(&SyncEvent::BootstrapCompleted { at: Utc::now() })
                        .await;
                }
                Err(err) => {
                    // non-fatal: event handling works without bootstrap,
                    // and a later reload retries it
                    listeners
                        .dispatch(&SyncEvent::BootstrapFailed {
                            reason: err.to_string(),
                            at: Utc::now(),
                        })
                        .await;
                }
            }
        });

        let router: Arc<dyn EventHandler> = Arc::new(EventRouter::new(
            self.client.clone(),
            self.config.clone(),
            Arc::clone(&self.listeners),
        ));

        let subscriptions = ROUTED_KINDS
            .iter()
            .map(|&kind| (kind, self.bus.subscribe(kind, Arc::clone(&router))))
            .collect();

        let end = self.bus.once(
            EventKind::End,
            Arc::new(EndHandler {
                bus: Arc::downgrade(&self.bus),
                generation: Arc::clone(&self.generation),
                listeners: Arc::clone(&self.listeners),
            }),
        );

        *self
            .generation
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Generation { subscriptions, end });
    }

    /// Detaches the current generation and installs a fresh one.
    ///
    /// The dedup cache is replaced, not merged, and bootstrap is re-fired.
    pub async fn reload(&self) {
        if detach_generation(&self.bus, &self.generation) {
            self.listeners
                .dispatch(&SyncEvent::Reloaded { at: Utc::now() })
                .await;
        }
        self.install();
        self.listeners
            .dispatch(&SyncEvent::Started { at: Utc::now() })
            .await;
    }

    /// Detaches the generation and reports shutdown.
    ///
    /// Idempotent: a second call, or one after the terminal event already
    /// fired, is a silent no-op. In-flight reconciliations are not awaited.
    pub async fn shutdown(&self) {
        if detach_generation(&self.bus, &self.generation) {
            self.listeners
                .dispatch(&SyncEvent::Stopped { at: Utc::now() })
                .await;
        }
    }

    /// Whether a listener generation is currently attached.
    pub fn is_active(&self) -> bool {
        self.generation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// Detaches and drops the attached generation, if any.
fn detach_generation(bus: &EventBus, slot: &GenerationSlot) -> bool {
    let taken = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
    match taken {
        Some(generation) => {
            for (kind, id) in generation.subscriptions {
                bus.unsubscribe(kind, id);
            }
            // no-op when the once handler already fired and consumed itself
            bus.unsubscribe(EventKind::End, generation.end);
            true
        }
        None => false,
    }
}

/// Terminal handler armed via `once`: detaches the generation when the host
/// signals the end of the component's life.
struct EndHandler {
    bus: Weak<EventBus>,
    generation: Arc<GenerationSlot>,
    listeners: Arc<ListenerSet>,
}

#[async_trait]
impl EventHandler for EndHandler {
    async fn handle(&self, _event: &ClanEvent) {
        let Some(bus) = self.bus.upgrade() else { return };
        if detach_generation(&bus, &self.generation) {
            self.listeners
                .dispatch(&SyncEvent::Stopped { at: Utc::now() })
                .await;
        }
    }
}
