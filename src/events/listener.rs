use async_trait::async_trait;

use super::SyncEvent;

/// Trait for observing synchronizer outcome events asynchronously.
///
/// Implement this trait to route outcomes to any async sink: logs, metrics,
/// alerts.
///
/// # Example
///
/// ```rust,ignore
/// use clansync::events::{SyncEvent, SyncListener};
/// use async_trait::async_trait;
///
/// struct AlertListener {
///     webhook_url: String,
/// }
///
/// #[async_trait]
/// impl SyncListener for AlertListener {
///     async fn handle(&self, event: &SyncEvent) {
///         if let SyncEvent::BootstrapFailed { reason, .. } = event {
///             // page the operator
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait SyncListener: Send + Sync + 'static {
    /// Handle one outcome event.
    ///
    /// This method is called for every event the synchronizer produces.
    /// Filter by matching on the event variant to handle specific outcomes.
    async fn handle(&self, event: &SyncEvent);
}

/// An instance-scoped set of listeners.
///
/// Owned by the synchronizer it was built for; two synchronizer instances
/// never share a set. An empty set is valid; events are then dropped.
pub struct ListenerSet {
    listeners: Vec<Box<dyn SyncListener>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener to receive events.
    ///
    /// Listeners are called in the order they are registered.
    pub fn listen(&mut self, listener: impl SyncListener) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Dispatch an event to all listeners in the set.
    pub async fn dispatch(&self, event: &SyncEvent) {
        for listener in &self.listeners {
            listener.handle(event).await;
        }
    }
}

impl Default for ListenerSet {
    fn default() -> Self {
        Self::new()
    }
}
