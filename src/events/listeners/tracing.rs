use async_trait::async_trait;

use crate::events::{SyncEvent, SyncListener};

/// Emits synchronizer outcomes as tracing events.
///
/// Requires the `tracing` feature to be enabled.
///
/// # Example
///
/// ```rust,ignore
/// use clansync::events::listeners::TracingListener;
///
/// let handle = ClanSync::new(bus, client)
///     .with_listeners(|set| {
///         set.listen(TracingListener);
///     })
///     .activate()
///     .await;
/// ```
pub struct TracingListener;

#[async_trait]
impl SyncListener for TracingListener {
    async fn handle(&self, event: &SyncEvent) {
        tracing::info!(
            target: "clansync::events",
            event_name = event.name(),
            ?event,
            "sync event"
        );
    }
}
