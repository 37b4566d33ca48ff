use async_trait::async_trait;

use super::ClanEvent;

/// Trait for handling bus events asynchronously.
///
/// A handler must never panic or return an error across this boundary;
/// failures inside a handler are its own to report.
///
/// # Example
///
/// ```rust,ignore
/// use clansync::bus::{ClanEvent, EventHandler};
/// use async_trait::async_trait;
///
/// struct JoinCounter;
///
/// #[async_trait]
/// impl EventHandler for JoinCounter {
///     async fn handle(&self, event: &ClanEvent) {
///         if let ClanEvent::PlayerJoined { .. } = event {
///             // count the join
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync + 'static {
    /// Handle one bus event.
    async fn handle(&self, event: &ClanEvent);
}
