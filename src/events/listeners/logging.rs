use async_trait::async_trait;

use crate::events::{SyncEvent, SyncListener};

/// Logs all synchronizer outcomes using the `log` crate.
///
/// # Example
///
/// ```rust,ignore
/// use clansync::events::listeners::LoggingListener;
///
/// let handle = ClanSync::new(bus, client)
///     .with_listeners(|set| {
///         set.listen(LoggingListener::new());
///     })
///     .activate()
///     .await;
/// ```
pub struct LoggingListener {
    level: log::Level,
}

impl LoggingListener {
    /// Creates a new logging listener at INFO level.
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
        }
    }

    /// Creates a new logging listener at the specified level.
    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SyncListener for LoggingListener {
    async fn handle(&self, event: &SyncEvent) {
        log::log!(
            target: "clansync::events",
            self.level,
            "event={} {:?}",
            event.name(),
            event
        );
    }
}
