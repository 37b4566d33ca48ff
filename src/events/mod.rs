//! Outcome events emitted by the role synchronizer.
//!
//! Every significant action (a grant, a revoke, a bootstrap phase, a
//! lifecycle transition) produces a [`SyncEvent`] routed to the listeners
//! the synchronizer was built with. If no listeners are registered, events
//! are silently dropped.
//!
//! Unlike a process-global registry, each synchronizer instance owns its
//! listener set; two instances never share or leak observers.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use clansync::ClanSync;
//! use clansync::events::listeners::LoggingListener;
//!
//! let handle = ClanSync::new(bus, client)
//!     .with_listeners(|set| {
//!         set.listen(LoggingListener::new());
//!     })
//!     .activate()
//!     .await;
//! ```
//!
//! # Custom Listeners
//!
//! Implement the [`SyncListener`] trait to route outcomes elsewhere:
//!
//! ```rust,ignore
//! use clansync::events::{SyncEvent, SyncListener};
//! use async_trait::async_trait;
//!
//! struct MetricsListener;
//!
//! #[async_trait]
//! impl SyncListener for MetricsListener {
//!     async fn handle(&self, event: &SyncEvent) {
//!         match event {
//!             SyncEvent::MemberGranted { .. } => {
//!                 // increment grant counter
//!             }
//!             SyncEvent::GrantFailed { .. } => {
//!                 // increment failure counter
//!             }
//!             _ => {}
//!         }
//!     }
//! }
//! ```

mod event;
mod listener;

pub mod listeners;

pub use event::SyncEvent;
pub use listener::{ListenerSet, SyncListener};
