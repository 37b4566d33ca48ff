//! Inbound event transport.
//!
//! The host application emits clan lifecycle and chat events on an
//! [`EventBus`]; the synchronizer subscribes its router under the four kinds
//! it cares about. Handlers suspend on their own async work without blocking
//! dispatch of later events to other subscribers.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use clansync::bus::{ClanEvent, EventBus};
//!
//! let bus = Arc::new(EventBus::new());
//! // ... activate the synchronizer against the bus ...
//! bus.emit(&ClanEvent::joined("alice")).await;
//! ```

mod dispatcher;
mod event;
mod handler;

pub use dispatcher::{EventBus, SubscriptionId};
pub use event::{ClanEvent, EventKind};
pub use handler::EventHandler;
