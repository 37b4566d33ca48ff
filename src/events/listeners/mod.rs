//! Built-in outcome listeners.
//!
//! These listeners provide common functionality out of the box. Register
//! them when building the synchronizer.

mod logging;
#[cfg(feature = "tracing")]
mod tracing;

pub use logging::LoggingListener;
#[cfg(feature = "tracing")]
pub use self::tracing::TracingListener;
