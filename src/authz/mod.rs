//! Authorization-service client seam.
//!
//! This module defines the contract against the external authorization
//! service that owns groups and permissions. Implement [`AuthzClient`] to
//! wire the synchronizer to your backend.
//!
//! # Mock Implementation
//!
//! Enable the `mocks` feature for an in-memory client useful for testing:
//!
//! - [`MockAuthzClient`]

mod client;

#[cfg(any(test, feature = "mocks"))]
mod mock;

pub use client::AuthzClient;
pub use client::GroupDef;
pub use client::PermissionDef;
pub use client::UserRecord;

#[cfg(any(test, feature = "mocks"))]
pub use mock::MockAuthzClient;
