pub mod actions;
pub mod authz;
pub mod bus;
pub mod config;
pub mod dedup;
pub mod events;
pub mod lifecycle;
pub mod router;

pub use actions::BootstrapAction;
pub use actions::GrantMemberAction;
pub use actions::GrantOutcome;
pub use actions::RevokeMemberAction;
pub use actions::RevokeOutcome;
pub use authz::AuthzClient;
pub use authz::GroupDef;
pub use authz::PermissionDef;
pub use authz::UserRecord;
pub use bus::ClanEvent;
pub use bus::EventBus;
pub use bus::EventHandler;
pub use bus::EventKind;
pub use bus::SubscriptionId;
pub use config::ClanSyncConfig;
pub use dedup::NormalizedSet;
pub use events::ListenerSet;
pub use events::SyncEvent;
pub use events::SyncListener;
pub use lifecycle::ClanSync;
pub use lifecycle::SyncHandle;
pub use router::EventRouter;

#[cfg(any(test, feature = "mocks"))]
pub use authz::MockAuthzClient;

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum RoleError {
    UserNotFound,
    GroupNotFound,
    Backend(String),
}

impl std::error::Error for RoleError {}

impl fmt::Display for RoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleError::UserNotFound => write!(f, "User not found"),
            RoleError::GroupNotFound => write!(f, "Group not found"),
            RoleError::Backend(msg) => write!(f, "Authorization backend error: {}", msg),
        }
    }
}
