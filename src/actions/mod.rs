pub mod bootstrap;
pub mod grant_member;
pub mod revoke_member;

pub use bootstrap::BootstrapAction;
pub use grant_member::{GrantMemberAction, GrantOutcome};
pub use revoke_member::{RevokeMemberAction, RevokeOutcome};
