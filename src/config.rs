//! Configuration types for the clansync library.
//!
//! Centralizes the group names, owner tag, and permission definitions used
//! during bootstrap and reconciliation.
//!
//! # Example
//!
//! ```rust
//! use clansync::config::ClanSyncConfig;
//!
//! // Use defaults
//! let config = ClanSyncConfig::default();
//! assert_eq!(config.member_group, "Member");
//!
//! // Or customize
//! let config = ClanSyncConfig {
//!     member_group: "Citizen".to_owned(),
//!     ..Default::default()
//! };
//! ```

use crate::authz::{GroupDef, PermissionDef};

/// Wildcard permission carried by the admin group.
pub const MEMBER_WILDCARD: &str = "member.*";

/// Base permission granted to the member group at bootstrap.
pub const MEMBER_SAY: &str = "member.say";

/// Configuration for the role synchronizer.
///
/// Use `ClanSyncConfig::default()` for the standard group layout.
#[derive(Debug, Clone)]
pub struct ClanSyncConfig {
    /// Group granted to confirmed clan members.
    pub member_group: String,

    /// Higher-privilege group; users holding it are never granted the
    /// member group.
    pub admin_group: String,

    /// Provenance tag recorded on every permission and group this component
    /// registers, used by the authorization service for uninstall.
    pub owner: String,

    /// Chat messages must carry this kind to count as clan activity.
    pub clan_chat_kind: String,
}

impl Default for ClanSyncConfig {
    fn default() -> Self {
        Self {
            member_group: "Member".to_owned(),
            admin_group: "Admin".to_owned(),
            owner: "plugin:clan-role-manager".to_owned(),
            clan_chat_kind: "clan".to_owned(),
        }
    }
}

impl ClanSyncConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Permission definitions registered at bootstrap.
    pub fn member_permissions(&self) -> Vec<PermissionDef> {
        vec![
            PermissionDef {
                name: MEMBER_WILDCARD.to_owned(),
                description: "All clan member permissions".to_owned(),
                owner: self.owner.clone(),
            },
            PermissionDef {
                name: MEMBER_SAY.to_owned(),
                description: "Use basic member commands".to_owned(),
                owner: self.owner.clone(),
            },
        ]
    }

    /// The member group definition registered at bootstrap.
    ///
    /// Starts with the base permission only; the wildcard goes to the admin
    /// group instead.
    pub fn member_group_def(&self) -> GroupDef {
        GroupDef {
            name: self.member_group.clone(),
            owner: self.owner.clone(),
            permissions: vec![MEMBER_SAY.to_owned()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_groups() {
        let config = ClanSyncConfig::default();
        assert_eq!(config.member_group, "Member");
        assert_eq!(config.admin_group, "Admin");
        assert_eq!(config.owner, "plugin:clan-role-manager");
        assert_eq!(config.clan_chat_kind, "clan");
    }

    #[test]
    fn test_member_permissions_carry_owner_tag() {
        let config = ClanSyncConfig::default();
        let permissions = config.member_permissions();

        assert_eq!(permissions.len(), 2);
        assert!(permissions.iter().any(|p| p.name == MEMBER_WILDCARD));
        assert!(permissions.iter().any(|p| p.name == MEMBER_SAY));
        assert!(permissions.iter().all(|p| p.owner == config.owner));
    }

    #[test]
    fn test_member_group_starts_with_base_permission() {
        let config = ClanSyncConfig::default();
        let group = config.member_group_def();

        assert_eq!(group.name, "Member");
        assert_eq!(group.permissions, vec![MEMBER_SAY.to_owned()]);
        assert_eq!(group.owner, config.owner);
    }
}
