use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::RoleError;

/// A named capability registered with the authorization service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionDef {
    /// Dotted capability name, e.g. `member.say` or `member.*`.
    pub name: String,
    pub description: String,
    /// Provenance tag identifying the registering component.
    pub owner: String,
}

/// A named group owned by a component, with its permission set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDef {
    pub name: String,
    pub owner: String,
    pub permissions: Vec<String>,
}

/// Snapshot of a user's group memberships at fetch time.
///
/// The synchronizer never caches these beyond a single reconciliation call;
/// every decision starts from a fresh fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub groups: Vec<String>,
}

impl UserRecord {
    pub fn has_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

#[cfg(any(test, feature = "mocks"))]
impl UserRecord {
    pub fn mock(username: &str) -> Self {
        UserRecord {
            username: username.to_owned(),
            groups: vec![],
        }
    }

    pub fn mock_with_groups(username: &str, groups: &[&str]) -> Self {
        UserRecord {
            username: username.to_owned(),
            groups: groups.iter().map(|g| (*g).to_owned()).collect(),
        }
    }
}

/// Client for the external authorization service.
///
/// Registration calls must be idempotent on repeats: the synchronizer re-runs
/// its bootstrap sequence on every reload.
#[async_trait]
pub trait AuthzClient: Send + Sync + 'static {
    /// Registers permission definitions, skipping names already known.
    async fn register_permissions(&self, permissions: &[PermissionDef]) -> Result<(), RoleError>;

    /// Registers a group, skipping it if a group of that name exists.
    async fn register_group(&self, group: &GroupDef) -> Result<(), RoleError>;

    /// Adds permissions to an existing group.
    async fn add_permissions_to_group(
        &self,
        group: &str,
        permissions: &[&str],
    ) -> Result<(), RoleError>;

    /// Fetches a user's current group memberships.
    ///
    /// Fails with [`RoleError::UserNotFound`] if the username cannot be
    /// resolved.
    async fn get_user(&self, username: &str) -> Result<UserRecord, RoleError>;

    /// Adds the user to a group.
    ///
    /// Must tolerate the user already being a member: the synchronizer does
    /// not serialize concurrent reconciliations per user, so a duplicate add
    /// can arrive when two events race past the membership check.
    async fn add_group(&self, username: &str, group: &str) -> Result<(), RoleError>;

    /// Removes the user from a group. Must tolerate the user not being a
    /// member.
    async fn remove_group(&self, username: &str, group: &str) -> Result<(), RoleError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_group() {
        let user = UserRecord::mock_with_groups("alice", &["Member"]);
        assert!(user.has_group("Member"));
        assert!(!user.has_group("Admin"));
    }

    #[test]
    fn test_has_group_is_case_sensitive() {
        let user = UserRecord::mock_with_groups("alice", &["Member"]);
        assert!(!user.has_group("member"));
    }

    #[test]
    fn test_mock_user_has_no_groups() {
        let user = UserRecord::mock("alice");
        assert!(user.groups.is_empty());
    }
}
