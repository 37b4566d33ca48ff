use crate::authz::AuthzClient;
use crate::config::ClanSyncConfig;
use crate::RoleError;

/// What a revoke check decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
    /// The member group was removed from the user.
    Revoked,
    /// The user did not hold the member group; nothing to do.
    NotMember,
}

/// Removes the member group from a user who no longer belongs to the clan.
pub struct RevokeMemberAction<C: AuthzClient> {
    client: C,
    config: ClanSyncConfig,
}

impl<C: AuthzClient> RevokeMemberAction<C> {
    pub fn new(client: C, config: ClanSyncConfig) -> Self {
        RevokeMemberAction { client, config }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "revoke_member", skip(self), err)
    )]
    pub async fn execute(&self, username: &str) -> Result<RevokeOutcome, RoleError> {
        let user = self.client.get_user(username).await?;

        if !user.has_group(&self.config.member_group) {
            return Ok(RevokeOutcome::NotMember);
        }

        self.client
            .remove_group(username, &self.config.member_group)
            .await?;
        Ok(RevokeOutcome::Revoked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockAuthzClient;

    fn action(client: &MockAuthzClient) -> RevokeMemberAction<MockAuthzClient> {
        RevokeMemberAction::new(client.clone(), ClanSyncConfig::default())
    }

    #[tokio::test]
    async fn test_revoke_removes_member_group() {
        let client = MockAuthzClient::new();
        client.add_user("alice", &["Member"]);

        let outcome = action(&client).execute("alice").await.unwrap();

        assert_eq!(outcome, RevokeOutcome::Revoked);
        assert!(client.user_groups("alice").unwrap().is_empty());
        assert_eq!(client.calls_matching("remove_group:alice"), 1);
    }

    #[tokio::test]
    async fn test_non_member_is_a_noop() {
        let client = MockAuthzClient::new();
        client.add_user("alice", &[]);

        let outcome = action(&client).execute("alice").await.unwrap();

        assert_eq!(outcome, RevokeOutcome::NotMember);
        assert_eq!(client.calls_matching("remove_group"), 0);
    }

    #[tokio::test]
    async fn test_admin_without_member_is_untouched() {
        let client = MockAuthzClient::new();
        client.add_user("alice", &["Admin"]);

        let outcome = action(&client).execute("alice").await.unwrap();

        assert_eq!(outcome, RevokeOutcome::NotMember);
        assert_eq!(client.user_groups("alice").unwrap(), vec!["Admin"]);
    }

    #[tokio::test]
    async fn test_unknown_user_fails_lookup() {
        let client = MockAuthzClient::new();

        let result = action(&client).execute("ghost").await;

        assert_eq!(result.unwrap_err(), RoleError::UserNotFound);
        assert_eq!(client.calls_matching("remove_group"), 0);
    }
}
