use crate::authz::AuthzClient;
use crate::config::ClanSyncConfig;
use crate::RoleError;

/// What a grant check decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantOutcome {
    /// The member group was added to the user.
    Granted,
    /// The user already held the member group; nothing to do.
    AlreadyMember,
    /// The user holds the admin group, which supersedes member; no grant.
    AdminExempt,
}

/// Grants the member group to a user unless current state says otherwise.
///
/// Every call starts from a fresh fetch of the user's groups. Concurrent
/// calls for the same user are not serialized here; a duplicate add that
/// slips past the membership check is absorbed by the backend's idempotent
/// add-group.
pub struct GrantMemberAction<C: AuthzClient> {
    client: C,
    config: ClanSyncConfig,
}

impl<C: AuthzClient> GrantMemberAction<C> {
    pub fn new(client: C, config: ClanSyncConfig) -> Self {
        GrantMemberAction { client, config }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "grant_member", skip(self), err)
    )]
    pub async fn execute(&self, username: &str) -> Result<GrantOutcome, RoleError> {
        let user = self.client.get_user(username).await?;

        if user.has_group(&self.config.admin_group) {
            return Ok(GrantOutcome::AdminExempt);
        }
        if user.has_group(&self.config.member_group) {
            return Ok(GrantOutcome::AlreadyMember);
        }

        self.client
            .add_group(username, &self.config.member_group)
            .await?;
        Ok(GrantOutcome::Granted)
    }
}
