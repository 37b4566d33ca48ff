use crate::authz::AuthzClient;
use crate::config::{ClanSyncConfig, MEMBER_WILDCARD};
use crate::RoleError;

/// One-shot registration of the member permission set and groups.
///
/// Runs three calls in order: register the member permissions, register the
/// member group, and attach the member wildcard to the admin group so admin
/// transitively carries every member permission. Safe to run repeatedly;
/// reload re-fires the whole sequence.
pub struct BootstrapAction<C: AuthzClient> {
    client: C,
    config: ClanSyncConfig,
}

impl<C: AuthzClient> BootstrapAction<C> {
    pub fn new(client: C, config: ClanSyncConfig) -> Self {
        BootstrapAction { client, config }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "bootstrap_roles", skip_all, err)
    )]
    pub async fn execute(&self) -> Result<(), RoleError> {
        self.client
            .register_permissions(&self.config.member_permissions())
            .await?;

        self.client
            .register_group(&self.config.member_group_def())
            .await?;

        self.client
            .add_permissions_to_group(&self.config.admin_group, &[MEMBER_WILDCARD])
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockAuthzClient;

    #[tokio::test]
    async fn test_bootstrap_registers_permissions_and_groups() {
        let client = MockAuthzClient::new();
        client.define_group("Admin");

        let action = BootstrapAction::new(client.clone(), ClanSyncConfig::default());
        action.execute().await.unwrap();

        let permissions = client.permissions.lock().unwrap();
        assert!(permissions.iter().any(|p| p.name == "member.*"));
        assert!(permissions.iter().any(|p| p.name == "member.say"));
        drop(permissions);

        let groups = client.groups.lock().unwrap();
        let member = groups.iter().find(|g| g.name == "Member").unwrap();
        assert_eq!(member.permissions, vec!["member.say"]);
        assert_eq!(member.owner, "plugin:clan-role-manager");

        let admin = groups.iter().find(|g| g.name == "Admin").unwrap();
        assert!(admin.permissions.iter().any(|p| p == "member.*"));
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let client = MockAuthzClient::new();
        client.define_group("Admin");

        let action = BootstrapAction::new(client.clone(), ClanSyncConfig::default());
        action.execute().await.unwrap();
        action.execute().await.unwrap();

        assert_eq!(client.permissions.lock().unwrap().len(), 2);

        let groups = client.groups.lock().unwrap();
        assert_eq!(groups.iter().filter(|g| g.name == "Member").count(), 1);
        let admin = groups.iter().find(|g| g.name == "Admin").unwrap();
        assert_eq!(
            admin.permissions.iter().filter(|p| *p == "member.*").count(),
            1
        );
    }

    #[tokio::test]
    async fn test_bootstrap_fails_without_admin_group() {
        let client = MockAuthzClient::new();

        let action = BootstrapAction::new(client, ClanSyncConfig::default());
        let result = action.execute().await;

        assert_eq!(result.unwrap_err(), RoleError::GroupNotFound);
    }
}
