//! Maps bus events to reconciliation calls.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::actions::{
    GrantMemberAction, GrantOutcome, RevokeMemberAction, RevokeOutcome,
};
use crate::authz::AuthzClient;
use crate::bus::{ClanEvent, EventHandler};
use crate::config::ClanSyncConfig;
use crate::dedup::NormalizedSet;
use crate::events::{ListenerSet, SyncEvent};

/// Routes clan events to grant/revoke calls.
///
/// One router instance is subscribed under all four event kinds, and the
/// dedup cache it owns lives exactly as long as the listener generation it
/// belongs to. Every outcome, success or failure, is converted to a
/// [`SyncEvent`] here; no error crosses back into the bus.
pub struct EventRouter<C: AuthzClient + Clone> {
    grant: GrantMemberAction<C>,
    revoke: RevokeMemberAction<C>,
    config: ClanSyncConfig,
    seen_in_chat: Mutex<NormalizedSet>,
    listeners: Arc<ListenerSet>,
}

impl<C: AuthzClient + Clone> EventRouter<C> {
    pub fn new(client: C, config: ClanSyncConfig, listeners: Arc<ListenerSet>) -> Self {
        EventRouter {
            grant: GrantMemberAction::new(client.clone(), config.clone()),
            revoke: RevokeMemberAction::new(client, config.clone()),
            config,
            seen_in_chat: Mutex::new(NormalizedSet::new()),
            listeners,
        }
    }

    async fn emit(&self, event: SyncEvent) {
        self.listeners.dispatch(&event).await;
    }

    /// Runs a grant check and reports its outcome. Returns whether the check
    /// resolved, i.e. current state was confirmed or brought up to date.
    async fn grant_member(&self, username: &str) -> bool {
        match self.grant.execute(username).await {
            Ok(GrantOutcome::Granted) => {
                self.emit(SyncEvent::MemberGranted {
                    username: username.to_owned(),
                    at: Utc::now(),
                })
                .await;
                true
            }
            Ok(GrantOutcome::AdminExempt) => {
                self.emit(SyncEvent::GrantSkipped {
                    username: username.to_owned(),
                    at: Utc::now(),
                })
                .await;
                true
            }
            Ok(GrantOutcome::AlreadyMember) => true,
            Err(err) => {
                self.emit(SyncEvent::GrantFailed {
                    username: username.to_owned(),
                    reason: err.to_string(),
                    at: Utc::now(),
                })
                .await;
                false
            }
        }
    }

    async fn revoke_member(&self, username: &str) {
        match self.revoke.execute(username).await {
            Ok(RevokeOutcome::Revoked) => {
                self.emit(SyncEvent::MemberRevoked {
                    username: username.to_owned(),
                    at: Utc::now(),
                })
                .await;
            }
            Ok(RevokeOutcome::NotMember) => {}
            Err(err) => {
                self.emit(SyncEvent::RevokeFailed {
                    username: username.to_owned(),
                    reason: err.to_string(),
                    at: Utc::now(),
                })
                .await;
            }
        }
    }

    async fn on_chat_message(&self, kind: &str, username: Option<&str>) {
        if kind != self.config.clan_chat_kind {
            return;
        }
        let Some(username) = username else { return };
        if self.seen(username) {
            return;
        }

        // cache only after the check resolves; a failed grant leaves the
        // user eligible for a retry on their next message
        if self.grant_member(username).await {
            self.seen_in_chat
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(username);
        }
    }

    fn seen(&self, username: &str) -> bool {
        self.seen_in_chat
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(username)
    }
}

#[async_trait]
impl<C: AuthzClient + Clone> EventHandler for EventRouter<C> {
    async fn handle(&self, event: &ClanEvent) {
        match event {
            ClanEvent::PlayerJoined {
                username: Some(username),
            } => {
                self.grant_member(username).await;
            }
            ClanEvent::PlayerLeft {
                username: Some(username),
            }
            | ClanEvent::PlayerKicked {
                username: Some(username),
            } => {
                self.revoke_member(username).await;
            }
            ClanEvent::ChatMessage { kind, username } => {
                self.on_chat_message(kind, username.as_deref()).await;
            }
            // events without a username are malformed input, not failures
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockAuthzClient;

    fn router(client: &MockAuthzClient) -> EventRouter<MockAuthzClient> {
        EventRouter::new(
            client.clone(),
            ClanSyncConfig::default(),
            Arc::new(ListenerSet::new()),
        )
    }

    #[tokio::test]
    async fn test_join_without_username_is_ignored() {
        let client = MockAuthzClient::new();
        let router = router(&client);

        router
            .handle(&ClanEvent::PlayerJoined { username: None })
            .await;

        assert!(client.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_clan_chat_is_ignored() {
        let client = MockAuthzClient::new();
        client.add_user("alice", &[]);
        let router = router(&client);

        router
            .handle(&ClanEvent::chat("global", Some("alice")))
            .await;

        assert!(client.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_without_username_is_ignored() {
        let client = MockAuthzClient::new();
        let router = router(&client);

        router.handle(&ClanEvent::chat("clan", None)).await;

        assert!(client.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clan_chat_grants_once_per_user() {
        let client = MockAuthzClient::new();
        client.add_user("Bob", &[]);
        let router = router(&client);

        router.handle(&ClanEvent::chat("clan", Some("Bob"))).await;
        router.handle(&ClanEvent::chat("clan", Some("BOB"))).await;
        router.handle(&ClanEvent::chat("clan", Some("bob"))).await;

        assert_eq!(client.calls_matching("get_user"), 1);
        assert_eq!(client.calls_matching("add_group"), 1);
        assert_eq!(client.user_groups("Bob").unwrap(), vec!["Member"]);
    }

    #[tokio::test]
    async fn test_failed_chat_grant_stays_eligible() {
        let client = MockAuthzClient::new();
        client.add_user("alice", &[]);
        client.fail_mutations(true);
        let router = router(&client);

        router.handle(&ClanEvent::chat("clan", Some("alice"))).await;
        assert!(client.user_groups("alice").unwrap().is_empty());

        client.fail_mutations(false);
        router.handle(&ClanEvent::chat("clan", Some("alice"))).await;

        assert_eq!(client.user_groups("alice").unwrap(), vec!["Member"]);
        assert_eq!(client.calls_matching("add_group"), 2);
    }

    #[tokio::test]
    async fn test_join_path_bypasses_chat_cache() {
        let client = MockAuthzClient::new();
        client.add_user("alice", &[]);
        let router = router(&client);

        router.handle(&ClanEvent::chat("clan", Some("alice"))).await;
        router.handle(&ClanEvent::left("alice")).await;
        // the chat cache does not stop the join path from re-checking
        router.handle(&ClanEvent::joined("alice")).await;

        assert_eq!(client.user_groups("alice").unwrap(), vec!["Member"]);
        assert_eq!(client.calls_matching("add_group"), 2);
    }

    #[tokio::test]
    async fn test_kick_revokes_like_leave() {
        let client = MockAuthzClient::new();
        client.add_user("alice", &["Member"]);
        let router = router(&client);

        router.handle(&ClanEvent::kicked("alice")).await;

        assert!(client.user_groups("alice").unwrap().is_empty());
        assert_eq!(client.calls_matching("remove_group"), 1);
    }
}
