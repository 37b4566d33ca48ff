#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::client::{AuthzClient, GroupDef, PermissionDef, UserRecord};
use crate::RoleError;

/// In-memory authorization client for tests.
///
/// Records every call it receives so tests can assert exact call counts, and
/// can be switched to fail group mutations to exercise error paths.
#[derive(Clone)]
pub struct MockAuthzClient {
    pub users: Arc<Mutex<HashMap<String, Vec<String>>>>,
    pub permissions: Arc<Mutex<Vec<PermissionDef>>>,
    pub groups: Arc<Mutex<Vec<GroupDef>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    fail_mutations: Arc<AtomicBool>,
}

impl MockAuthzClient {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
            permissions: Arc::new(Mutex::new(vec![])),
            groups: Arc::new(Mutex::new(vec![])),
            calls: Arc::new(Mutex::new(vec![])),
            fail_mutations: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Seeds a user with the given groups.
    pub fn add_user(&self, username: &str, groups: &[&str]) {
        self.users.lock().unwrap().insert(
            username.to_owned(),
            groups.iter().map(|g| (*g).to_owned()).collect(),
        );
    }

    /// Seeds a pre-existing group, e.g. the admin group the backend owns.
    pub fn define_group(&self, name: &str) {
        self.groups.lock().unwrap().push(GroupDef {
            name: name.to_owned(),
            owner: "core".to_owned(),
            permissions: vec![],
        });
    }

    /// Current groups of a user, if the user exists.
    pub fn user_groups(&self, username: &str) -> Option<Vec<String>> {
        self.users.lock().unwrap().get(username).cloned()
    }

    /// When set, `add_group` and `remove_group` fail with a backend error.
    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    /// Number of recorded calls starting with `prefix`.
    pub fn calls_matching(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockAuthzClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthzClient for MockAuthzClient {
    async fn register_permissions(&self, permissions: &[PermissionDef]) -> Result<(), RoleError> {
        self.record("register_permissions".to_owned());
        let mut registered = self.permissions.lock().unwrap();
        for permission in permissions {
            if !registered.iter().any(|p| p.name == permission.name) {
                registered.push(permission.clone());
            }
        }
        Ok(())
    }

    async fn register_group(&self, group: &GroupDef) -> Result<(), RoleError> {
        self.record(format!("register_group:{}", group.name));
        let mut groups = self.groups.lock().unwrap();
        if !groups.iter().any(|g| g.name == group.name) {
            groups.push(group.clone());
        }
        Ok(())
    }

    async fn add_permissions_to_group(
        &self,
        group: &str,
        permissions: &[&str],
    ) -> Result<(), RoleError> {
        self.record(format!("add_permissions_to_group:{}", group));
        let mut groups = self.groups.lock().unwrap();
        let target = groups
            .iter_mut()
            .find(|g| g.name == group)
            .ok_or(RoleError::GroupNotFound)?;
        for permission in permissions {
            if !target.permissions.iter().any(|p| p == permission) {
                target.permissions.push((*permission).to_owned());
            }
        }
        Ok(())
    }

    async fn get_user(&self, username: &str) -> Result<UserRecord, RoleError> {
        self.record(format!("get_user:{}", username));
        let users = self.users.lock().unwrap();
        users
            .get(username)
            .map(|groups| UserRecord {
                username: username.to_owned(),
                groups: groups.clone(),
            })
            .ok_or(RoleError::UserNotFound)
    }

    async fn add_group(&self, username: &str, group: &str) -> Result<(), RoleError> {
        self.record(format!("add_group:{}:{}", username, group));
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(RoleError::Backend("injected mutation failure".to_owned()));
        }
        let mut users = self.users.lock().unwrap();
        let groups = users.get_mut(username).ok_or(RoleError::UserNotFound)?;
        // idempotent on repeats, like the real backend is assumed to be
        if !groups.iter().any(|g| g == group) {
            groups.push(group.to_owned());
        }
        Ok(())
    }

    async fn remove_group(&self, username: &str, group: &str) -> Result<(), RoleError> {
        self.record(format!("remove_group:{}:{}", username, group));
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(RoleError::Backend("injected mutation failure".to_owned()));
        }
        let mut users = self.users.lock().unwrap();
        let groups = users.get_mut(username).ok_or(RoleError::UserNotFound)?;
        groups.retain(|g| g != group);
        Ok(())
    }
}
