//! In-memory collaborator
//!
//! Backs dev mode and tests without a hosted service. Mirrors the hosted
//! semantics: unique emails, profile rows keyed by identity id, newest-first
//! listing. Profile updates and identity deletions can be made to fail so
//! partial-failure paths are testable.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uuid::Uuid;

use crate::collaborator::{AuthIdentity, Collaborator, ProfilePatch, ProfileRow};
use crate::types::{NetLearnError, Result};

#[derive(Debug, Clone)]
struct Credential {
    user_id: String,
    password: String,
}

/// In-memory identity provider and profile store
#[derive(Default)]
pub struct MemoryCollaborator {
    /// Credentials keyed by email
    credentials: DashMap<String, Credential>,
    /// Profile rows keyed by identity id
    profiles: DashMap<String, ProfileRow>,
    /// When set, `update_profile` fails (partial-failure injection)
    fail_profile_updates: AtomicBool,
    /// When set, `delete_identity` fails (best-effort companion deletion)
    fail_identity_deletes: AtomicBool,
    /// Number of `update_profile` calls received
    profile_update_calls: AtomicUsize,
}

impl MemoryCollaborator {
    /// Create an empty in-memory collaborator
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account and insert its profile row in one step
    ///
    /// Dev-mode seeding helper; the real flow is sign_up + insert_profile.
    pub fn seed_account(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
        is_admin: bool,
    ) -> ProfileRow {
        let id = Uuid::new_v4().to_string();
        self.credentials.insert(
            email.to_string(),
            Credential {
                user_id: id.clone(),
                password: password.to_string(),
            },
        );

        let mut row = ProfileRow::new_free(id.clone(), name.map(str::to_string), email.to_string());
        row.is_admin = is_admin;
        self.profiles.insert(id, row.clone());
        row
    }

    /// Make subsequent `update_profile` calls fail
    pub fn fail_profile_updates(&self, fail: bool) {
        self.fail_profile_updates.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `delete_identity` calls fail
    pub fn fail_identity_deletes(&self, fail: bool) {
        self.fail_identity_deletes.store(fail, Ordering::SeqCst);
    }

    /// How many `update_profile` calls this store has received
    pub fn profile_update_calls(&self) -> usize {
        self.profile_update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Collaborator for MemoryCollaborator {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthIdentity> {
        if self.credentials.contains_key(email) {
            return Err(NetLearnError::Collaborator(format!(
                "email already registered: {email}"
            )));
        }

        let id = Uuid::new_v4().to_string();
        self.credentials.insert(
            email.to_string(),
            Credential {
                user_id: id.clone(),
                password: password.to_string(),
            },
        );

        Ok(AuthIdentity {
            id,
            email: email.to_string(),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthIdentity> {
        let credential = self
            .credentials
            .get(email)
            .ok_or_else(|| NetLearnError::Collaborator("invalid credentials".to_string()))?;

        if credential.password != password {
            return Err(NetLearnError::Collaborator("invalid credentials".to_string()));
        }

        Ok(AuthIdentity {
            id: credential.user_id.clone(),
            email: email.to_string(),
        })
    }

    async fn insert_profile(&self, row: &ProfileRow) -> Result<()> {
        self.profiles.insert(row.id.clone(), row.clone());
        Ok(())
    }

    async fn fetch_profile(&self, id: &str) -> Result<ProfileRow> {
        self.profiles
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| NetLearnError::NotFound(format!("profile {id}")))
    }

    async fn update_profile(&self, id: &str, patch: &ProfilePatch) -> Result<ProfileRow> {
        self.profile_update_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_profile_updates.load(Ordering::SeqCst) {
            return Err(NetLearnError::Collaborator(
                "profile update rejected".to_string(),
            ));
        }

        let mut entry = self
            .profiles
            .get_mut(id)
            .ok_or_else(|| NetLearnError::NotFound(format!("profile {id}")))?;
        let row = entry.value_mut();

        if let Some(ref name) = patch.name {
            row.name = Some(name.clone());
        }
        if let Some(subscription) = patch.subscription {
            row.subscription = subscription;
        }

        Ok(row.clone())
    }

    async fn delete_profile(&self, id: &str) -> Result<()> {
        self.profiles
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| NetLearnError::NotFound(format!("profile {id}")))
    }

    async fn delete_identity(&self, id: &str) -> Result<()> {
        if self.fail_identity_deletes.load(Ordering::SeqCst) {
            return Err(NetLearnError::Collaborator(
                "identity deletion rejected".to_string(),
            ));
        }

        self.credentials.retain(|_, cred| cred.user_id != id);
        Ok(())
    }

    async fn list_profiles(&self) -> Result<Vec<ProfileRow>> {
        let mut rows: Vec<ProfileRow> = self
            .profiles
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}
