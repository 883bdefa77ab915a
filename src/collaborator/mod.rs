//! Collaborator data contract
//!
//! The hosted identity provider and `profiles` row store are external
//! collaborators; this module defines the shapes consumed/produced here
//! and the trait boundary the rest of the crate talks through.
//!
//! Implementations:
//! - [`HostedCollaborator`]: reqwest client against the hosted service
//! - [`MemoryCollaborator`]: in-memory store for dev mode and tests

pub mod hosted;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{IdentityRecord, SubscriptionTier};
use crate::types::Result;

pub use hosted::{HostedCollaborator, HostedConfig};
pub use memory::MemoryCollaborator;

/// Informational role string written at sign-up
pub const ROLE_USER: &str = "user";

/// Identity returned by the hosted auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthIdentity {
    pub id: String,
    pub email: String,
}

/// A row in the hosted `profiles` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    pub subscription: SubscriptionTier,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

fn default_role() -> String {
    ROLE_USER.to_string()
}

impl ProfileRow {
    /// Build the row inserted right after sign-up: free tier, not admin
    pub fn new_free(id: String, name: Option<String>, email: String) -> Self {
        Self {
            id,
            name,
            email,
            subscription: SubscriptionTier::Free,
            role: ROLE_USER.to_string(),
            is_admin: false,
            created_at: Utc::now(),
        }
    }
}

impl From<ProfileRow> for IdentityRecord {
    fn from(row: ProfileRow) -> Self {
        IdentityRecord {
            id: row.id,
            name: row.name,
            email: row.email,
            subscription: row.subscription,
            is_admin: row.is_admin,
        }
    }
}

/// Partial update for a profile row, keyed by id
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<SubscriptionTier>,
}

impl ProfilePatch {
    /// Patch that flips only the subscription tier
    pub fn subscription(tier: SubscriptionTier) -> Self {
        Self {
            subscription: Some(tier),
            ..Default::default()
        }
    }
}

/// The hosted identity/row-store service boundary
///
/// All mutations are all-or-nothing per call; a failed call leaves the
/// store untouched from this crate's point of view.
#[async_trait]
pub trait Collaborator: Send + Sync {
    /// Create an identity; the caller inserts the profile row afterwards
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthIdentity>;

    /// Authenticate; the caller fetches the profile row afterwards
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthIdentity>;

    /// Insert a freshly created profile row
    async fn insert_profile(&self, row: &ProfileRow) -> Result<()>;

    /// Fetch a profile row by identity id
    async fn fetch_profile(&self, id: &str) -> Result<ProfileRow>;

    /// Apply a partial update and return the updated row
    async fn update_profile(&self, id: &str, patch: &ProfilePatch) -> Result<ProfileRow>;

    /// Delete a profile row (admin dashboard action)
    async fn delete_profile(&self, id: &str) -> Result<()>;

    /// Best-effort deletion of the underlying identity record
    ///
    /// Failure here must not roll back a preceding profile deletion.
    async fn delete_identity(&self, id: &str) -> Result<()>;

    /// List all profile rows, newest first (admin dashboard read)
    async fn list_profiles(&self) -> Result<Vec<ProfileRow>>;
}
