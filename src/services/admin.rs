//! Admin dashboard operations
//!
//! Tier grants/revokes go through the same transition table as the payment
//! flow, without the payment. Account deletion removes the profile row and
//! then attempts the companion identity deletion best-effort: a companion
//! failure is logged, never rolled back.

use std::sync::Arc;
use tracing::{info, warn};

use crate::collaborator::{Collaborator, ProfilePatch, ProfileRow};
use crate::subscription::{apply_transition, SubscriptionTransition, TierChange};
use crate::types::Result;

/// Operations backing the admin dashboard
pub struct AdminService {
    store: Arc<dyn Collaborator>,
}

impl AdminService {
    /// Create a new admin service
    pub fn new(store: Arc<dyn Collaborator>) -> Self {
        Self { store }
    }

    /// All profile rows, newest first
    pub async fn list_profiles(&self) -> Result<Vec<ProfileRow>> {
        self.store.list_profiles().await
    }

    /// Grant premium to an account; a no-op if it already has it
    pub async fn grant_premium(&self, profile_id: &str) -> Result<TierChange> {
        self.transition(profile_id, SubscriptionTransition::AdminGrant)
            .await
    }

    /// Revoke premium from an account; a no-op if it is already free
    pub async fn revoke_premium(&self, profile_id: &str) -> Result<TierChange> {
        self.transition(profile_id, SubscriptionTransition::AdminRevoke)
            .await
    }

    async fn transition(
        &self,
        profile_id: &str,
        transition: SubscriptionTransition,
    ) -> Result<TierChange> {
        let row = self.store.fetch_profile(profile_id).await?;

        match apply_transition(row.subscription, transition) {
            TierChange::Unchanged => Ok(TierChange::Unchanged),
            TierChange::Changed(tier) => {
                self.store
                    .update_profile(profile_id, &ProfilePatch::subscription(tier))
                    .await?;
                info!(id = %profile_id, %tier, "Admin changed subscription tier");
                Ok(TierChange::Changed(tier))
            }
        }
    }

    /// Delete a profile row, then best-effort delete the identity record
    pub async fn delete_account(&self, profile_id: &str) -> Result<()> {
        self.store.delete_profile(profile_id).await?;

        if let Err(e) = self.store.delete_identity(profile_id).await {
            warn!(id = %profile_id, error = %e, "Companion identity deletion failed");
        }

        info!(id = %profile_id, "Account deleted");
        Ok(())
    }
}
