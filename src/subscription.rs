//! Subscription lifecycle
//!
//! The Free/Premium lifecycle is an explicit state machine: a pure
//! transition function over (tier, transition), independent of any
//! rendering code, plus a service that drives the demo payment flow
//! against the collaborator store.
//!
//! There is no persisted pending state; the demo payment simulates
//! processor latency but the tier only ever flips atomically in the store.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::collaborator::{Collaborator, ProfilePatch};
use crate::identity::validation::is_valid_contact_handle;
use crate::identity::{IdentityRecord, Session, SubscriptionTier};

/// Enumerated transitions over the subscription state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionTransition {
    /// Self-service upgrade through the demo payment flow
    DemoPayment,
    /// Administrative upgrade, no payment involved
    AdminGrant,
    /// Administrative downgrade
    AdminRevoke,
}

/// Result of applying a transition to a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierChange {
    /// The tier flipped to the contained value
    Changed(SubscriptionTier),
    /// The identity was already in the target state; not an error
    Unchanged,
}

/// Apply a transition to a tier
///
/// Total over its domain: transitions that do not apply (granting premium
/// to a premium account, revoking from a free one, paying while premium)
/// report `Unchanged` rather than failing. There is no self-service
/// premium-to-free transition.
pub fn apply_transition(
    tier: SubscriptionTier,
    transition: SubscriptionTransition,
) -> TierChange {
    use SubscriptionTier::{Free, Premium};
    use SubscriptionTransition::{AdminGrant, AdminRevoke, DemoPayment};

    match (tier, transition) {
        (Free, DemoPayment) | (Free, AdminGrant) => TierChange::Changed(Premium),
        (Premium, AdminRevoke) => TierChange::Changed(Free),
        _ => TierChange::Unchanged,
    }
}

/// Failure classes of the demo payment flow, kept distinct so the UI can
/// present each one differently
#[derive(Debug, Error)]
pub enum UpgradeError {
    /// Handle failed format validation; the collaborator was never contacted
    #[error("Invalid contact handle: {0}")]
    InvalidHandle(String),

    /// Anonymous sessions cannot start the payment flow
    #[error("Sign in before subscribing")]
    NotSignedIn,

    /// The pre-payment profile read failed; the operation never started
    #[error("Collaborator call failed: {0}")]
    Collaborator(String),

    /// The payment delay completed but the store update failed.
    /// The tier is left at its prior value; the account may be out of sync
    /// with what the user was told.
    #[error("Payment accepted but the profile update failed: {0}")]
    PaymentAcceptedStoreFailed(String),
}

/// Successful outcome of the demo payment flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeOutcome {
    /// The profile row now carries the premium tier
    Upgraded(IdentityRecord),
    /// The account was already premium; nothing was charged or written
    AlreadyPremium,
}

/// Drives the self-service upgrade flow
pub struct SubscriptionService {
    store: Arc<dyn Collaborator>,
    payment_delay: Duration,
}

impl SubscriptionService {
    /// Create a new subscription service
    pub fn new(store: Arc<dyn Collaborator>, payment_delay: Duration) -> Self {
        Self {
            store,
            payment_delay,
        }
    }

    /// Run the demo payment flow for the signed-in session
    ///
    /// Order of checks:
    /// 1. Contact handle format (local, no collaborator contact on failure)
    /// 2. Session must be signed in
    /// 3. Fresh profile read; an already-premium account short-circuits
    /// 4. Simulated processor delay
    /// 5. Partial update of the profile row
    pub async fn upgrade(
        &self,
        session: &Session,
        contact_handle: &str,
    ) -> Result<UpgradeOutcome, UpgradeError> {
        if !is_valid_contact_handle(contact_handle) {
            return Err(UpgradeError::InvalidHandle(contact_handle.to_string()));
        }

        let identity = session.identity().ok_or(UpgradeError::NotSignedIn)?;

        let current = self
            .store
            .fetch_profile(&identity.id)
            .await
            .map_err(|e| UpgradeError::Collaborator(e.to_string()))?;

        if let TierChange::Unchanged =
            apply_transition(current.subscription, SubscriptionTransition::DemoPayment)
        {
            info!(id = %identity.id, "Upgrade requested for an already-premium account");
            return Ok(UpgradeOutcome::AlreadyPremium);
        }

        // Simulated payment processor latency; not cancellable once started
        tokio::time::sleep(self.payment_delay).await;

        match self
            .store
            .update_profile(
                &identity.id,
                &ProfilePatch::subscription(SubscriptionTier::Premium),
            )
            .await
        {
            Ok(row) => {
                info!(id = %row.id, "Subscription upgraded to premium");
                Ok(UpgradeOutcome::Upgraded(row.into()))
            }
            Err(e) => {
                warn!(id = %identity.id, error = %e, "Profile update failed after payment delay");
                Err(UpgradeError::PaymentAcceptedStoreFailed(e.to_string()))
            }
        }
    }
}
