//! Identity record and session state
//!
//! The identity record is the authenticated user's profile as consumed by
//! the UI layer. An absent record is a distinct "anonymous" state, not a
//! free-tier record without an id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-valued subscription plan state governing premium entitlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    /// Default tier for every new account
    #[default]
    Free,
    /// Paid tier with access to all published content
    Premium,
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionTier::Free => write!(f, "free"),
            SubscriptionTier::Premium => write!(f, "premium"),
        }
    }
}

/// Normalized user representation passed to every page consumer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Opaque account identifier, stable per account
    pub id: String,
    /// Display name (optional)
    pub name: Option<String>,
    /// Unique email address
    pub email: String,
    /// Current subscription tier
    pub subscription: SubscriptionTier,
    /// Whether this account may reach the admin dashboard
    pub is_admin: bool,
}

/// Session state owned by the page controller
///
/// Anonymous is a third identity state, distinct from a signed-in free-tier
/// account: both are denied premium content, but they are routed differently
/// when they hit a locked item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    /// No account signed in
    #[default]
    Anonymous,
    /// Signed in with a fetched identity record
    SignedIn(IdentityRecord),
}

impl Session {
    /// The signed-in identity, if any
    pub fn identity(&self) -> Option<&IdentityRecord> {
        match self {
            Session::Anonymous => None,
            Session::SignedIn(record) => Some(record),
        }
    }

    /// Whether an account is signed in
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Session::SignedIn(_))
    }

    /// Whether the signed-in account is an admin
    pub fn is_admin(&self) -> bool {
        self.identity().map(|r| r.is_admin).unwrap_or(false)
    }

    /// The signed-in account's subscription tier, if any
    pub fn tier(&self) -> Option<SubscriptionTier> {
        self.identity().map(|r| r.subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tier: SubscriptionTier) -> IdentityRecord {
        IdentityRecord {
            id: "acct-1".to_string(),
            name: Some("Demo User".to_string()),
            email: "demo@netlearn.com".to_string(),
            subscription: tier,
            is_admin: false,
        }
    }

    #[test]
    fn test_anonymous_has_no_identity() {
        let session = Session::Anonymous;
        assert!(session.identity().is_none());
        assert!(!session.is_signed_in());
        assert!(!session.is_admin());
        assert_eq!(session.tier(), None);
    }

    #[test]
    fn test_signed_in_exposes_tier() {
        let session = Session::SignedIn(record(SubscriptionTier::Premium));
        assert!(session.is_signed_in());
        assert_eq!(session.tier(), Some(SubscriptionTier::Premium));
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SubscriptionTier::Premium).unwrap(),
            "\"premium\""
        );
        assert_eq!(
            serde_json::from_str::<SubscriptionTier>("\"free\"").unwrap(),
            SubscriptionTier::Free
        );
    }
}
