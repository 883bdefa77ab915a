//! Entitlement evaluation for content access
//!
//! The access decision is a pure, total function over (session, item).
//! Where a premium item is denied, the *routing* for the denial (sign-in
//! vs. pricing) is a separate concern: anonymous visitors and free-tier
//! accounts are both denied, but they are sent to different pages.

use crate::catalog::ContentItem;
use crate::identity::{Session, SubscriptionTier};

/// Decide whether the current session may view a content item
///
/// Free items are open to everyone, including anonymous visitors.
/// Premium items require a signed-in identity on the premium tier.
/// No side effects, no error conditions.
pub fn can_access(session: &Session, item: &ContentItem) -> bool {
    if !item.premium {
        return true;
    }
    matches!(session.tier(), Some(SubscriptionTier::Premium))
}

/// What a denied caller should be prompted to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockedAction {
    /// Anonymous visitor: sign in first
    SignIn,
    /// Signed-in free-tier account: upgrade on the pricing page
    Upgrade,
}

/// Routing hint for a session that was denied a premium item
///
/// Kept separate from [`can_access`] so the boolean decision stays free of
/// navigation concerns.
pub fn locked_action(session: &Session) -> LockedAction {
    if session.is_signed_in() {
        LockedAction::Upgrade
    } else {
        LockedAction::SignIn
    }
}
