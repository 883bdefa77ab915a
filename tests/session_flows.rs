//! End-to-end session flow tests
//!
//! Exercises the full path from account creation through content gating
//! and the demo payment upgrade, using the in-memory collaborator.

use std::sync::Arc;
use std::time::Duration;

use netlearn::catalog::Catalog;
use netlearn::collaborator::{Collaborator, MemoryCollaborator};
use netlearn::controller::{ItemAccess, Page, SessionController};
use netlearn::services::{AdminService, AuthService, SignInForm, SignUpForm};
use netlearn::subscription::{
    SubscriptionService, TierChange, UpgradeError, UpgradeOutcome,
};
use netlearn::{Session, SubscriptionTier};

const PREMIUM_ITEM: &str = "firewall-implementation";
const FREE_ITEM: &str = "network-fundamentals";

fn store() -> Arc<MemoryCollaborator> {
    Arc::new(MemoryCollaborator::new())
}

fn sign_up_form(email: &str, password: &str) -> SignUpForm {
    SignUpForm {
        name: None,
        email: email.to_string(),
        password: password.to_string(),
        confirm_password: password.to_string(),
    }
}

fn sign_in_form(email: &str, password: &str) -> SignInForm {
    SignInForm {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn anonymous_then_free_then_premium_open_the_same_tutorial() {
    let store = store();
    let auth = AuthService::new(Arc::clone(&store) as Arc<dyn Collaborator>);
    let catalog = Catalog::with_builtin();
    let mut controller = SessionController::new();

    // Anonymous visitor clicking a premium tutorial lands on sign-in, not pricing
    assert_eq!(
        controller.open_item(&catalog, PREMIUM_ITEM),
        ItemAccess::Redirected(Page::Auth)
    );

    // Sign up while on the auth page; login forces the landing page
    let record = auth
        .sign_up(&sign_up_form("learner@netlearn.com", "abcdef"))
        .await
        .unwrap();
    controller.complete_login(record);
    assert_eq!(controller.page(), Page::Home);

    // Free-tier account clicking the same tutorial lands on pricing
    assert_eq!(
        controller.open_item(&catalog, PREMIUM_ITEM),
        ItemAccess::Redirected(Page::Pricing)
    );

    // Upgrade through the demo payment flow, then refresh the identity
    let subscriptions =
        SubscriptionService::new(Arc::clone(&store) as Arc<dyn Collaborator>, Duration::ZERO);
    let outcome = subscriptions
        .upgrade(controller.session(), "09171234567")
        .await
        .unwrap();
    let UpgradeOutcome::Upgraded(upgraded) = outcome else {
        panic!("expected an upgrade");
    };
    controller.refresh_identity(upgraded);

    // Premium account renders the tutorial detail
    match controller.open_item(&catalog, PREMIUM_ITEM) {
        ItemAccess::Granted(item) => {
            assert_eq!(item.id, PREMIUM_ITEM);
            assert_eq!(item.views, 1);
        }
        other => panic!("expected Granted, got {other:?}"),
    }
}

#[tokio::test]
async fn free_items_never_gate() {
    let catalog = Catalog::with_builtin();
    let mut controller = SessionController::new();

    match controller.open_item(&catalog, FREE_ITEM) {
        ItemAccess::Granted(item) => assert!(!item.premium),
        other => panic!("expected Granted, got {other:?}"),
    }
}

#[tokio::test]
async fn sign_up_then_sign_in_round_trips_the_profile() {
    let store = store();
    let auth = AuthService::new(Arc::clone(&store) as Arc<dyn Collaborator>);

    let created = auth
        .sign_up(&sign_up_form("a@b.com", "abcdef"))
        .await
        .unwrap();
    assert_eq!(created.subscription, SubscriptionTier::Free);
    assert!(!created.is_admin);

    let fetched = auth
        .sign_in(&sign_in_form("a@b.com", "abcdef"))
        .await
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn demo_payment_upgrade_and_repeat_attempt() {
    let store = store();
    let auth = AuthService::new(Arc::clone(&store) as Arc<dyn Collaborator>);
    let subscriptions =
        SubscriptionService::new(Arc::clone(&store) as Arc<dyn Collaborator>, Duration::ZERO);

    let record = auth
        .sign_up(&sign_up_form("payer@netlearn.com", "abcdef"))
        .await
        .unwrap();
    let session = Session::SignedIn(record.clone());

    // International handle, free tier: after the delay the row is premium
    let outcome = subscriptions
        .upgrade(&session, "+639171234567")
        .await
        .unwrap();
    assert!(matches!(outcome, UpgradeOutcome::Upgraded(_)));

    let row = store.fetch_profile(&record.id).await.unwrap();
    assert_eq!(row.subscription, SubscriptionTier::Premium);

    // A second identical attempt is a no-op transition
    let outcome = subscriptions
        .upgrade(&session, "+639171234567")
        .await
        .unwrap();
    assert_eq!(outcome, UpgradeOutcome::AlreadyPremium);
}

#[tokio::test]
async fn invalid_handle_is_rejected_without_contacting_the_store() {
    let store = store();
    let auth = AuthService::new(Arc::clone(&store) as Arc<dyn Collaborator>);
    let subscriptions =
        SubscriptionService::new(Arc::clone(&store) as Arc<dyn Collaborator>, Duration::ZERO);

    let record = auth
        .sign_up(&sign_up_form("payer@netlearn.com", "abcdef"))
        .await
        .unwrap();
    let session = Session::SignedIn(record.clone());

    let err = subscriptions.upgrade(&session, "12345").await.unwrap_err();
    assert!(matches!(err, UpgradeError::InvalidHandle(_)));
    assert_eq!(store.profile_update_calls(), 0);

    let row = store.fetch_profile(&record.id).await.unwrap();
    assert_eq!(row.subscription, SubscriptionTier::Free);
}

#[tokio::test]
async fn partial_failure_leaves_the_tier_untouched() {
    let store = store();
    let auth = AuthService::new(Arc::clone(&store) as Arc<dyn Collaborator>);
    let subscriptions =
        SubscriptionService::new(Arc::clone(&store) as Arc<dyn Collaborator>, Duration::ZERO);

    let record = auth
        .sign_up(&sign_up_form("payer@netlearn.com", "abcdef"))
        .await
        .unwrap();
    let session = Session::SignedIn(record.clone());

    store.fail_profile_updates(true);
    let err = subscriptions
        .upgrade(&session, "09171234567")
        .await
        .unwrap_err();
    assert!(matches!(err, UpgradeError::PaymentAcceptedStoreFailed(_)));

    store.fail_profile_updates(false);
    let row = store.fetch_profile(&record.id).await.unwrap();
    assert_eq!(row.subscription, SubscriptionTier::Free);
}

#[tokio::test]
async fn admin_grant_is_idempotent_and_non_admins_never_see_the_dashboard() {
    let store = store();
    let auth = AuthService::new(Arc::clone(&store) as Arc<dyn Collaborator>);
    let admin = AdminService::new(Arc::clone(&store) as Arc<dyn Collaborator>);

    let record = auth
        .sign_up(&sign_up_form("member@netlearn.com", "abcdef"))
        .await
        .unwrap();

    assert_eq!(
        admin.grant_premium(&record.id).await.unwrap(),
        TierChange::Changed(SubscriptionTier::Premium)
    );
    assert_eq!(
        admin.grant_premium(&record.id).await.unwrap(),
        TierChange::Unchanged
    );

    // The granted account is premium but still not an admin: the admin page
    // silently lands on home
    let row = store.fetch_profile(&record.id).await.unwrap();
    let mut controller = SessionController::new();
    controller.complete_login(row.into());
    assert_eq!(controller.navigate(Page::Admin), Page::Home);
}

#[tokio::test]
async fn admin_dashboard_lists_newest_profiles_first() {
    let store = store();
    let auth = AuthService::new(Arc::clone(&store) as Arc<dyn Collaborator>);
    let admin = AdminService::new(Arc::clone(&store) as Arc<dyn Collaborator>);

    auth.sign_up(&sign_up_form("first@netlearn.com", "abcdef"))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    auth.sign_up(&sign_up_form("second@netlearn.com", "abcdef"))
        .await
        .unwrap();

    let rows = admin.list_profiles().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].email, "second@netlearn.com");
    assert_eq!(rows[1].email, "first@netlearn.com");
}
