//! Sign-up and sign-in orchestration
//!
//! Sign-up creates the identity with the provider, then inserts the
//! profile row (free tier, not admin). Sign-in authenticates, then fetches
//! the profile row by id. Validation failures stay local; collaborator
//! failures surface as blocking errors with no local state mutation.

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::collaborator::{Collaborator, ProfileRow};
use crate::identity::validation::{validate_sign_in, validate_sign_up, FieldError};
use crate::identity::IdentityRecord;

/// Sign-up form as submitted by the auth page
#[derive(Debug, Clone)]
pub struct SignUpForm {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Sign-in form as submitted by the auth page
#[derive(Debug, Clone)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// Auth flow failures
#[derive(Debug, Error)]
pub enum AuthError {
    /// Field-level validation failures; the collaborator was not contacted
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Identity provider or row store call failed
    #[error("Collaborator call failed: {0}")]
    Collaborator(String),
}

/// Orchestrates account creation and login
pub struct AuthService {
    store: Arc<dyn Collaborator>,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(store: Arc<dyn Collaborator>) -> Self {
        Self { store }
    }

    /// Create an account and its profile row
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<IdentityRecord, AuthError> {
        validate_sign_up(&form.email, &form.password, &form.confirm_password)
            .map_err(AuthError::Validation)?;

        let identity = self
            .store
            .sign_up(&form.email, &form.password)
            .await
            .map_err(|e| AuthError::Collaborator(e.to_string()))?;

        let row = ProfileRow::new_free(identity.id, form.name.clone(), identity.email);
        self.store
            .insert_profile(&row)
            .await
            .map_err(|e| AuthError::Collaborator(e.to_string()))?;

        info!(id = %row.id, email = %row.email, "Account created");
        Ok(row.into())
    }

    /// Authenticate and fetch the stored profile
    pub async fn sign_in(&self, form: &SignInForm) -> Result<IdentityRecord, AuthError> {
        validate_sign_in(&form.email, &form.password).map_err(AuthError::Validation)?;

        let identity = self
            .store
            .sign_in(&form.email, &form.password)
            .await
            .map_err(|e| AuthError::Collaborator(e.to_string()))?;

        let row = self
            .store
            .fetch_profile(&identity.id)
            .await
            .map_err(|e| AuthError::Collaborator(e.to_string()))?;

        info!(id = %row.id, "Signed in");
        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborator::MemoryCollaborator;
    use crate::identity::SubscriptionTier;

    fn sign_up_form(email: &str, password: &str) -> SignUpForm {
        SignUpForm {
            name: None,
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_creates_free_non_admin_profile() {
        let store = Arc::new(MemoryCollaborator::new());
        let service = AuthService::new(Arc::clone(&store) as Arc<dyn Collaborator>);

        let record = service.sign_up(&sign_up_form("a@b.com", "abcdef")).await.unwrap();
        assert_eq!(record.subscription, SubscriptionTier::Free);
        assert!(!record.is_admin);

        let row = store.fetch_profile(&record.id).await.unwrap();
        assert_eq!(row.email, "a@b.com");
        assert_eq!(row.role, "user");
    }

    #[tokio::test]
    async fn test_sign_in_fetches_the_created_profile() {
        let store = Arc::new(MemoryCollaborator::new());
        let service = AuthService::new(Arc::clone(&store) as Arc<dyn Collaborator>);

        let created = service.sign_up(&sign_up_form("a@b.com", "abcdef")).await.unwrap();
        let fetched = service
            .sign_in(&SignInForm {
                email: "a@b.com".to_string(),
                password: "abcdef".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_invalid_form_never_contacts_the_provider() {
        let store = Arc::new(MemoryCollaborator::new());
        let service = AuthService::new(Arc::clone(&store) as Arc<dyn Collaborator>);

        let mut form = sign_up_form("a@b.com", "abcdef");
        form.confirm_password = "different".to_string();

        let err = service.sign_up(&form).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        // The identity was never created, so signing in fails at the provider
        let err = service
            .sign_in(&SignInForm {
                email: "a@b.com".to_string(),
                password: "abcdef".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Collaborator(_)));
    }
}
