//! Services orchestrating collaborator flows
//!
//! - **Auth**: sign-up and sign-in against the hosted identity provider
//! - **Admin**: dashboard reads, tier grant/revoke, account deletion

pub mod admin;
pub mod auth;

pub use admin::AdminService;
pub use auth::{AuthError, AuthService, SignInForm, SignUpForm};
