//! Hosted collaborator client
//!
//! Talks to the hosted backend-as-a-service over its REST surface:
//! `/auth/v1` for the identity provider and `/rest/v1/profiles` for the
//! row store. Requests carry the project API key; row filters use the
//! `column=eq.value` query convention.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use crate::collaborator::{AuthIdentity, Collaborator, ProfilePatch, ProfileRow};
use crate::config::Args;
use crate::types::{NetLearnError, Result};

/// Configuration for the hosted client
#[derive(Debug, Clone)]
pub struct HostedConfig {
    /// Base URL of the hosted service
    pub base_url: String,
    /// Project API key, sent as `apikey` and bearer token
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HostedConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl HostedConfig {
    /// Build from parsed CLI arguments
    pub fn from_args(args: &Args) -> Self {
        Self {
            base_url: args.collaborator_url.trim_end_matches('/').to_string(),
            api_key: args.collaborator_key.clone(),
            timeout: args.request_timeout(),
        }
    }
}

/// Client for the hosted identity/row-store service
pub struct HostedCollaborator {
    config: HostedConfig,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct AuthEnvelope {
    user: AuthIdentity,
}

impl HostedCollaborator {
    /// Create a new hosted client
    pub fn new(config: HostedConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NetLearnError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.api_key {
            Some(ref key) => request
                .header("apikey", key)
                .bearer_auth(key),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder, op: &str) -> Result<reqwest::Response> {
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| NetLearnError::Collaborator(format!("{op}: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(NetLearnError::NotFound(op.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(op, %status, "Collaborator call rejected");
            return Err(NetLearnError::Collaborator(format!(
                "{op} returned {status}: {body}"
            )));
        }

        Ok(response)
    }

    async fn profile_rows(&self, response: reqwest::Response, op: &str) -> Result<Vec<ProfileRow>> {
        response
            .json::<Vec<ProfileRow>>()
            .await
            .map_err(|e| NetLearnError::Collaborator(format!("{op}: invalid response: {e}")))
    }
}

#[async_trait]
impl Collaborator for HostedCollaborator {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthIdentity> {
        debug!(email, "Signing up with hosted identity provider");

        let request = self
            .http
            .post(self.url("/auth/v1/signup"))
            .json(&json!({ "email": email, "password": password }));

        let response = self.send(request, "sign_up").await?;
        let envelope: AuthEnvelope = response
            .json()
            .await
            .map_err(|e| NetLearnError::Collaborator(format!("sign_up: invalid response: {e}")))?;

        Ok(envelope.user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthIdentity> {
        debug!(email, "Signing in with hosted identity provider");

        let request = self
            .http
            .post(self.url("/auth/v1/token?grant_type=password"))
            .json(&json!({ "email": email, "password": password }));

        let response = self.send(request, "sign_in").await?;
        let envelope: AuthEnvelope = response
            .json()
            .await
            .map_err(|e| NetLearnError::Collaborator(format!("sign_in: invalid response: {e}")))?;

        Ok(envelope.user)
    }

    async fn insert_profile(&self, row: &ProfileRow) -> Result<()> {
        let request = self
            .http
            .post(self.url("/rest/v1/profiles"))
            .header("Prefer", "return=minimal")
            .json(row);

        self.send(request, "insert_profile").await?;
        Ok(())
    }

    async fn fetch_profile(&self, id: &str) -> Result<ProfileRow> {
        let request = self
            .http
            .get(self.url(&format!("/rest/v1/profiles?id=eq.{id}&select=*")));

        let response = self.send(request, "fetch_profile").await?;
        let rows = self.profile_rows(response, "fetch_profile").await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| NetLearnError::NotFound(format!("profile {id}")))
    }

    async fn update_profile(&self, id: &str, patch: &ProfilePatch) -> Result<ProfileRow> {
        let request = self
            .http
            .patch(self.url(&format!("/rest/v1/profiles?id=eq.{id}")))
            .header("Prefer", "return=representation")
            .json(patch);

        let response = self.send(request, "update_profile").await?;
        let rows = self.profile_rows(response, "update_profile").await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| NetLearnError::NotFound(format!("profile {id}")))
    }

    async fn delete_profile(&self, id: &str) -> Result<()> {
        let request = self
            .http
            .delete(self.url(&format!("/rest/v1/profiles?id=eq.{id}")));

        self.send(request, "delete_profile").await?;
        Ok(())
    }

    async fn delete_identity(&self, id: &str) -> Result<()> {
        let request = self
            .http
            .delete(self.url(&format!("/auth/v1/admin/users/{id}")));

        self.send(request, "delete_identity").await?;
        Ok(())
    }

    async fn list_profiles(&self) -> Result<Vec<ProfileRow>> {
        let request = self
            .http
            .get(self.url("/rest/v1/profiles?select=*&order=created_at.desc"));

        let response = self.send(request, "list_profiles").await?;
        self.profile_rows(response, "list_profiles").await
    }
}
