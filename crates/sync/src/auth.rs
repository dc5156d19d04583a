//! Credential exchange for a bearer token.

use std::fmt;

use mixoads_adplatform::{AdPlatformApi, AdPlatformApiError};

use crate::config::Credentials;
use crate::error::AuthError;

/// Bearer token valid for the remainder of one run. No refresh.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Exchanges static credentials for an [`AccessToken`] with one HTTP call.
pub struct Authenticator<'a> {
    api: &'a AdPlatformApi,
    credentials: &'a Credentials,
}

impl<'a> Authenticator<'a> {
    pub fn new(api: &'a AdPlatformApi, credentials: &'a Credentials) -> Self {
        Self { api, credentials }
    }

    #[tracing::instrument(skip_all, fields(email = %self.credentials.email))]
    pub async fn authenticate(&self) -> Result<AccessToken, AuthError> {
        let response = self
            .api
            .request_token(&self.credentials.email, &self.credentials.password)
            .await
            .map_err(|e| match e {
                AdPlatformApiError::Status { status, .. } => AuthError::Status(status),
                other => AuthError::Api(other),
            })?;

        let token = response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::TokenMissing)?;

        tracing::info!("Access token obtained");
        Ok(AccessToken(token))
    }
}
