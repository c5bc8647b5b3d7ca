//! Typed HTTP client for the weather backend.
//!
//! One call per REST endpoint; no retries, caching, or cancellation. Session
//! state (who is logged in, which zip is active) lives with the caller; this
//! crate only knows how to shape requests and classify failures.

use reqwest::Client;
use shared::{
    domain::{UserId, ZipCode},
    protocol::{CredentialsRequest, Forecast, ForecastRequest, LoginResponse, RegisterResponse,
        SaveZipRequest},
};
use tracing::debug;

pub mod error;

pub use error::ApiError;

/// Whether a zip submission is the account's first (create) or replaces an
/// existing one (update). Same payload either way; only the HTTP verb moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZipSaveMode {
    Create,
    Update,
}

/// Successful authentication: the user's identity plus, on the login path,
/// the zip code the account already has on file.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub user_id: UserId,
    pub zip: Option<ZipCode>,
}

pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` may carry a trailing slash; it is stripped so endpoint
    /// paths can be appended uniformly.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /user`: creates an account. A fresh account never has a zip.
    pub async fn register(&self, credentials: &CredentialsRequest) -> Result<UserId, ApiError> {
        debug!(username = %credentials.username, "registering account");
        let res = self
            .http
            .post(format!("{}/user", self.base_url))
            .json(credentials)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ApiError::from_status(res.status()));
        }
        let body: RegisterResponse = res.json().await?;
        if body.id.is_empty() {
            return Err(ApiError::InvalidResponse("no user id returned".to_string()));
        }
        Ok(UserId(body.id))
    }

    /// `POST /login`: authenticates and reports any stored zip.
    pub async fn login(&self, credentials: &CredentialsRequest) -> Result<AuthOutcome, ApiError> {
        debug!(username = %credentials.username, "logging in");
        let res = self
            .http
            .post(format!("{}/login", self.base_url))
            .json(credentials)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ApiError::from_status(res.status()));
        }
        let body: LoginResponse = res.json().await?;
        if body.id.is_empty() {
            return Err(ApiError::InvalidResponse("no user id returned".to_string()));
        }
        Ok(AuthOutcome {
            user_id: UserId(body.id),
            zip: body.zip,
        })
    }

    /// `POST /zip` or `PUT /zip` depending on `mode`. Success bodies are
    /// empty and ignored.
    pub async fn save_zip(
        &self,
        request: &SaveZipRequest,
        mode: ZipSaveMode,
    ) -> Result<(), ApiError> {
        debug!(zip = %request.zip, ?mode, "saving zip");
        let url = format!("{}/zip", self.base_url);
        let builder = match mode {
            ZipSaveMode::Create => self.http.post(url),
            ZipSaveMode::Update => self.http.put(url),
        };
        let res = builder.json(request).send().await?;
        if !res.status().is_success() {
            return Err(ApiError::from_status(res.status()));
        }
        Ok(())
    }

    /// `POST /weatherforecast`: forecast lookup for a zip.
    pub async fn fetch_forecast(&self, zip: &ZipCode) -> Result<Forecast, ApiError> {
        debug!(%zip, "fetching forecast");
        let res = self
            .http
            .post(format!("{}/weatherforecast", self.base_url))
            .json(&ForecastRequest { zip: zip.clone() })
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ApiError::from_status(res.status()));
        }
        Ok(res.json().await?)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
