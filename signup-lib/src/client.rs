//! HTTP client for the sign-up backend

use std::collections::BTreeSet;
use std::sync::Arc;

use reqwest::Client;
use reqwest::Response;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::wire::SIGNUP_PATH;
use crate::wire::SignupRequest;
use crate::wire::VALIDATE_PATH;
use crate::wire::ValidateRequest;
use crate::wire::Welcome;

/// Client for the sign-up backend.
///
/// Cheap to clone (uses `Arc` internally).
///
/// # Example
///
/// ```ignore
/// use signup_lib::{ClientConfig, SignupClient};
///
/// let client = SignupClient::new(ClientConfig::default())?;
/// let errors = client.check_username("ada").await?;
/// ```
#[derive(Clone)]
pub struct SignupClient {
    inner: Arc<SignupClientInner>,
}

struct SignupClientInner {
    base_url: Url,
    http_client: Client,
}

impl SignupClient {
    /// Creates a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.base_url));
        }

        let http_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(SignupClientInner {
                base_url,
                http_client,
            }),
        })
    }

    /// Returns the backend root URL.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Asks the backend whether `username` is available.
    ///
    /// Returns the backend's error messages, empty when the name is free.
    pub async fn check_username(&self, username: &str) -> Result<BTreeSet<String>, ApiError> {
        let body = ValidateRequest {
            username: username.to_string(),
        };
        let response = self.post(VALIDATE_PATH, &body).await?;
        let errors: Vec<String> = read_json(response).await?;
        log::debug!("Username check for {:?}: {} error(s)", username, errors.len());
        Ok(errors.into_iter().collect())
    }

    /// Creates the account.
    pub async fn sign_up(&self, request: &SignupRequest) -> Result<Welcome, ApiError> {
        let response = self.post(SIGNUP_PATH, request).await?;
        read_json(response).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response, ApiError> {
        let url = self
            .inner
            .base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))?;
        log::debug!("POST {}", url);

        let response = self.inner.http_client.post(url).json(body).send().await?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let text = response.text().await?;
        log::warn!("Backend answered {}: {}", status, text);
        Err(match serde_json::from_str::<Vec<String>>(&text) {
            Ok(errors) => ApiError::Rejected { status, errors },
            Err(_) => ApiError::http(status, text),
        })
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::parse_with_body(e.to_string(), text))
}

impl std::fmt::Debug for SignupClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}
