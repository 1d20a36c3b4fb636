// core/src/api/client.rs

//! Thin JSON client over the backend REST API.
//!
//! Every endpoint answers the same envelope:
//! `{ success, message, data, errors }`. This wrapper unwraps `data` on
//! success and maps failures onto the crate taxonomy: a response that
//! never arrived is `Transport`, a 401 is `Auth`, any other non-2xx with
//! an envelope message is `Rejected` with that user-facing message.

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};

/// The backend's uniform response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
  pub success: bool,
  #[serde(default)]
  pub message: String,
  pub data: Option<T>,
  #[serde(default)]
  pub errors: Option<serde_json::Value>,
}

pub struct ApiClient {
  http: reqwest::Client,
  base_url: String,
  // Bearer token for the opaque auth session; set/cleared by the auth
  // layer, read per request. Never held across an await.
  access_token: RwLock<Option<String>>,
}

impl std::fmt::Debug for ApiClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ApiClient").field("base_url", &self.base_url).finish_non_exhaustive()
  }
}

impl ApiClient {
  pub fn new(config: &StoreConfig) -> Result<Self> {
    let http = reqwest::Client::builder()
      .build()
      .map_err(|e| StoreError::Config(format!("could not build HTTP client: {e}")))?;
    Ok(ApiClient {
      http,
      base_url: config.api_base_url.trim_end_matches('/').to_string(),
      access_token: RwLock::new(None),
    })
  }

  /// Installs the bearer token subsequent authenticated calls will send.
  pub fn set_access_token(&self, token: impl Into<String>) {
    *self.access_token.write() = Some(token.into());
  }

  pub fn clear_access_token(&self) {
    *self.access_token.write() = None;
  }

  pub async fn get<T: DeserializeOwned>(&self, path: &str, auth: bool) -> Result<T> {
    let request = self.http.get(self.url(path));
    self.send(request, auth).await
  }

  pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
    &self,
    path: &str,
    body: &B,
    auth: bool,
  ) -> Result<T> {
    let request = self.http.post(self.url(path)).json(body);
    self.send(request, auth).await
  }

  fn url(&self, path: &str) -> String {
    let sep = if path.starts_with('/') { "" } else { "/" };
    format!("{}{}{}", self.base_url, sep, path)
  }

  async fn send<T: DeserializeOwned>(&self, mut request: reqwest::RequestBuilder, auth: bool) -> Result<T> {
    if auth {
      // Clone the token out so the guard is released before the await.
      let token = self.access_token.read().clone();
      if let Some(token) = token {
        request = request.bearer_auth(token);
      }
    }

    // reqwest errors here are connectivity, not server decisions.
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    debug!(%status, "API response received");

    if !status.is_success() {
      return Err(failure_error(status, &body));
    }

    let envelope: ApiEnvelope<T> = serde_json::from_str(&body)?;
    if !envelope.success {
      return Err(StoreError::Rejected(envelope.message));
    }
    envelope
      .data
      .ok_or_else(|| StoreError::Internal("API reported success but returned no data".to_string()))
  }
}

/// Shown when an error response carries no usable envelope message.
/// Status codes stay in the logs; they are never shopper-facing.
const GENERIC_FAILURE: &str = "The request could not be completed. Please try again.";

/// Maps a non-2xx response onto the error taxonomy.
fn failure_error(status: reqwest::StatusCode, body: &str) -> StoreError {
  if status == reqwest::StatusCode::UNAUTHORIZED {
    let message = envelope_message(body).unwrap_or_else(|| "authentication required".to_string());
    return StoreError::Auth(message);
  }
  StoreError::Rejected(envelope_message(body).unwrap_or_else(|| GENERIC_FAILURE.to_string()))
}

/// Best-effort extraction of the user-facing message from an error body.
fn envelope_message(body: &str) -> Option<String> {
  let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(body).ok()?;
  if envelope.message.is_empty() {
    None
  } else {
    Some(envelope.message)
  }
}
