// core/src/error.rs

//! The crate-wide error taxonomy.
//!
//! Checkout-critical failures fall into buckets the UI treats very
//! differently: local validation (no network call was made), a meaningful
//! server rejection (the backend said "no" and supplied a reason), a
//! transport fault (the request never completed), and everything else.
//! A shopper must never be told their card was declined when the real
//! cause was a dropped connection, so `Transport` is kept strictly apart
//! from `Rejected`.

use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
  /// Pre-flight validation failed locally; no request was sent.
  #[error("validation error: {0}")]
  Validation(String),

  /// The backend requires an authenticated session for this operation.
  #[error("authentication required: {0}")]
  Auth(String),

  /// The backend meaningfully refused the operation. The message is
  /// user-facing and comes from the response payload (expired coupon,
  /// out-of-stock item, malformed address, ...).
  #[error("{0}")]
  Rejected(String),

  /// The request never completed: DNS, connect, TLS, timeout, or a
  /// response body that never arrived.
  #[error("connection error: {source}")]
  Transport { source: AnyhowError },

  /// The backend answered but the payload did not match the expected shape.
  #[error("malformed response from the API: {source}")]
  Decode {
    #[source]
    source: serde_json::Error,
  },

  #[error("configuration error: {0}")]
  Config(String),

  #[error("internal error: {0}")]
  Internal(String),
}

impl StoreError {
  /// The string a UI should show for this error.
  ///
  /// `Validation` and `Rejected` already carry user-facing text; every
  /// other variant collapses to a generic retry prompt so internals are
  /// never leaked to the shopper.
  pub fn user_message(&self) -> String {
    match self {
      StoreError::Validation(m) | StoreError::Rejected(m) => m.clone(),
      StoreError::Auth(_) => "Please sign in to continue.".to_string(),
      StoreError::Transport { .. } => "Connection error. Please try again.".to_string(),
      StoreError::Decode { .. } | StoreError::Config(_) | StoreError::Internal(_) => {
        "Something went wrong. Please try again.".to_string()
      }
    }
  }

  /// True when the failure was connectivity, not a server decision.
  pub fn is_transport(&self) -> bool {
    matches!(self, StoreError::Transport { .. })
  }

  /// Builds a `Transport` error from any opaque connectivity failure.
  pub fn transport(source: impl Into<AnyhowError>) -> Self {
    StoreError::Transport { source: source.into() }
  }
}

impl From<reqwest::Error> for StoreError {
  fn from(err: reqwest::Error) -> Self {
    StoreError::Transport { source: err.into() }
  }
}

impl From<serde_json::Error> for StoreError {
  fn from(err: serde_json::Error) -> Self {
    StoreError::Decode { source: err }
  }
}

/// Standard result type used throughout the crate.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;
