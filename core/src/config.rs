// core/src/config.rs

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

use crate::error::{Result, StoreError};

/// Runtime configuration for the storefront engine.
#[derive(Debug, Clone)]
pub struct StoreConfig {
  /// Base URL of the backend REST API, e.g. `https://api.lumera.shop/api/v1`.
  pub api_base_url: String,
  /// Public key handed to the card-tokenization widget.
  pub payment_public_key: String,
  /// ISO currency code used for display; amounts are always minor units.
  pub currency: String,
  /// Where the cart is persisted. `None` keeps the cart in memory only.
  pub cart_storage_path: Option<PathBuf>,
}

impl StoreConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name)
        .map_err(|e| StoreError::Config(format!("Missing environment variable '{var_name}': {e}")))
    };

    let api_base_url =
      get_env("LUMERA_API_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string());
    let payment_public_key = get_env("LUMERA_PAYMENT_PUBLIC_KEY")?;
    let currency = get_env("LUMERA_CURRENCY").unwrap_or_else(|_| "MXN".to_string());
    let cart_storage_path = env::var("LUMERA_CART_PATH").ok().map(PathBuf::from);

    tracing::info!(%api_base_url, %currency, "storefront configuration loaded");

    Ok(Self { api_base_url, payment_public_key, currency, cart_storage_path })
  }
}
