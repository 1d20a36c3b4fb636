// core/src/models/payment.rs

//! Types crossing the card-tokenization boundary and the charge endpoint.
//!
//! Raw card data never appears here: the tokenizer widget is an opaque
//! external actor that takes an amount and payer email and hands back a
//! single-use token plus payment-method metadata.

use serde::{Deserialize, Serialize};

/// What the tokenizer widget is initialized with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizationRequest {
  /// The created order's authoritative total, not the client-computed one.
  pub amount_cents: i64,
  pub payer_email: String,
}

/// Payer identification document, when the gateway requires one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerIdentification {
  #[serde(rename = "type")]
  pub kind: String,
  pub number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payer {
  pub email: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub identification: Option<PayerIdentification>,
}

/// Output of the tokenizer widget's submit callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardToken {
  pub token: String,
  pub payment_method_id: String,
  pub issuer_id: Option<String>,
  pub installments: u32,
  pub payer: Payer,
}

/// One user-initiated charge attempt submitted to the backend.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRequest {
  pub order_id: i64,
  pub token: String,
  pub payment_method_id: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub issuer_id: Option<String>,
  pub installments: u32,
  pub payer: Payer,
}

/// What the charge endpoint answered.
///
/// `status == "approved"` is the single success value; any other status
/// is a gateway rejection whose `status_detail` is mapped through the
/// known-codes table in [`crate::payment::status`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutcome {
  pub status: String,
  pub status_detail: String,
  #[serde(default)]
  pub payment_id: Option<String>,
}
