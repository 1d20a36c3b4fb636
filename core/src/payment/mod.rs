// core/src/payment/mod.rs

//! Payment capture: turning a created order's total into an actual charge.
//!
//! The card widget is an external actor with a narrow contract (amount
//! and payer email in, single-use token out), modeled here as the
//! [`CardTokenizer`] capability. This module never sees raw card data.
//!
//! A capture distinguishes three terminal shapes: an approval, a gateway
//! rejection (mapped through the known-codes table, retryable against
//! the same order), and a transport failure (surfaced as an error so the
//! shopper is not told their card was declined).

pub mod status;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::api::CheckoutBackend;
use crate::error::Result;
use crate::models::{CardToken, CreatedOrder, PaymentOutcome, PaymentRequest, TokenizationRequest};

pub use status::{rejection_message, GENERIC_REJECTION};

/// The third-party card-tokenization widget, reduced to its contract.
#[async_trait]
pub trait CardTokenizer: Send + Sync {
  async fn tokenize(&self, request: &TokenizationRequest) -> Result<CardToken>;
}

/// Interpreted result of one charge attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentDecision {
  Approved {
    payment_id: Option<String>,
  },
  /// The gateway said no. `message` is ready for display; the order is
  /// untouched and a new attempt may be made.
  Rejected {
    status_detail: String,
    message: String,
  },
}

impl PaymentDecision {
  pub fn is_approved(&self) -> bool {
    matches!(self, PaymentDecision::Approved { .. })
  }
}

/// Classifies the charge endpoint's answer.
pub fn interpret(outcome: &PaymentOutcome) -> PaymentDecision {
  if outcome.status == "approved" {
    PaymentDecision::Approved { payment_id: outcome.payment_id.clone() }
  } else {
    PaymentDecision::Rejected {
      status_detail: outcome.status_detail.clone(),
      message: rejection_message(&outcome.status_detail).to_string(),
    }
  }
}

/// Runs one user-initiated charge attempt for `order`.
///
/// Tokenizes against the order's authoritative total, submits the token
/// to the charge endpoint, and classifies the answer. Errors returned
/// here are transport or widget failures, never gateway rejections.
#[instrument(skip(backend, tokenizer, order), fields(order_id = order.id, amount_cents = order.total_cents))]
pub async fn capture_payment(
  backend: &dyn CheckoutBackend,
  tokenizer: &dyn CardTokenizer,
  order: &CreatedOrder,
  payer_email: &str,
) -> Result<PaymentDecision> {
  let token = tokenizer
    .tokenize(&TokenizationRequest {
      amount_cents: order.total_cents,
      payer_email: payer_email.to_string(),
    })
    .await?;

  let mut payer = token.payer.clone();
  if payer.email.trim().is_empty() {
    // Some widget configurations omit the payer email from the callback.
    payer.email = payer_email.to_string();
  }

  let request = PaymentRequest {
    order_id: order.id,
    token: token.token,
    payment_method_id: token.payment_method_id,
    issuer_id: token.issuer_id,
    installments: token.installments,
    payer,
  };

  let outcome = backend.process_card_payment(&request).await?;
  let decision = interpret(&outcome);
  match &decision {
    PaymentDecision::Approved { payment_id } => {
      info!(?payment_id, "payment approved");
    }
    PaymentDecision::Rejected { status_detail, .. } => {
      warn!(%status_detail, "payment rejected by gateway");
    }
  }
  Ok(decision)
}
