// core/src/models/coupon.rs

use serde::{Deserialize, Serialize};

/// Backend verdict on a coupon code for a given subtotal.
///
/// On `valid == false`, `message` is the user-facing rejection reason
/// supplied by the server (expired, below minimum purchase, usage limit
/// reached, unknown code). The client never re-derives rejection reasons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponCheck {
  pub valid: bool,
  pub discount_cents: i64,
  pub message: String,
}

/// A coupon the shopper has applied during the current checkout attempt.
///
/// Ephemeral and display-only: the authoritative discount is recomputed
/// server-side when the order is created, by passing `code` along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponApplication {
  pub code: String,
  pub discount_cents: i64,
}
