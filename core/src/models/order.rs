// core/src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

use super::product::ProductId;

/// Shipping address collected during the Shipping step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShippingDetails {
  pub street: String,
  pub city: String,
  pub region: String,
  pub postal_code: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
}

impl ShippingDetails {
  /// Pre-flight check that every required field is non-empty (trimmed).
  ///
  /// Not a substitute for server validation; it only avoids a wasted
  /// round trip.
  pub fn require_complete(&self) -> Result<()> {
    let required = [
      ("street", &self.street),
      ("city", &self.city),
      ("region", &self.region),
      ("postal code", &self.postal_code),
    ];
    for (label, value) in required {
      if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("Missing shipping field: {label}.")));
      }
    }
    Ok(())
  }
}

/// Contact fields an unauthenticated shopper must provide in place of a
/// stored profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestContact {
  pub name: String,
  pub email: String,
  pub phone: String,
}

impl GuestContact {
  pub fn require_complete(&self) -> Result<()> {
    let required = [("name", &self.name), ("email", &self.email), ("phone", &self.phone)];
    for (label, value) in required {
      if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("Missing contact field: {label}.")));
      }
    }
    Ok(())
  }
}

/// One `{product, quantity}` pair of the cart snapshot sent at submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemInput {
  pub product_id: ProductId,
  pub quantity: u32,
}

/// The not-yet-submitted shipping/contact/coupon bundle, plus the item
/// snapshot taken from the cart at submission time. Later cart mutations
/// do not affect an order already submitted.
#[derive(Debug, Clone, Serialize)]
pub struct DraftOrder {
  #[serde(flatten)]
  pub shipping: ShippingDetails,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub guest_contact: Option<GuestContact>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub coupon_code: Option<String>,
  pub items: Vec<OrderItemInput>,
}

/// A line of a created order as echoed back by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
  pub product_id: ProductId,
  pub product_name: String,
  pub quantity: u32,
  pub unit_price_cents: i64,
  pub subtotal_cents: i64,
}

/// The backend's durable record of a committed purchase.
///
/// Once created, this is the source of truth for the amount charged:
/// `subtotal_cents`/`discount_cents`/`total_cents` are recomputed
/// server-side and may differ from client-shown values if prices or
/// coupon state changed between display and submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedOrder {
  pub id: i64,
  pub order_number: String,
  pub status: String,
  pub subtotal_cents: i64,
  pub discount_cents: i64,
  pub total_cents: i64,
  pub items: Vec<OrderItem>,
  pub created_at: DateTime<Utc>,
}

/// Compact row for the shopper's order history list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListItem {
  pub id: i64,
  pub order_number: String,
  pub status: String,
  pub total_cents: i64,
  pub items_count: u32,
  pub created_at: DateTime<Utc>,
}
