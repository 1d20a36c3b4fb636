// core/src/models/cart.rs

use serde::{Deserialize, Serialize};

use super::product::ProductSummary;

/// One product-and-quantity pairing in the shopper's in-progress selection.
///
/// Unique per product id within a cart; quantity is always at least 1
/// (a quantity that would drop to zero removes the line instead).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
  pub product: ProductSummary,
  pub quantity: u32,
}

impl CartLine {
  /// Line subtotal at the product's effective price.
  pub fn subtotal_cents(&self) -> i64 {
    self.product.final_price_cents * i64::from(self.quantity)
  }
}
