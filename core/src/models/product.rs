// core/src/models/product.rs

use serde::{Deserialize, Serialize};

/// Backend product identifier.
pub type ProductId = i64;

/// The slice of a product the cart needs to hold and display a line.
///
/// `final_price_cents` is the server-computed effective price (sale price
/// when one is active, list price otherwise); the cart never recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
  pub id: ProductId,
  pub name: String,
  pub slug: String,
  pub price_cents: i64,
  pub sale_price_cents: Option<i64>,
  pub final_price_cents: i64,
  pub main_image: String,
  pub in_stock: bool,
}
