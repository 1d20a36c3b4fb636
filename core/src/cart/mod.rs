// core/src/cart/mod.rs

//! The authoritative client-side record of what the shopper intends to buy.
//!
//! Invariants:
//!  - Every line's quantity is a positive integer.
//!  - No two lines reference the same product.
//!  - `total_items`/`total_price_cents` are derived on demand from the
//!    line list, never cached, so they can never go stale.
//!
//! None of the operations here can fail: they are local, synchronous,
//! deterministic state transitions. Persistence happens after each
//! mutation as a best-effort side effect; a failed write is logged and
//! ignored so the shopper's in-memory cart stays usable.

pub mod storage;

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::warn;

use crate::models::{CartLine, OrderItemInput, ProductId, ProductSummary};

pub use storage::{CartStorage, InMemoryStorage, JsonFileStorage};

pub struct CartStore {
  // Insertion order is irrelevant to totals but preserved for display.
  lines: Vec<CartLine>,
  storage: Arc<dyn CartStorage>,
}

impl std::fmt::Debug for CartStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartStore").field("lines", &self.lines).finish_non_exhaustive()
  }
}

impl CartStore {
  /// Opens a cart backed by `storage`, loading whatever a previous
  /// session persisted. An unreadable store starts the cart empty
  /// rather than failing the caller.
  pub fn open(storage: Arc<dyn CartStorage>) -> Self {
    let lines = match storage.load() {
      Ok(lines) => lines,
      Err(err) => {
        warn!(error = %err, "could not load persisted cart, starting empty");
        Vec::new()
      }
    };
    CartStore { lines, storage }
  }

  /// A cart with ephemeral storage, for tests and guest kiosk sessions.
  pub fn in_memory() -> Self {
    CartStore::open(Arc::new(InMemoryStorage::new()))
  }

  /// Adds `quantity` of `product`. If a line for the product already
  /// exists its quantity is incremented; a second line is never created.
  /// `quantity == 0` is a no-op. No upper bound is enforced here; stock
  /// limits are advisory and checked server-side at order time.
  pub fn add_item(&mut self, product: ProductSummary, quantity: u32) {
    if quantity == 0 {
      return;
    }
    match self.lines.iter_mut().find(|line| line.product.id == product.id) {
      Some(line) => line.quantity = line.quantity.saturating_add(quantity),
      None => self.lines.push(CartLine { product, quantity }),
    }
    self.persist();
  }

  /// Removes the line for `product_id` if present; no-op otherwise.
  pub fn remove_item(&mut self, product_id: ProductId) {
    let before = self.lines.len();
    self.lines.retain(|line| line.product.id != product_id);
    if self.lines.len() != before {
      self.persist();
    }
  }

  /// Sets (replaces, not increments) the quantity for `product_id`.
  /// A zero or negative quantity removes the line entirely, so no
  /// non-positive quantity ever persists.
  pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
    if quantity <= 0 {
      self.remove_item(product_id);
      return;
    }
    // Quantities above u32::MAX are not representable; saturate.
    let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
    if let Some(line) = self.lines.iter_mut().find(|line| line.product.id == product_id) {
      line.quantity = quantity;
      self.persist();
    }
  }

  /// Empties the cart. Irreversible: there is no undo.
  pub fn clear(&mut self) {
    self.lines.clear();
    self.persist();
  }

  pub fn lines(&self) -> &[CartLine] {
    &self.lines
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  /// Sum of quantities across all lines.
  pub fn total_items(&self) -> u32 {
    self.lines.iter().map(|line| line.quantity).sum()
  }

  /// Sum of `final_price_cents * quantity` across all lines.
  pub fn total_price_cents(&self) -> i64 {
    self.lines.iter().map(CartLine::subtotal_cents).sum()
  }

  /// The `{product_id, quantity}` snapshot order submission sends.
  pub fn snapshot_items(&self) -> Vec<OrderItemInput> {
    self
      .lines
      .iter()
      .map(|line| OrderItemInput { product_id: line.product.id, quantity: line.quantity })
      .collect()
  }

  fn persist(&self) {
    if let Err(err) = self.storage.persist(&self.lines) {
      warn!(error = %err, "cart persist failed, in-memory state kept");
    }
  }
}

/// A cloneable cart handle shared between the UI layer and a checkout
/// session, with interior mutability via `parking_lot::RwLock`.
///
/// IMPORTANT: lock guards obtained from this handle are blocking and
/// MUST NOT be held across `.await` suspension points.
#[derive(Debug, Clone)]
pub struct SharedCart(Arc<RwLock<CartStore>>);

impl SharedCart {
  pub fn new(store: CartStore) -> Self {
    SharedCart(Arc::new(RwLock::new(store)))
  }

  /// Acquires a read lock. The guard must be dropped before any `.await`.
  pub fn read(&self) -> RwLockReadGuard<'_, CartStore> {
    self.0.read()
  }

  /// Acquires a write lock. The guard must be dropped before any `.await`.
  pub fn write(&self) -> RwLockWriteGuard<'_, CartStore> {
    self.0.write()
  }
}

impl From<CartStore> for SharedCart {
  fn from(store: CartStore) -> Self {
    SharedCart::new(store)
  }
}
