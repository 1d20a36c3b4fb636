// core/src/checkout/cache.rs

//! Session-scoped cache of the most recently created order.
//!
//! A reload on the confirmation step must still render the order summary
//! without re-fetching or, worse, re-creating the order. The cache lives
//! for the UI session only; it is not the cart and is never persisted
//! across restarts.

use parking_lot::Mutex;

use crate::models::CreatedOrder;

/// A cached order together with its payment state. Only a paid entry
/// may resume a session as confirmed; an unpaid entry marks an order
/// that still needs capture (or cancellation on re-submission).
#[derive(Debug, Clone)]
pub struct CachedOrder {
  pub order: CreatedOrder,
  pub paid: bool,
}

pub trait OrderCache: Send + Sync {
  fn store(&self, entry: &CachedOrder);
  fn load(&self) -> Option<CachedOrder>;
  fn clear(&self);
}

/// In-memory single-slot cache, the default session store.
#[derive(Debug, Default)]
pub struct SessionOrderCache {
  slot: Mutex<Option<CachedOrder>>,
}

impl SessionOrderCache {
  pub fn new() -> Self {
    Self::default()
  }
}

impl OrderCache for SessionOrderCache {
  fn store(&self, entry: &CachedOrder) {
    *self.slot.lock() = Some(entry.clone());
  }

  fn load(&self) -> Option<CachedOrder> {
    self.slot.lock().clone()
  }

  fn clear(&self) {
    *self.slot.lock() = None;
  }
}
