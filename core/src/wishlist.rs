// core/src/wishlist.rs

//! Wishlist with optimistic server sync.
//!
//! The local toggle applies immediately and the backend call follows;
//! when the call fails the local change is rolled back (an explicit
//! compensating action rather than ad hoc try/catch). Wishlist sync is
//! non-critical: failures are logged and reported to the caller, but
//! nothing here ever blocks checkout.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::warn;

use crate::error::Result;
use crate::models::ProductId;

#[async_trait]
pub trait WishlistBackend: Send + Sync {
  async fn add(&self, product_id: ProductId) -> Result<()>;
  async fn remove(&self, product_id: ProductId) -> Result<()>;
}

pub struct Wishlist {
  ids: RwLock<Vec<ProductId>>,
  backend: Arc<dyn WishlistBackend>,
}

impl std::fmt::Debug for Wishlist {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Wishlist").field("ids", &*self.ids.read()).finish_non_exhaustive()
  }
}

impl Wishlist {
  pub fn new(backend: Arc<dyn WishlistBackend>) -> Self {
    Wishlist { ids: RwLock::new(Vec::new()), backend }
  }

  /// Replaces local state with the server's list, e.g. after login.
  pub fn set_ids(&self, ids: Vec<ProductId>) {
    *self.ids.write() = ids;
  }

  pub fn ids(&self) -> Vec<ProductId> {
    self.ids.read().clone()
  }

  pub fn contains(&self, product_id: ProductId) -> bool {
    self.ids.read().contains(&product_id)
  }

  /// Optimistically toggles `product_id` and syncs the change.
  ///
  /// Returns whether the product is wishlisted after the call. On sync
  /// failure the optimistic transition is compensated (toggled back)
  /// and the error returned; callers may ignore it.
  pub async fn toggle(&self, product_id: ProductId) -> Result<bool> {
    let adding = self.toggle_local(product_id);

    let sync = if adding {
      self.backend.add(product_id).await
    } else {
      self.backend.remove(product_id).await
    };

    if let Err(err) = sync {
      warn!(product_id, error = %err, "wishlist sync failed, rolling back");
      self.toggle_local(product_id);
      return Err(err);
    }
    Ok(adding)
  }

  // Returns true when the toggle added the id.
  fn toggle_local(&self, product_id: ProductId) -> bool {
    let mut ids = self.ids.write();
    if let Some(pos) = ids.iter().position(|id| *id == product_id) {
      ids.remove(pos);
      false
    } else {
      ids.push(product_id);
      true
    }
  }
}
