// core/src/cart/storage.rs

//! Pluggable persistence for the cart.
//!
//! The cart survives reloads in client-local storage, scoped to the
//! device and independent of authentication state. Writes are
//! last-write-wins across concurrent processes; no cross-tab
//! consistency is guaranteed or attempted.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use parking_lot::Mutex;

use crate::models::CartLine;

/// Where cart lines are loaded from and persisted to.
///
/// Implementations may fail arbitrarily (disk, permissions); the cart
/// store logs those failures and carries on, because cart mutations
/// themselves are infallible local state transitions.
pub trait CartStorage: Send + Sync {
  fn load(&self) -> anyhow::Result<Vec<CartLine>>;
  fn persist(&self, lines: &[CartLine]) -> anyhow::Result<()>;
}

/// JSON-file storage, the device-local equivalent of browser storage.
#[derive(Debug)]
pub struct JsonFileStorage {
  path: PathBuf,
}

impl JsonFileStorage {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    JsonFileStorage { path: path.into() }
  }
}

impl CartStorage for JsonFileStorage {
  fn load(&self) -> anyhow::Result<Vec<CartLine>> {
    if !self.path.exists() {
      return Ok(Vec::new());
    }
    let raw = fs::read_to_string(&self.path)
      .with_context(|| format!("reading cart file {}", self.path.display()))?;
    let lines = serde_json::from_str(&raw)
      .with_context(|| format!("parsing cart file {}", self.path.display()))?;
    Ok(lines)
  }

  fn persist(&self, lines: &[CartLine]) -> anyhow::Result<()> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let raw = serde_json::to_string(lines).context("serializing cart lines")?;
    fs::write(&self.path, raw).with_context(|| format!("writing cart file {}", self.path.display()))?;
    Ok(())
  }
}

/// Ephemeral storage for tests and sessions that opt out of persistence.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
  lines: Mutex<Vec<CartLine>>,
}

impl InMemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }
}

impl CartStorage for InMemoryStorage {
  fn load(&self) -> anyhow::Result<Vec<CartLine>> {
    Ok(self.lines.lock().clone())
  }

  fn persist(&self, lines: &[CartLine]) -> anyhow::Result<()> {
    *self.lines.lock() = lines.to_vec();
    Ok(())
  }
}
