// core/src/checkout/mod.rs

//! Checkout orchestration: the session state machine and its order cache.

pub mod cache;
pub mod session;

pub use cache::{CachedOrder, OrderCache, SessionOrderCache};
pub use session::{CheckoutSession, CheckoutStep, DisplayTotals, Shopper};
