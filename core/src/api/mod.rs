// core/src/api/mod.rs

//! HTTP surface: the generic JSON client and the checkout backend contract.

pub mod backend;
pub mod client;

pub use backend::{CheckoutBackend, HttpBackend};
pub use client::{ApiClient, ApiEnvelope};
