// src/lib.rs

//! Lumera: the client-side engine behind an artisanal-lamp storefront.
//!
//! This crate owns the checkout-critical state the UI layer drives:
//!  - A persisted cart store with derived, never-cached totals.
//!  - Advisory coupon validation against the remote pricing authority.
//!  - Order submission with pre-flight validation and guest-contact gating.
//!  - Payment capture through an opaque card-tokenization widget, with a
//!    fixed rejection-code translation table.
//!  - A three-step checkout session (Shipping -> Payment -> Confirmed)
//!    sequencing the above and clearing the cart exactly once on approval.
//!
//! Everything business-authoritative lives on the backend API; this engine
//! never trusts its own arithmetic for the final charge.

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod payment;
pub mod wishlist;

// --- Re-exports for the Public API ---

pub use crate::api::{ApiClient, CheckoutBackend, HttpBackend};
pub use crate::cart::{CartStorage, CartStore, InMemoryStorage, JsonFileStorage, SharedCart};
pub use crate::checkout::{
  CachedOrder, CheckoutSession, CheckoutStep, DisplayTotals, OrderCache, SessionOrderCache, Shopper,
};
pub use crate::config::StoreConfig;
pub use crate::error::{Result, StoreError};
pub use crate::models::{
  CardToken, CartLine, CouponApplication, CouponCheck, CreatedOrder, DraftOrder, GuestContact,
  OrderItem, OrderItemInput, OrderListItem, Payer, PayerIdentification, PaymentOutcome,
  PaymentRequest, ProductId, ProductSummary, ShippingDetails, TokenizationRequest,
};
pub use crate::payment::{
  capture_payment, rejection_message, CardTokenizer, PaymentDecision, GENERIC_REJECTION,
};
pub use crate::wishlist::{Wishlist, WishlistBackend};
