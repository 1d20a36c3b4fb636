// core/src/models/mod.rs

//! Data structures exchanged with the backend API and held in client state.
//!
//! All monetary amounts are integer minor units (cents); all derived totals
//! are recomputed on demand rather than stored, so they cannot drift.

pub mod cart;
pub mod coupon;
pub mod order;
pub mod payment;
pub mod product;

pub use cart::CartLine;
pub use coupon::{CouponApplication, CouponCheck};
pub use order::{
  CreatedOrder, DraftOrder, GuestContact, OrderItem, OrderItemInput, OrderListItem, ShippingDetails,
};
pub use payment::{
  CardToken, Payer, PayerIdentification, PaymentOutcome, PaymentRequest, TokenizationRequest,
};
pub use product::{ProductId, ProductSummary};
