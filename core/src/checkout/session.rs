// core/src/checkout/session.rs

//! The three-step checkout flow controller.
//!
//! Shipping -> Payment -> Confirmed, with transitions driven only by the
//! operations below. Order submission must complete before payment
//! capture is attempted; the step field enforces that structurally, not
//! a lock. No step is time-limited or cancellable by the engine;
//! abandonment is the shopper navigating away.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::api::CheckoutBackend;
use crate::cart::SharedCart;
use crate::error::{Result, StoreError};
use crate::models::{
  CouponApplication, CreatedOrder, DraftOrder, GuestContact, OrderItemInput, ShippingDetails,
};
use crate::payment::{capture_payment, CardTokenizer, PaymentDecision};

use super::cache::{CachedOrder, OrderCache};

/// Where the shopper currently is in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
  /// Collecting address, guest contact and optional coupon.
  Shipping,
  /// An order exists; capturing payment against it.
  Payment,
  /// Terminal within this session; summary comes from the cached order.
  Confirmed,
}

/// Who is checking out. Authentication itself is an external black box;
/// the session only needs to know whether guest contact fields are
/// required and which email to hand the payment widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shopper {
  Guest,
  Authenticated { email: String },
}

/// Client-shown totals. Once an order exists these are the server's
/// authoritative figures, which may differ from what the coupon step
/// displayed; the session reconciles rather than assuming invariance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayTotals {
  pub subtotal_cents: i64,
  pub discount_cents: i64,
  pub total_cents: i64,
}

pub struct CheckoutSession {
  id: Uuid,
  backend: Arc<dyn CheckoutBackend>,
  cart: SharedCart,
  cache: Arc<dyn OrderCache>,
  shopper: Shopper,
  step: CheckoutStep,
  coupon: Option<CouponApplication>,
  coupon_error: Option<String>,
  order: Option<CreatedOrder>,
  guest_email: Option<String>,
  // UI disable signal while a checkout-critical request is in flight;
  // a second trigger of the same action is refused locally. Cleared by
  // the guard's Drop, so an abandoned future cannot wedge the session.
  in_flight: Arc<AtomicBool>,
}

struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
  fn acquire(flag: &Arc<AtomicBool>) -> Option<InFlightGuard> {
    if flag.swap(true, Ordering::AcqRel) {
      None
    } else {
      Some(InFlightGuard(flag.clone()))
    }
  }
}

impl Drop for InFlightGuard {
  fn drop(&mut self) {
    self.0.store(false, Ordering::Release);
  }
}

impl std::fmt::Debug for CheckoutSession {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CheckoutSession")
      .field("id", &self.id)
      .field("step", &self.step)
      .field("coupon", &self.coupon)
      .field("order", &self.order.as_ref().map(|o| o.order_number.clone()))
      .finish_non_exhaustive()
  }
}

impl CheckoutSession {
  pub fn new(
    backend: Arc<dyn CheckoutBackend>,
    cart: SharedCart,
    cache: Arc<dyn OrderCache>,
    shopper: Shopper,
  ) -> Self {
    CheckoutSession {
      id: Uuid::new_v4(),
      backend,
      cart,
      cache,
      shopper,
      step: CheckoutStep::Shipping,
      coupon: None,
      coupon_error: None,
      order: None,
      guest_email: None,
      in_flight: Arc::new(AtomicBool::new(false)),
    }
  }

  /// Rebuilds a session after a page reload. A cached *paid* order
  /// lands the shopper back on Confirmed with that order's summary. A
  /// cached unpaid order means the reload happened before payment
  /// approval: the session restarts at Shipping with the order kept, so
  /// re-submitting cancels and replaces it instead of stranding a
  /// duplicate. Confirmed is never reached without an approval.
  pub fn resume(
    backend: Arc<dyn CheckoutBackend>,
    cart: SharedCart,
    cache: Arc<dyn OrderCache>,
    shopper: Shopper,
  ) -> Self {
    let cached = cache.load();
    let mut session = CheckoutSession::new(backend, cart, cache, shopper);
    if let Some(entry) = cached {
      if entry.paid {
        info!(order_number = %entry.order.order_number, "resuming confirmed checkout from session cache");
        session.order = Some(entry.order);
        session.step = CheckoutStep::Confirmed;
      } else {
        info!(order_number = %entry.order.order_number, "resuming with an unpaid order, restarting at shipping");
        session.order = Some(entry.order);
      }
    }
    session
  }

  pub fn step(&self) -> CheckoutStep {
    self.step
  }

  /// True while an order submission or payment attempt is in flight;
  /// the UI uses this to disable the triggering control.
  pub fn in_flight(&self) -> bool {
    self.in_flight.load(Ordering::Acquire)
  }

  pub fn applied_coupon(&self) -> Option<&CouponApplication> {
    self.coupon.as_ref()
  }

  /// The last coupon rejection message, if a validation attempt failed.
  pub fn coupon_error(&self) -> Option<&str> {
    self.coupon_error.as_deref()
  }

  pub fn created_order(&self) -> Option<&CreatedOrder> {
    self.order.as_ref()
  }

  /// The confirmed order summary; `Some` only in the terminal step.
  pub fn confirmed_order(&self) -> Option<&CreatedOrder> {
    match self.step {
      CheckoutStep::Confirmed => self.order.as_ref(),
      _ => None,
    }
  }

  /// Totals to show the shopper. Before an order exists these are the
  /// cart total minus the advisory coupon discount; afterwards they are
  /// the order's server-computed figures.
  pub fn display_totals(&self) -> DisplayTotals {
    if let Some(order) = &self.order {
      return DisplayTotals {
        subtotal_cents: order.subtotal_cents,
        discount_cents: order.discount_cents,
        total_cents: order.total_cents,
      };
    }
    let subtotal = self.cart.read().total_price_cents();
    let discount = self.coupon.as_ref().map_or(0, |c| c.discount_cents).min(subtotal);
    DisplayTotals { subtotal_cents: subtotal, discount_cents: discount, total_cents: subtotal - discount }
  }

  /// Validates `code` against the current cart subtotal and, when the
  /// server accepts it, applies it to the checkout display state.
  ///
  /// The result is advisory: the authoritative discount is recomputed
  /// server-side at order creation. A transport failure neither applies
  /// nor rejects the coupon.
  #[instrument(skip(self), fields(session = %self.id))]
  pub async fn apply_coupon(&mut self, code: &str) -> Result<CouponApplication> {
    if self.step != CheckoutStep::Shipping {
      return Err(StoreError::Validation("Coupons can only be applied before the order is created.".to_string()));
    }
    let code = code.trim().to_uppercase();
    if code.is_empty() {
      return Err(StoreError::Validation("Enter a coupon code.".to_string()));
    }

    let subtotal = self.cart.read().total_price_cents();
    let check = match self.backend.validate_coupon(&code, subtotal).await {
      Ok(check) => check,
      Err(err) => {
        // Connectivity is neither "valid" nor "invalid"; keep whatever
        // coupon state the shopper already had.
        warn!(error = %err, "coupon validation did not complete");
        return Err(err);
      }
    };

    if check.valid {
      let application = CouponApplication { code: code.clone(), discount_cents: check.discount_cents };
      info!(%code, discount_cents = check.discount_cents, "coupon applied");
      self.coupon = Some(application.clone());
      self.coupon_error = None;
      Ok(application)
    } else {
      info!(%code, reason = %check.message, "coupon rejected by server");
      self.coupon = None;
      self.coupon_error = Some(check.message.clone());
      Err(StoreError::Rejected(check.message))
    }
  }

  /// Resets the ephemeral discount to zero and clears any validation
  /// error message.
  pub fn remove_coupon(&mut self) {
    self.coupon = None;
    self.coupon_error = None;
  }

  /// Submits the shipping step: validates locally, snapshots the cart,
  /// creates the order, caches it, and advances to Payment.
  ///
  /// The cart is left untouched: it is cleared only after payment
  /// approval, so a failed payment leaves it intact for a retry.
  ///
  /// When a prior order from this session exists (the shopper went back
  /// from Payment), it is cancelled first so re-submission does not
  /// strand a duplicate order on the backend.
  #[instrument(skip(self, shipping, guest), fields(session = %self.id))]
  pub async fn submit_shipping(
    &mut self,
    shipping: ShippingDetails,
    guest: Option<GuestContact>,
  ) -> Result<CreatedOrder> {
    if self.step != CheckoutStep::Shipping {
      return Err(StoreError::Validation("Shipping details were already submitted.".to_string()));
    }
    let _in_flight = InFlightGuard::acquire(&self.in_flight)
      .ok_or_else(|| StoreError::Validation("An order submission is already in progress.".to_string()))?;

    // Pre-flight checks; no network call happens unless all pass.
    let (cart_empty, items) = {
      let cart = self.cart.read();
      (cart.is_empty(), cart.snapshot_items())
    };
    if cart_empty {
      return Err(StoreError::Validation("Your cart is empty.".to_string()));
    }
    shipping.require_complete()?;
    let guest_contact = match (&self.shopper, guest) {
      (Shopper::Guest, Some(contact)) => {
        contact.require_complete()?;
        Some(contact)
      }
      (Shopper::Guest, None) => {
        return Err(StoreError::Validation("Contact details are required for guest checkout.".to_string()));
      }
      // Authenticated shoppers ship against their stored profile.
      (Shopper::Authenticated { .. }, _) => None,
    };

    self.create_order_inner(shipping, guest_contact, items).await
  }

  async fn create_order_inner(
    &mut self,
    shipping: ShippingDetails,
    guest_contact: Option<GuestContact>,
    items: Vec<OrderItemInput>,
  ) -> Result<CreatedOrder> {
    // Re-submission after back-navigation: cancel the order the earlier
    // submission created. Failure to cancel must not block the new
    // order; the backend's own expiry handles stragglers.
    if let Some(previous) = self.order.take() {
      self.cache.clear();
      match self.backend.cancel_order(&previous.order_number).await {
        Ok(_) => info!(order_number = %previous.order_number, "cancelled superseded order"),
        Err(err) => {
          warn!(order_number = %previous.order_number, error = %err, "could not cancel superseded order")
        }
      }
    }

    let draft = DraftOrder {
      shipping,
      guest_contact: guest_contact.clone(),
      coupon_code: self.coupon.as_ref().map(|c| c.code.clone()),
      items,
    };

    let order = self.backend.create_order(&draft).await?;
    info!(
      order_number = %order.order_number,
      total_cents = order.total_cents,
      "order created, advancing to payment"
    );

    self.cache.store(&CachedOrder { order: order.clone(), paid: false });
    self.guest_email = guest_contact.map(|c| c.email);
    self.order = Some(order.clone());
    self.step = CheckoutStep::Payment;
    Ok(order)
  }

  /// Returns from Payment to Shipping without discarding the created
  /// order; a fresh submission will cancel and replace it.
  pub fn back_to_shipping(&mut self) -> Result<()> {
    match self.step {
      CheckoutStep::Payment => {
        self.step = CheckoutStep::Shipping;
        Ok(())
      }
      _ => Err(StoreError::Validation("Can only return to shipping from the payment step.".to_string())),
    }
  }

  /// Runs one user-initiated payment attempt against the created order.
  ///
  /// Approval clears the cart and moves to Confirmed exactly once; the
  /// terminal step refuses further submissions. A gateway rejection
  /// keeps the session in Payment so the shopper can retry with another
  /// card without re-entering shipping information. Errors are transport
  /// or widget failures, never rejections.
  #[instrument(skip(self, tokenizer), fields(session = %self.id))]
  pub async fn submit_payment(&mut self, tokenizer: &dyn CardTokenizer) -> Result<PaymentDecision> {
    if self.step != CheckoutStep::Payment {
      return Err(StoreError::Validation("There is no payment pending for this checkout.".to_string()));
    }
    let _in_flight = InFlightGuard::acquire(&self.in_flight)
      .ok_or_else(|| StoreError::Validation("A payment attempt is already in progress.".to_string()))?;
    let order = self
      .order
      .clone()
      .ok_or_else(|| StoreError::Internal("payment step reached without a created order".to_string()))?;
    let payer_email = self.payer_email()?;

    let decision = capture_payment(self.backend.as_ref(), tokenizer, &order, &payer_email).await?;
    if decision.is_approved() {
      // Single approval: one cart clear, one transition to Confirmed.
      // The cache entry is marked paid here and nowhere else.
      self.cache.store(&CachedOrder { order: order.clone(), paid: true });
      self.cart.write().clear();
      self.step = CheckoutStep::Confirmed;
      info!(order_number = %order.order_number, "checkout confirmed");
    }
    Ok(decision)
  }

  fn payer_email(&self) -> Result<String> {
    match &self.shopper {
      Shopper::Authenticated { email } => Ok(email.clone()),
      Shopper::Guest => self
        .guest_email
        .clone()
        .ok_or_else(|| StoreError::Internal("guest checkout reached payment without a contact email".to_string())),
    }
  }
}
