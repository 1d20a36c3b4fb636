// tests/common/mod.rs
#![allow(dead_code)] // Allow unused helpers in this common test module

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tracing::Level;

use lumera::{
  CardToken, CardTokenizer, CartStore, CheckoutBackend, CheckoutSession, CouponCheck, CreatedOrder,
  DraftOrder, GuestContact, OrderItem, OrderListItem, Payer, PayerIdentification, PaymentOutcome,
  PaymentRequest, ProductId, ProductSummary, Result, SessionOrderCache, SharedCart, ShippingDetails,
  Shopper, StoreError, TokenizationRequest,
};

// --- Fixture builders ---

pub fn lamp(id: ProductId, name: &str, price_cents: i64) -> ProductSummary {
  ProductSummary {
    id,
    name: name.to_string(),
    slug: name.to_lowercase().replace(' ', "-"),
    price_cents,
    sale_price_cents: None,
    final_price_cents: price_cents,
    main_image: format!("/media/{id}.webp"),
    in_stock: true,
  }
}

pub fn shipping() -> ShippingDetails {
  ShippingDetails {
    street: "Calle 123, Colonia Centro".to_string(),
    city: "Ciudad de México".to_string(),
    region: "CDMX".to_string(),
    postal_code: "06600".to_string(),
    notes: None,
  }
}

pub fn guest_contact() -> GuestContact {
  GuestContact {
    name: "María García".to_string(),
    email: "maria@example.com".to_string(),
    phone: "+52 55 1234 5678".to_string(),
  }
}

pub fn approved() -> PaymentOutcome {
  PaymentOutcome {
    status: "approved".to_string(),
    status_detail: "accredited".to_string(),
    payment_id: Some("pay_0001".to_string()),
  }
}

pub fn rejected(status_detail: &str) -> PaymentOutcome {
  PaymentOutcome { status: "rejected".to_string(), status_detail: status_detail.to_string(), payment_id: None }
}

fn transport_error(what: &str) -> StoreError {
  StoreError::transport(anyhow::anyhow!("connection refused during {what}"))
}

// --- Scripted backend ---

#[derive(Debug, Clone)]
enum CouponVerdict {
  Valid { discount_cents: i64 },
  Invalid { message: String },
}

#[derive(Default)]
struct MockState {
  prices: HashMap<ProductId, i64>,
  coupons: HashMap<String, CouponVerdict>,
  order_seq: i64,
  created: Vec<CreatedOrder>,
  drafts: Vec<DraftOrder>,
  cancelled: Vec<String>,
  payment_requests: Vec<PaymentRequest>,
  payment_script: VecDeque<PaymentOutcome>,
  validate_calls: usize,
  create_calls: usize,
  reject_create: Option<String>,
  fail_next_validate: bool,
  fail_next_create: bool,
  fail_next_payment: bool,
  stall_next_create: bool,
}

/// In-process stand-in for the backend API, scripted per test.
///
/// Totals are computed from the configured price table so tests can
/// assert that the server-side figures (not the cart's) flow into
/// payment capture.
#[derive(Default)]
pub struct MockBackend {
  state: Mutex<MockState>,
}

impl MockBackend {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn price(&self, product_id: ProductId, cents: i64) {
    self.state.lock().prices.insert(product_id, cents);
  }

  pub fn coupon_valid(&self, code: &str, discount_cents: i64) {
    self.state.lock().coupons.insert(code.to_string(), CouponVerdict::Valid { discount_cents });
  }

  pub fn coupon_invalid(&self, code: &str, message: &str) {
    self
      .state
      .lock()
      .coupons
      .insert(code.to_string(), CouponVerdict::Invalid { message: message.to_string() });
  }

  pub fn reject_next_create(&self, message: &str) {
    self.state.lock().reject_create = Some(message.to_string());
  }

  pub fn fail_next_validate(&self) {
    self.state.lock().fail_next_validate = true;
  }

  pub fn fail_next_create(&self) {
    self.state.lock().fail_next_create = true;
  }

  pub fn fail_next_payment(&self) {
    self.state.lock().fail_next_payment = true;
  }

  /// Makes the next order creation hang until the caller gives up on it.
  pub fn stall_next_create(&self) {
    self.state.lock().stall_next_create = true;
  }

  /// Queues the outcome the next charge attempt will receive.
  pub fn script_payment(&self, outcome: PaymentOutcome) {
    self.state.lock().payment_script.push_back(outcome);
  }

  pub fn validate_calls(&self) -> usize {
    self.state.lock().validate_calls
  }

  pub fn create_calls(&self) -> usize {
    self.state.lock().create_calls
  }

  pub fn drafts(&self) -> Vec<DraftOrder> {
    self.state.lock().drafts.clone()
  }

  pub fn cancelled(&self) -> Vec<String> {
    self.state.lock().cancelled.clone()
  }

  pub fn payment_requests(&self) -> Vec<PaymentRequest> {
    self.state.lock().payment_requests.clone()
  }
}

#[async_trait]
impl CheckoutBackend for MockBackend {
  async fn validate_coupon(&self, code: &str, subtotal_cents: i64) -> Result<CouponCheck> {
    let mut state = self.state.lock();
    state.validate_calls += 1;
    if std::mem::take(&mut state.fail_next_validate) {
      return Err(transport_error("coupon validation"));
    }
    match state.coupons.get(code) {
      Some(CouponVerdict::Valid { discount_cents }) => Ok(CouponCheck {
        valid: true,
        discount_cents: (*discount_cents).min(subtotal_cents),
        message: format!("Coupon {code} applied"),
      }),
      Some(CouponVerdict::Invalid { message }) => {
        Ok(CouponCheck { valid: false, discount_cents: 0, message: message.clone() })
      }
      None => Ok(CouponCheck {
        valid: false,
        discount_cents: 0,
        message: "Invalid coupon code.".to_string(),
      }),
    }
  }

  async fn create_order(&self, draft: &DraftOrder) -> Result<CreatedOrder> {
    if std::mem::take(&mut self.state.lock().stall_next_create) {
      std::future::pending::<()>().await;
    }
    let mut state = self.state.lock();
    state.create_calls += 1;
    if std::mem::take(&mut state.fail_next_create) {
      return Err(transport_error("order creation"));
    }
    if let Some(message) = state.reject_create.take() {
      return Err(StoreError::Rejected(message));
    }

    let items: Vec<OrderItem> = draft
      .items
      .iter()
      .map(|input| {
        let unit = state.prices.get(&input.product_id).copied().unwrap_or(0);
        OrderItem {
          product_id: input.product_id,
          product_name: format!("Product {}", input.product_id),
          quantity: input.quantity,
          unit_price_cents: unit,
          subtotal_cents: unit * i64::from(input.quantity),
        }
      })
      .collect();
    let subtotal: i64 = items.iter().map(|i| i.subtotal_cents).sum();
    let discount = match draft.coupon_code.as_deref().and_then(|c| state.coupons.get(c)) {
      Some(CouponVerdict::Valid { discount_cents }) => (*discount_cents).min(subtotal),
      _ => 0,
    };

    state.order_seq += 1;
    let order = CreatedOrder {
      id: state.order_seq,
      order_number: format!("ORD-{:04}", 1000 + state.order_seq),
      status: "pending".to_string(),
      subtotal_cents: subtotal,
      discount_cents: discount,
      total_cents: subtotal - discount,
      items,
      created_at: Utc::now(),
    };
    state.drafts.push(draft.clone());
    state.created.push(order.clone());
    Ok(order)
  }

  async fn cancel_order(&self, order_number: &str) -> Result<CreatedOrder> {
    let mut state = self.state.lock();
    state.cancelled.push(order_number.to_string());
    let mut order = state
      .created
      .iter()
      .find(|o| o.order_number == order_number)
      .cloned()
      .ok_or_else(|| StoreError::Rejected("Order not found.".to_string()))?;
    order.status = "cancelled".to_string();
    Ok(order)
  }

  async fn process_card_payment(&self, request: &PaymentRequest) -> Result<PaymentOutcome> {
    let mut state = self.state.lock();
    if std::mem::take(&mut state.fail_next_payment) {
      return Err(transport_error("payment processing"));
    }
    state.payment_requests.push(request.clone());
    Ok(state.payment_script.pop_front().unwrap_or_else(approved))
  }

  async fn my_orders(&self) -> Result<Vec<OrderListItem>> {
    let state = self.state.lock();
    Ok(
      state
        .created
        .iter()
        .map(|o| OrderListItem {
          id: o.id,
          order_number: o.order_number.clone(),
          status: o.status.clone(),
          total_cents: o.total_cents,
          items_count: o.items.iter().map(|i| i.quantity).sum(),
          created_at: o.created_at,
        })
        .collect(),
    )
  }

  async fn order_detail(&self, order_number: &str) -> Result<CreatedOrder> {
    let state = self.state.lock();
    state
      .created
      .iter()
      .find(|o| o.order_number == order_number)
      .cloned()
      .ok_or_else(|| StoreError::Rejected("Order not found.".to_string()))
  }
}

// --- Mock card widget ---

/// Stand-in for the tokenizer widget; records what it was initialized
/// with so tests can assert the amount handed to it.
#[derive(Default)]
pub struct MockTokenizer {
  requests: Mutex<Vec<TokenizationRequest>>,
  fail_next: Mutex<bool>,
}

impl MockTokenizer {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn fail_next(&self) {
    *self.fail_next.lock() = true;
  }

  pub fn requests(&self) -> Vec<TokenizationRequest> {
    self.requests.lock().clone()
  }
}

#[async_trait]
impl CardTokenizer for MockTokenizer {
  async fn tokenize(&self, request: &TokenizationRequest) -> Result<CardToken> {
    if std::mem::take(&mut *self.fail_next.lock()) {
      return Err(StoreError::Internal("card widget failed to tokenize".to_string()));
    }
    self.requests.lock().push(request.clone());
    Ok(CardToken {
      token: format!("tok_test_{}", self.requests.lock().len()),
      payment_method_id: "visa".to_string(),
      issuer_id: Some("310".to_string()),
      installments: 1,
      payer: Payer {
        email: request.payer_email.clone(),
        identification: Some(PayerIdentification {
          kind: "RFC".to_string(),
          number: "XAXX010101000".to_string(),
        }),
      },
    })
  }
}

// --- Session wiring ---

pub fn empty_cart() -> SharedCart {
  SharedCart::new(CartStore::in_memory())
}

pub fn session_for(backend: &Arc<MockBackend>, cart: &SharedCart, shopper: Shopper) -> CheckoutSession {
  CheckoutSession::new(backend.clone(), cart.clone(), Arc::new(SessionOrderCache::new()), shopper)
}

pub fn authenticated() -> Shopper {
  Shopper::Authenticated { email: "shopper@example.com".to_string() }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
