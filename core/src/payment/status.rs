// core/src/payment/status.rs

//! Translation of gateway `status_detail` codes into shopper-readable text.
//!
//! The set of codes is fixed by the card gateway; anything not in the
//! table falls back to [`GENERIC_REJECTION`] so the shopper never sees an
//! empty or raw code.

/// Fallback for rejection codes the table does not know.
pub const GENERIC_REJECTION: &str = "The payment was rejected. Try another card.";

/// Maps a known gateway rejection code to its message.
pub fn rejection_message(status_detail: &str) -> &'static str {
  match status_detail {
    "cc_rejected_bad_filled_card_number" => "Check the card number.",
    "cc_rejected_bad_filled_date" => "Check the expiry date.",
    "cc_rejected_bad_filled_security_code" => "Check the security code.",
    "cc_rejected_bad_filled_other" => "Check the card details.",
    "cc_rejected_blacklist" => "We could not process your payment.",
    "cc_rejected_call_for_authorize" => "You need to authorize the payment with your bank.",
    "cc_rejected_card_disabled" => "Activate your card or use a different one.",
    "cc_rejected_duplicated_payment" => "You already made a payment for this amount.",
    "cc_rejected_high_risk" => "The payment was declined. Use a different card.",
    "cc_rejected_insufficient_amount" => "Insufficient funds.",
    "cc_rejected_max_attempts" => "You reached the attempt limit. Use a different card.",
    "cc_rejected_other_reason" => "Your card did not process the payment.",
    _ => GENERIC_REJECTION,
  }
}
