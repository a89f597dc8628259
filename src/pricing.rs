//! Money arithmetic for carts and orders.
//!
//! Amounts are `Decimal` everywhere in the domain and stored as integer cents.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::CartLine;

/// Flat shipping fee charged below [`FREE_SHIPPING_THRESHOLD`].
pub const FLAT_SHIPPING_FEE: Decimal = Decimal::from_parts(999, 0, 0, false, 2);
/// Subtotals at or above this amount ship for free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(100, 0, 0, false, 0);
/// Sales tax rate applied to the subtotal.
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Round half away from zero to cents.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Sum of `price * quantity` over all lines, rounded to cents. Empty carts total zero.
pub fn cart_total(lines: &[CartLine]) -> Decimal {
    let sum: Decimal = lines
        .iter()
        .map(|line| line.price * Decimal::from(line.quantity))
        .sum();
    round_money(sum)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderTotals {
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let shipping = if subtotal < FREE_SHIPPING_THRESHOLD {
            FLAT_SHIPPING_FEE
        } else {
            Decimal::ZERO
        };
        let tax = round_money(subtotal * TAX_RATE);
        let total = round_money(subtotal + shipping + tax);
        Self {
            subtotal,
            shipping,
            tax,
            total,
        }
    }
}

pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Converts an amount to integer cents, `None` if it does not fit an `i64`.
pub fn to_cents(amount: Decimal) -> Option<i64> {
    (round_money(amount) * Decimal::ONE_HUNDRED).to_i64()
}
