use rust_decimal::Decimal;

use crate::{error::{AppError, AppResult}, pricing};

pub mod cart_service;
pub mod order_service;
pub mod product_service;
pub mod seed_service;
pub mod user_service;
pub mod wishlist_service;

pub(crate) fn money_to_cents(amount: Decimal) -> AppResult<i64> {
    pricing::to_cents(amount)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("amount {amount} out of range")))
}
