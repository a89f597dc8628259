use rand::{Rng, distributions::Alphanumeric};
use uuid::Uuid;

/// Earliest and latest delivery estimate, in days after checkout.
pub const DELIVERY_DAYS: std::ops::RangeInclusive<i64> = 5..=10;

/// Source of the generated identifiers and estimates attached to a new order.
///
/// Production uses [`RandomCodes`]; tests plug in deterministic implementations.
pub trait OrderCodeGenerator: Send + Sync {
    fn order_id(&self) -> String;

    /// Human-readable reference such as `HF-7K2M9QXA`.
    fn order_number(&self) -> String;

    /// Carrier-style tracking code such as `1Z123456789`.
    fn tracking_number(&self) -> String;

    /// Days until the estimated delivery, within [`DELIVERY_DAYS`].
    fn delivery_days(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodes;

impl OrderCodeGenerator for RandomCodes {
    fn order_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn order_number(&self) -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(|b| char::from(b).to_ascii_uppercase())
            .collect();
        format!("HF-{suffix}")
    }

    fn tracking_number(&self) -> String {
        let digits: u32 = rand::thread_rng().gen_range(100_000_000..1_000_000_000);
        format!("1Z{digits}")
    }

    fn delivery_days(&self) -> i64 {
        rand::thread_rng().gen_range(DELIVERY_DAYS)
    }
}
