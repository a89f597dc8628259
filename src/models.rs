use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

use crate::pricing;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Category {
    Women,
    Men,
    Accessories,
    NewArrivals,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub category: Category,
    pub image_url: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub stock: i32,
    pub is_featured: bool,
    pub is_trending: bool,
    pub created_at: DateTime<Utc>,
}

/// One entry of a cart or order. Name, price and image are copied from the product when the line
/// is created, so later catalog changes do not touch existing carts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub image_url: String,
    pub quantity: i32,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl CartLine {
    fn is_variant(&self, product_id: &str, size: Option<&str>, color: Option<&str>) -> bool {
        self.product_id == product_id
            && self.size.as_deref() == size
            && self.color.as_deref() == color
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    pub user_id: String,
    pub items: Vec<CartLine>,
    pub total: Decimal,
    pub updated_at: DateTime<Utc>,
}

/// Largest quantity a single cart line may hold.
pub const MAX_LINE_QUANTITY: i32 = 9_999;

/// Outcome of [`Cart::update_quantity`] when no line matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineNotFound;

/// Outcome of [`Cart::add_line`] when the merged line would exceed [`MAX_LINE_QUANTITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityLimitExceeded;

impl Cart {
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            items: Vec::new(),
            total: Decimal::ZERO,
            updated_at: Utc::now(),
        }
    }

    /// Merges into the line with the same product and variant, or appends a new line.
    ///
    /// The cart is untouched when the resulting quantity would exceed [`MAX_LINE_QUANTITY`].
    pub fn add_line(
        &mut self,
        product: &Product,
        quantity: i32,
        size: Option<String>,
        color: Option<String>,
    ) -> Result<(), QuantityLimitExceeded> {
        let existing = self
            .items
            .iter_mut()
            .find(|line| line.is_variant(&product.id, size.as_deref(), color.as_deref()));

        match existing {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(quantity)
                    .filter(|merged| *merged <= MAX_LINE_QUANTITY)
                    .ok_or(QuantityLimitExceeded)?;
            }
            None if quantity > MAX_LINE_QUANTITY => return Err(QuantityLimitExceeded),
            None => self.items.push(CartLine {
                product_id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                image_url: product.image_url.clone(),
                quantity,
                size,
                color,
            }),
        }
        self.touch();
        Ok(())
    }

    /// Sets the quantity of the first line for `product_id`; zero or less drops that line.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i32) -> Result<(), LineNotFound> {
        let index = self
            .items
            .iter()
            .position(|line| line.product_id == product_id)
            .ok_or(LineNotFound)?;

        if quantity <= 0 {
            self.items.remove(index);
        } else if let Some(line) = self.items.get_mut(index) {
            line.quantity = quantity;
        }
        self.touch();
        Ok(())
    }

    /// Drops every line for `product_id`. Removing an absent product is a no-op.
    pub fn remove_product(&mut self, product_id: &str) {
        self.items.retain(|line| line.product_id != product_id);
        self.touch();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn touch(&mut self) {
        self.total = pricing::cart_total(&self.items);
        self.updated_at = Utc::now();
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Statuses only move forward; jumping ahead several steps is allowed.
    pub fn can_advance_to(self, next: OrderStatus) -> bool {
        next > self
    }

    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Processing),
            OrderStatus::Processing => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct ShippingAddress {
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "state is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "zip_code is required"))]
    pub zip_code: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
}

impl ShippingAddress {
    /// Trims every required field so whitespace-only values fail validation.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.address,
            &mut self.city,
            &mut self.state,
            &mut self.zip_code,
            &mut self.phone,
        ] {
            *field = field.trim().to_string();
        }
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub user_id: String,
    pub items: Vec<CartLine>,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    pub tracking_number: String,
    pub estimated_delivery: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WishlistItem {
    pub product: Product,
    pub added_at: DateTime<Utc>,
}
