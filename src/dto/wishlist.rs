use serde::Serialize;
use utoipa::ToSchema;

use crate::models::WishlistItem;

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Wishlist {
    #[schema(value_type = Vec<WishlistItem>)]
    pub items: Vec<WishlistItem>,
}
