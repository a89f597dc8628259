use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price in cents.
    pub price: i64,
    pub original_price: Option<i64>,
    pub category: String,
    pub image_url: String,
    /// JSON array of size labels.
    #[sea_orm(column_type = "Text")]
    pub sizes: String,
    /// JSON array of color labels.
    #[sea_orm(column_type = "Text")]
    pub colors: String,
    pub stock: i32,
    pub is_featured: bool,
    pub is_trending: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::wishlist_items::Entity")]
    WishlistItems,
}

impl Related<super::wishlist_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WishlistItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
