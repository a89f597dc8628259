use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    dto::wishlist::Wishlist,
    entity::{
        products::Entity as Products,
        wishlist_items::{ActiveModel as WishlistActive, Column, Entity as WishlistItems},
    },
    error::{AppError, AppResult},
    middleware::identity::CurrentUser,
    models::WishlistItem,
    response::{ApiResponse, Meta},
    services::product_service::{find_product, product_from_entity},
    state::AppState,
};

pub async fn list_wishlist(
    state: &AppState,
    user: &CurrentUser,
) -> AppResult<ApiResponse<Wishlist>> {
    let rows = WishlistItems::find()
        .filter(Column::UserId.eq(user.user_id.as_str()))
        .find_also_related(Products)
        .order_by_asc(Column::AddedAt)
        .all(&state.orm)
        .await?;

    let mut items = Vec::with_capacity(rows.len());
    for (entry, product) in rows {
        // Entries whose product vanished from the catalog are skipped.
        if let Some(product) = product {
            items.push(WishlistItem {
                product: product_from_entity(product)?,
                added_at: entry.added_at.with_timezone(&Utc),
            });
        }
    }

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "OK",
        Wishlist { items },
        Some(Meta::unpaged(total)),
    ))
}

/// Saves a product to the wishlist. Saving it twice keeps the original entry.
pub async fn add_to_wishlist(
    state: &AppState,
    user: &CurrentUser,
    product_id: &str,
) -> AppResult<ApiResponse<WishlistItem>> {
    let product = find_product(&state.orm, product_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let _guard = state.locks.acquire(&user.user_id).await;
    let existing = WishlistItems::find_by_id((user.user_id.clone(), product.id.clone()))
        .one(&state.orm)
        .await?;

    let entry = match existing {
        Some(entry) => entry,
        None => {
            WishlistActive {
                user_id: Set(user.user_id.clone()),
                product_id: Set(product.id.clone()),
                added_at: Set(Utc::now().into()),
            }
            .insert(&state.orm)
            .await?
        }
    };

    tracing::info!(user_id = %user.user_id, product_id = %product.id, "wishlist item saved");
    Ok(ApiResponse::success(
        "Added to wishlist",
        WishlistItem {
            product,
            added_at: entry.added_at.with_timezone(&Utc),
        },
        Some(Meta::empty()),
    ))
}

pub async fn remove_from_wishlist(
    state: &AppState,
    user: &CurrentUser,
    product_id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let _guard = state.locks.acquire(&user.user_id).await;
    let result = WishlistItems::delete_many()
        .filter(
            Condition::all()
                .add(Column::UserId.eq(user.user_id.as_str()))
                .add(Column::ProductId.eq(product_id)),
        )
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(user_id = %user.user_id, product_id = %product_id, "wishlist item removed");
    Ok(ApiResponse::success(
        "Removed from wishlist",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
