use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QuerySelect, Set};
use sea_orm::sea_query::LockType;
use validator::Validate;

use crate::{
    dto::cart::AddToCartRequest,
    entity::carts::{ActiveModel as CartActive, Entity as Carts, Model as CartModel},
    error::{AppError, AppResult},
    middleware::identity::CurrentUser,
    models::{Cart, MAX_LINE_QUANTITY},
    pricing::from_cents,
    response::{ApiResponse, Meta},
    services::{money_to_cents, product_service::find_product},
    state::AppState,
};

pub async fn get_cart(state: &AppState, user: &CurrentUser) -> AppResult<ApiResponse<Cart>> {
    let _guard = state.locks.acquire(&user.user_id).await;
    let cart = load_cart(&state.orm, &user.user_id).await?;
    Ok(ApiResponse::success("Cart", cart, Some(Meta::empty())))
}

pub async fn add_item(
    state: &AppState,
    user: &CurrentUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<Cart>> {
    payload.validate()?;

    let product = find_product(&state.orm, &payload.product_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let _guard = state.locks.acquire(&user.user_id).await;
    let mut cart = load_cart(&state.orm, &user.user_id).await?;
    cart.add_line(&product, payload.quantity, payload.size, payload.color)
        .map_err(|_| quantity_limit_error())?;
    store_cart(&state.orm, &cart).await?;

    tracing::info!(
        user_id = %user.user_id,
        product_id = %product.id,
        quantity = payload.quantity,
        total = %cart.total,
        "cart item added"
    );
    Ok(ApiResponse::success("Added to cart", cart, Some(Meta::empty())))
}

pub async fn update_item(
    state: &AppState,
    user: &CurrentUser,
    product_id: &str,
    quantity: i32,
) -> AppResult<ApiResponse<Cart>> {
    if quantity > MAX_LINE_QUANTITY {
        return Err(quantity_limit_error());
    }

    let _guard = state.locks.acquire(&user.user_id).await;
    let mut cart = load_cart(&state.orm, &user.user_id).await?;
    cart.update_quantity(product_id, quantity)
        .map_err(|_| AppError::NotFound)?;
    store_cart(&state.orm, &cart).await?;

    tracing::info!(
        user_id = %user.user_id,
        product_id = %product_id,
        quantity,
        total = %cart.total,
        "cart item updated"
    );
    Ok(ApiResponse::success("Cart updated", cart, Some(Meta::empty())))
}

/// Removes every line for the product. Succeeds when the product is not in the cart.
pub async fn remove_item(
    state: &AppState,
    user: &CurrentUser,
    product_id: &str,
) -> AppResult<ApiResponse<Cart>> {
    let _guard = state.locks.acquire(&user.user_id).await;
    let mut cart = load_cart(&state.orm, &user.user_id).await?;
    let before = cart.items.len();
    cart.remove_product(product_id);
    if cart.items.len() != before {
        store_cart(&state.orm, &cart).await?;
        tracing::info!(user_id = %user.user_id, product_id = %product_id, "cart item removed");
    }
    Ok(ApiResponse::success("Removed from cart", cart, Some(Meta::empty())))
}

pub async fn clear_cart(state: &AppState, user: &CurrentUser) -> AppResult<ApiResponse<Cart>> {
    let _guard = state.locks.acquire(&user.user_id).await;
    let mut cart = load_cart(&state.orm, &user.user_id).await?;
    cart.clear();
    store_cart(&state.orm, &cart).await?;
    tracing::info!(user_id = %user.user_id, "cart cleared");
    Ok(ApiResponse::success("Cart cleared", cart, Some(Meta::empty())))
}

/// Loads the user's cart, creating an empty one on first access.
///
/// Callers must hold the user's lock.
pub(crate) async fn load_cart<C: ConnectionTrait>(db: &C, user_id: &str) -> AppResult<Cart> {
    if let Some(model) = Carts::find_by_id(user_id.to_owned()).one(db).await? {
        return cart_from_entity(model);
    }

    let cart = Cart::empty(user_id);
    CartActive {
        user_id: Set(cart.user_id.clone()),
        items: Set("[]".to_string()),
        total: Set(0),
        updated_at: Set(cart.updated_at.into()),
    }
    .insert(db)
    .await?;
    tracing::debug!(user_id = %user_id, "cart created");
    Ok(cart)
}

/// Same as [`load_cart`] but takes a row lock on backends that support one.
pub(crate) async fn load_cart_for_update<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
) -> AppResult<Cart> {
    match Carts::find_by_id(user_id.to_owned())
        .lock(LockType::Update)
        .one(db)
        .await?
    {
        Some(model) => cart_from_entity(model),
        None => Ok(Cart::empty(user_id)),
    }
}

/// Whole-document write of the cart row.
pub(crate) async fn store_cart<C: ConnectionTrait>(db: &C, cart: &Cart) -> AppResult<()> {
    CartActive {
        user_id: Set(cart.user_id.clone()),
        items: Set(serde_json::to_string(&cart.items)?),
        total: Set(money_to_cents(cart.total)?),
        updated_at: Set(cart.updated_at.into()),
    }
    .update(db)
    .await?;
    Ok(())
}

fn quantity_limit_error() -> AppError {
    AppError::Validation(format!(
        "quantity per line must not exceed {MAX_LINE_QUANTITY}"
    ))
}

fn cart_from_entity(model: CartModel) -> AppResult<Cart> {
    Ok(Cart {
        user_id: model.user_id,
        items: serde_json::from_str(&model.items)?,
        total: from_cents(model.total),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
