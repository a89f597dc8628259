use chrono::{Duration, Utc};
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use validator::Validate;

use crate::{
    codes::DELIVERY_DAYS,
    dto::orders::{CheckoutRequest, OrderList, UpdateOrderStatusRequest},
    entity::orders::{
        ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel,
    },
    error::{AppError, AppResult},
    middleware::identity::CurrentUser,
    models::{Order, OrderStatus},
    pricing::{OrderTotals, from_cents},
    response::{ApiResponse, Meta},
    routes::params::OrderListQuery,
    services::{
        cart_service::{load_cart_for_update, store_cart},
        money_to_cents,
    },
    state::AppState,
};

pub async fn list_orders(
    state: &AppState,
    user: &CurrentUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all().add(OrderCol::UserId.eq(user.user_id.as_str()));
    if let Some(status) = query.status {
        condition = condition.add(OrderCol::Status.eq(status.as_ref()));
    }

    let finder = Orders::find()
        .filter(condition)
        .order_by_desc(OrderCol::CreatedAt)
        .order_by_desc(OrderCol::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Ok",
        OrderList { items: orders },
        Some(meta),
    ))
}

/// Turns the user's cart into a confirmed order and empties the cart.
///
/// The order insert and the cart reset commit in one transaction, so no reader sees one without
/// the other.
pub async fn checkout(
    state: &AppState,
    user: &CurrentUser,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<Order>> {
    let shipping_address = payload.shipping_address.normalized();
    shipping_address.validate()?;

    let _guard = state.locks.acquire(&user.user_id).await;
    let txn = state.orm.begin().await?;

    let mut cart = load_cart_for_update(&txn, &user.user_id).await?;
    if cart.is_empty() {
        return Err(AppError::InvalidState("cart is empty".into()));
    }

    let totals = OrderTotals::from_subtotal(cart.total);
    let delivery_days = state
        .codes
        .delivery_days()
        .clamp(*DELIVERY_DAYS.start(), *DELIVERY_DAYS.end());
    let now = Utc::now();

    let order = Order {
        id: state.codes.order_id(),
        order_number: state.codes.order_number(),
        user_id: user.user_id.clone(),
        items: cart.items.clone(),
        subtotal: totals.subtotal,
        shipping: totals.shipping,
        tax: totals.tax,
        total: totals.total,
        status: OrderStatus::Confirmed,
        shipping_address,
        tracking_number: state.codes.tracking_number(),
        estimated_delivery: (now + Duration::days(delivery_days)).date_naive(),
        created_at: now,
        updated_at: now,
    };

    OrderActive {
        id: Set(order.id.clone()),
        order_number: Set(order.order_number.clone()),
        user_id: Set(order.user_id.clone()),
        items: Set(serde_json::to_string(&order.items)?),
        subtotal: Set(money_to_cents(order.subtotal)?),
        shipping: Set(money_to_cents(order.shipping)?),
        tax: Set(money_to_cents(order.tax)?),
        total: Set(money_to_cents(order.total)?),
        status: Set(order.status.to_string()),
        shipping_address: Set(serde_json::to_string(&order.shipping_address)?),
        tracking_number: Set(order.tracking_number.clone()),
        estimated_delivery: Set(order.estimated_delivery),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&txn)
    .await?;

    cart.clear();
    store_cart(&txn, &cart).await?;

    txn.commit().await?;

    tracing::info!(
        user_id = %user.user_id,
        order_id = %order.id,
        order_number = %order.order_number,
        total = %order.total,
        "order placed"
    );

    Ok(ApiResponse::success(
        "Order placed",
        order,
        Some(Meta::empty()),
    ))
}

pub async fn get_order(
    state: &AppState,
    user: &CurrentUser,
    id: &str,
) -> AppResult<ApiResponse<Order>> {
    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(user.user_id.as_str()))
                .add(OrderCol::Id.eq(id)),
        )
        .one(&state.orm)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::success(
        "OK",
        order_from_entity(order)?,
        Some(Meta::empty()),
    ))
}

/// Moves an order forward. Without an explicit target it advances one step.
pub async fn update_order_status(
    state: &AppState,
    user: &CurrentUser,
    id: &str,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let txn = state.orm.begin().await?;

    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(user.user_id.as_str()))
                .add(OrderCol::Id.eq(id)),
        )
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let current = parse_status(&order.status)?;
    let target = match payload.status.or_else(|| current.next()) {
        Some(target) => target,
        None => {
            return Err(AppError::InvalidState(format!(
                "order is already {current}"
            )));
        }
    };
    if !current.can_advance_to(target) {
        return Err(AppError::InvalidState(format!(
            "cannot move order from {current} to {target}"
        )));
    }

    let mut active: OrderActive = order.into();
    active.status = Set(target.to_string());
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        from = %current,
        to = %target,
        "order status updated"
    );

    Ok(ApiResponse::success(
        "Status updated",
        order_from_entity(order)?,
        Some(Meta::empty()),
    ))
}

fn parse_status(raw: &str) -> AppResult<OrderStatus> {
    raw.parse::<OrderStatus>()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("unknown order status {raw}")))
}

fn order_from_entity(model: OrderModel) -> AppResult<Order> {
    Ok(Order {
        status: parse_status(&model.status)?,
        items: serde_json::from_str(&model.items)?,
        shipping_address: serde_json::from_str(&model.shipping_address)?,
        id: model.id,
        order_number: model.order_number,
        user_id: model.user_id,
        subtotal: from_cents(model.subtotal),
        shipping: from_cents(model.shipping),
        tax: from_cents(model.tax),
        total: from_cents(model.total),
        tracking_number: model.tracking_number,
        estimated_delivery: model.estimated_delivery,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
