use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::{
    dto::products::ProductList,
    entity::products::{Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    models::{Category, Product},
    pricing::from_cents,
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSort, SearchQuery},
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(category) = query.category {
        condition = condition.add(Column::Category.eq(category.as_ref()));
    }
    if query.featured == Some(true) {
        condition = condition.add(Column::IsFeatured.eq(true));
    }
    if query.trending == Some(true) {
        condition = condition.add(Column::IsTrending.eq(true));
    }

    let mut finder = Products::find().filter(condition);
    finder = match query.sort.unwrap_or_default() {
        ProductSort::PriceAsc => finder.order_by_asc(Column::Price),
        ProductSort::PriceDesc => finder.order_by_desc(Column::Price),
        ProductSort::Newest => finder.order_by_desc(Column::CreatedAt),
    };
    // Stable order for equal prices or timestamps.
    finder = finder.order_by_asc(Column::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: &str) -> AppResult<ApiResponse<Product>> {
    let product = find_product(&state.orm, id).await?.ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", product, Some(Meta::empty())))
}

/// Case-insensitive substring search over name and description.
///
/// Queries shorter than [`SearchQuery::MIN_LEN`] characters return nothing without a lookup.
pub async fn search_products(
    state: &AppState,
    query: SearchQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let limit = query.normalized_limit();
    let needle = query.q.as_deref().map(str::trim).unwrap_or_default();
    if needle.chars().count() < SearchQuery::MIN_LEN {
        return Ok(ApiResponse::success(
            "Search results",
            ProductList { items: Vec::new() },
            Some(Meta::unpaged(0)),
        ));
    }

    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    let condition = Condition::any()
        .add(
            Expr::expr(Func::lower(Expr::col(Column::Name)))
                .like(LikeExpr::new(pattern.clone()).escape('\\')),
        )
        .add(
            Expr::expr(Func::lower(Expr::col(Column::Description)))
                .like(LikeExpr::new(pattern).escape('\\')),
        );

    let items = Products::find()
        .filter(condition)
        .order_by_asc(Column::Name)
        .limit(limit)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let total = items.len() as i64;
    tracing::debug!(query = %needle, hits = total, "product search");
    Ok(ApiResponse::success(
        "Search results",
        ProductList { items },
        Some(Meta::unpaged(total)),
    ))
}

pub(crate) async fn find_product<C: ConnectionTrait>(
    db: &C,
    id: &str,
) -> AppResult<Option<Product>> {
    Products::find_by_id(id.to_owned())
        .one(db)
        .await?
        .map(product_from_entity)
        .transpose()
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub(crate) fn product_from_entity(model: ProductModel) -> AppResult<Product> {
    let category = model.category.parse::<Category>().map_err(|_| {
        AppError::Internal(anyhow::anyhow!(
            "product {} has unknown category {}",
            model.id,
            model.category
        ))
    })?;
    Ok(Product {
        id: model.id,
        name: model.name,
        description: model.description,
        price: from_cents(model.price),
        original_price: model.original_price.map(from_cents),
        category,
        image_url: model.image_url,
        sizes: serde_json::from_str(&model.sizes)?,
        colors: serde_json::from_str(&model.colors)?,
        stock: model.stock,
        is_featured: model.is_featured,
        is_trending: model.is_trending,
        created_at: model.created_at.with_timezone(&Utc),
    })
}
