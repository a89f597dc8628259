mod common;

use hfashion_api::{
    error::AppError,
    models::Category,
    routes::params::{ProductQuery, ProductSort, SearchQuery},
    services::{product_service, seed_service},
};
use rust_decimal_macros::dec;

#[tokio::test]
async fn seed_is_idempotent() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    let first = seed_service::seed(&state.orm, &state.config.demo_user_id).await?;
    assert!(first.seeded);
    assert_eq!(first.products as usize, seed_service::CATALOG_SIZE);

    let second = seed_service::seed(&state.orm, &state.config.demo_user_id).await?;
    assert!(!second.seeded);
    assert_eq!(second.products, first.products);
    Ok(())
}

#[tokio::test]
async fn default_listing_is_newest_first() -> anyhow::Result<()> {
    let state = common::seeded_state().await?;

    let resp = product_service::list_products(&state, ProductQuery::default()).await?;
    let meta = resp.meta.expect("meta");
    assert_eq!(meta.total, Some(seed_service::CATALOG_SIZE as i64));

    let items = resp.data.expect("products").items;
    assert_eq!(items.first().map(|p| p.id.as_str()), Some("prod-001"));
    assert!(items.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    Ok(())
}

#[tokio::test]
async fn listing_filters_by_category_and_flags() -> anyhow::Result<()> {
    let state = common::seeded_state().await?;

    let men = product_service::list_products(
        &state,
        ProductQuery {
            category: Some(Category::Men),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("products")
    .items;
    assert_eq!(men.len(), 4);
    assert!(men.iter().all(|p| p.category == Category::Men));

    let featured_women = product_service::list_products(
        &state,
        ProductQuery {
            category: Some(Category::Women),
            featured: Some(true),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("products")
    .items;
    let ids: Vec<_> = featured_women.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"prod-009"));
    assert!(ids.contains(&"prod-012"));

    let trending = product_service::list_products(
        &state,
        ProductQuery {
            trending: Some(true),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("products")
    .items;
    assert!(!trending.is_empty());
    assert!(trending.iter().all(|p| p.is_trending));

    // A false flag does not filter.
    let unfiltered = product_service::list_products(
        &state,
        ProductQuery {
            featured: Some(false),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(
        unfiltered.meta.expect("meta").total,
        Some(seed_service::CATALOG_SIZE as i64)
    );
    Ok(())
}

#[tokio::test]
async fn listing_sorts_by_price() -> anyhow::Result<()> {
    let state = common::seeded_state().await?;

    let asc = product_service::list_products(
        &state,
        ProductQuery {
            sort: Some(ProductSort::PriceAsc),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("products")
    .items;
    assert!(asc.windows(2).all(|w| w[0].price <= w[1].price));
    assert_eq!(asc.first().map(|p| p.price), Some(dec!(59.00)));

    let desc = product_service::list_products(
        &state,
        ProductQuery {
            sort: Some(ProductSort::PriceDesc),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("products")
    .items;
    assert!(desc.windows(2).all(|w| w[0].price >= w[1].price));
    assert_eq!(desc.first().map(|p| p.id.as_str()), Some("prod-007"));
    Ok(())
}

#[tokio::test]
async fn listing_paginates() -> anyhow::Result<()> {
    let state = common::seeded_state().await?;

    let resp = product_service::list_products(
        &state,
        ProductQuery {
            page: Some(2),
            per_page: Some(5),
            ..Default::default()
        },
    )
    .await?;
    let meta = resp.meta.expect("meta");
    assert_eq!(meta.page, Some(2));
    assert_eq!(meta.per_page, Some(5));
    let items = resp.data.expect("products").items;
    assert_eq!(items.first().map(|p| p.id.as_str()), Some("prod-006"));
    assert_eq!(items.len(), 5);
    Ok(())
}

#[tokio::test]
async fn get_product_returns_details_or_not_found() -> anyhow::Result<()> {
    let state = common::seeded_state().await?;

    let product = product_service::get_product(&state, "prod-001")
        .await?
        .data
        .expect("product");
    assert_eq!(product.name, "Nordic Knit Cardigan");
    assert_eq!(product.price, dec!(129));
    assert_eq!(product.original_price, Some(dec!(159)));
    assert_eq!(product.sizes, vec!["XS", "S", "M", "L", "XL"]);
    assert_eq!(product.category, Category::NewArrivals);

    let missing = product_service::get_product(&state, "invalid-id").await;
    assert!(matches!(missing, Err(AppError::NotFound)));
    Ok(())
}

#[tokio::test]
async fn search_is_case_insensitive_over_name_and_description() -> anyhow::Result<()> {
    let state = common::seeded_state().await?;

    let by_name = product_service::search_products(
        &state,
        SearchQuery {
            q: Some("KNIT".into()),
            limit: None,
        },
    )
    .await?
    .data
    .expect("results")
    .items;
    assert!(by_name.iter().any(|p| p.id == "prod-001"));
    assert!(by_name.iter().any(|p| p.id == "prod-010"));

    let by_description = product_service::search_products(
        &state,
        SearchQuery {
            q: Some("uv protection".into()),
            limit: None,
        },
    )
    .await?
    .data
    .expect("results")
    .items;
    let ids: Vec<_> = by_description.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["prod-015"]);
    Ok(())
}

#[tokio::test]
async fn short_queries_return_nothing() -> anyhow::Result<()> {
    // An empty catalog would hide a storage hit, so seed first.
    let state = common::seeded_state().await?;

    for q in [None, Some(""), Some("a"), Some(" k ")] {
        let resp = product_service::search_products(
            &state,
            SearchQuery {
                q: q.map(str::to_string),
                limit: None,
            },
        )
        .await?;
        assert!(resp.data.expect("results").items.is_empty(), "query {q:?}");
    }
    Ok(())
}

#[tokio::test]
async fn search_respects_limit_and_literal_wildcards() -> anyhow::Result<()> {
    let state = common::seeded_state().await?;

    let limited = product_service::search_products(
        &state,
        SearchQuery {
            q: Some("le".into()),
            limit: Some(2),
        },
    )
    .await?
    .data
    .expect("results")
    .items;
    assert_eq!(limited.len(), 2);

    let wildcard = product_service::search_products(
        &state,
        SearchQuery {
            q: Some("%%".into()),
            limit: None,
        },
    )
    .await?
    .data
    .expect("results")
    .items;
    assert!(wildcard.is_empty());
    Ok(())
}
