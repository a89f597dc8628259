mod common;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use hfashion_api::routes::create_app;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> anyhow::Result<Router> {
    Ok(create_app(common::seeded_state().await?))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json)?)
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body)?).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

fn empty_meta() -> Value {
    json!({ "page": null, "per_page": null, "total": null })
}

fn address() -> Value {
    json!({
        "first_name": "Demo",
        "last_name": "User",
        "address": "123 Test Street",
        "city": "Test City",
        "state": "CA",
        "zip_code": "12345",
        "phone": "555-0123"
    })
}

#[tokio::test]
async fn health_and_root_banner() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, body) = send(&app, Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database"], "up");

    let (status, body) = send(&app, Method::GET, "/api", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "HFashion API");
    Ok(())
}

#[tokio::test]
async fn unknown_routes_and_products_are_404() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, body) = send(&app, Method::GET, "/api/products/prod-001", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"], empty_meta());

    let (status, body) = send(&app, Method::GET, "/api/products/invalid-id", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["error"], "Not Found");

    let (status, _) = send(&app, Method::GET, "/api/nowhere", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn catalog_query_parameters_are_parsed() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/products?category=men&featured=true&sort=price_desc&page=1&per_page=10",
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().expect("product array");
    let ids: Vec<_> = items.iter().map(|p| p["id"].as_str().unwrap_or_default()).collect();
    assert_eq!(ids, vec!["prod-007", "prod-005"]);
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["meta"]["per_page"], 10);

    let (status, body) = send(&app, Method::GET, "/api/products/search?q=Leather", None).await?;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["data"]
        .as_array()
        .expect("result array")
        .iter()
        .map(|p| p["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert!(!names.is_empty());
    assert!(names.iter().all(|n| n.contains("Leather")));

    let (status, body) = send(&app, Method::GET, "/api/products/search?q=a", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn out_of_range_pages_return_empty_lists() -> anyhow::Result<()> {
    let app = app().await?;

    for uri in [
        format!("/api/products?page={}", i64::MAX),
        format!("/api/products?page={}&per_page=100", i64::MAX),
        format!("/api/orders?page={}", i64::MAX),
    ] {
        let (status, body) = send(&app, Method::GET, &uri, None).await?;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["data"], json!([]), "{uri}");
    }
    Ok(())
}

#[tokio::test]
async fn cart_round_trip_over_http() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, body) = send(&app, Method::GET, "/api/cart", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"], json!([]));
    assert_eq!(body["meta"], empty_meta());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/cart/add",
        Some(json!({ "product_id": "prod-001", "size": "M", "color": "Brown" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["quantity"], 1);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/cart/item/prod-001",
        Some(json!({ "quantity": 3 })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["quantity"], 3);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/cart/item/prod-002",
        Some(json!({ "quantity": 3 })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, "/api/cart/item/prod-001", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"], json!([]));

    let (status, _) = send(&app, Method::DELETE, "/api/cart/item/prod-001", None).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::DELETE, "/api/cart", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"], json!([]));
    Ok(())
}

#[tokio::test]
async fn invalid_cart_input_maps_to_client_errors() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/cart/add",
        Some(json!({ "product_id": "prod-001", "quantity": 0 })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/cart/add",
        Some(json!({ "product_id": "missing" })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn checkout_over_http() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({ "shipping_address": address() })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap_or_default().contains("cart is empty"));

    send(
        &app,
        Method::POST,
        "/api/cart/add",
        Some(json!({ "product_id": "prod-014", "quantity": 1 })),
    )
    .await?;

    let mut incomplete = address();
    incomplete["phone"] = json!("");
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({ "shipping_address": incomplete })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({ "shipping_address": address() })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order placed");
    assert_eq!(body["data"]["status"], "confirmed");
    let order_id = body["data"]["id"].as_str().expect("order id").to_string();

    let (status, body) = send(&app, Method::GET, &format!("/api/orders/{order_id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], order_id.as_str());

    let (status, body) = send(&app, Method::GET, "/api/orders?status=confirmed", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/orders/{order_id}/status"),
        Some(json!({})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "processing");

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/orders/{order_id}/status"),
        Some(json!({ "status": "pending" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/orders/order-9999", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn user_profile_over_http() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, body) = send(&app, Method::GET, "/api/user", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Demo User");
    assert_eq!(body["meta"], empty_meta());
    assert_eq!(body["data"]["email"], "demo@hfashion.com");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/user?name=Jane%20Doe&email=jane%40example.com",
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Jane Doe");
    assert_eq!(body["data"]["email"], "jane@example.com");

    let (status, _) = send(&app, Method::PUT, "/api/user?email=not-an-email", None).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, Method::PUT, "/api/user", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/api/user", None).await?;
    assert_eq!(body["data"]["name"], "Jane Doe");
    Ok(())
}

#[tokio::test]
async fn wishlist_over_http() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, _) = send(&app, Method::POST, "/api/wishlist/prod-003", None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::POST, "/api/wishlist/prod-003", None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::POST, "/api/wishlist/prod-011", None).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, "/api/wishlist", None).await?;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = body["data"]
        .as_array()
        .expect("wishlist array")
        .iter()
        .map(|entry| entry["product"]["id"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(ids, vec!["prod-003", "prod-011"]);

    let (status, _) = send(&app, Method::POST, "/api/wishlist/missing", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/wishlist/prod-003", None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::DELETE, "/api/wishlist/prod-003", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn seeding_twice_reports_existing_catalog() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, body) = send(&app, Method::POST, "/api/seed", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Database already seeded");
    assert_eq!(body["data"]["seeded"], false);
    assert_eq!(body["data"]["products"], 18);
    Ok(())
}
