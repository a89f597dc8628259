#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};

use chrono::Utc;
use hfashion_api::{
    codes::OrderCodeGenerator,
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::products::ActiveModel as ProductActive,
    middleware::identity::CurrentUser,
    models::ShippingAddress,
    services::seed_service,
    state::AppState,
};
use sea_orm::{ActiveModelTrait, Set};

/// Deterministic order codes: sequential ids and a fixed seven day delivery estimate.
#[derive(Debug, Default)]
pub struct SequentialCodes {
    next: AtomicU32,
}

impl SequentialCodes {
    fn bump(&self) -> u32 {
        self.next.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl OrderCodeGenerator for SequentialCodes {
    fn order_id(&self) -> String {
        format!("order-{:04}", self.bump())
    }

    fn order_number(&self) -> String {
        format!("HF-TEST{:04}", self.bump())
    }

    fn tracking_number(&self) -> String {
        format!("1Z{:09}", self.bump())
    }

    fn delivery_days(&self) -> i64 {
        7
    }
}

/// Fresh in-memory database with the schema applied and nothing else.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let config = AppConfig::in_memory();
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    Ok(AppState::with_codes(
        orm,
        config,
        Arc::new(SequentialCodes::default()),
    ))
}

/// Fresh database with the demo catalog and demo user.
pub async fn seeded_state() -> anyhow::Result<AppState> {
    let state = setup_state().await?;
    seed_service::seed(&state.orm, &state.config.demo_user_id).await?;
    Ok(state)
}

pub fn demo_user(state: &AppState) -> CurrentUser {
    CurrentUser::new(state.config.demo_user_id.clone())
}

pub async fn insert_product(state: &AppState, id: &str, price_cents: i64) -> anyhow::Result<()> {
    ProductActive {
        id: Set(id.to_string()),
        name: Set(format!("Test {id}")),
        description: Set("Product inserted by a test".to_string()),
        price: Set(price_cents),
        original_price: Set(None),
        category: Set("accessories".to_string()),
        image_url: Set(format!("https://example.com/{id}.jpg")),
        sizes: Set("[]".to_string()),
        colors: Set("[]".to_string()),
        stock: Set(5),
        is_featured: Set(false),
        is_trending: Set(false),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(())
}

pub fn address() -> ShippingAddress {
    ShippingAddress {
        first_name: "Demo".into(),
        last_name: "User".into(),
        address: "123 Test Street".into(),
        city: "Test City".into(),
        state: "CA".into(),
        zip_code: "12345".into(),
        phone: "555-0123".into(),
        country: Some("United States".into()),
        email: None,
    }
}
