use hfashion_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    services::seed_service,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let report = seed_service::seed(&orm, &config.demo_user_id).await?;
    if report.seeded {
        println!("Seeded {} products, demo user {}", report.products, config.demo_user_id);
    } else {
        println!("Catalog already has {} products, nothing to do", report.products);
    }
    Ok(())
}
