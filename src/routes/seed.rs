use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::seed::SeedReport,
    error::AppResult,
    response::ApiResponse,
    services::seed_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(seed_database))
}

#[utoipa::path(
    post,
    path = "/api/seed",
    responses(
        (status = 200, description = "Seed catalog and demo user; no-op when already seeded", body = ApiResponse<SeedReport>)
    ),
    tag = "Seed"
)]
pub async fn seed_database(State(state): State<AppState>) -> AppResult<Json<ApiResponse<SeedReport>>> {
    let resp = seed_service::seed_database(&state).await?;
    Ok(Json(resp))
}
