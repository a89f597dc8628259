use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::user::UpdateUserQuery,
    error::AppResult,
    middleware::identity::CurrentUser,
    models::User,
    response::ApiResponse,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_user).put(update_user))
}

#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Demo user profile", body = ApiResponse<User>)
    ),
    tag = "User"
)]
pub async fn get_user(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::get_user(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/user",
    params(UpdateUserQuery),
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<User>),
        (status = 400, description = "Neither name nor email given"),
        (status = 422, description = "Invalid name or email"),
    ),
    tag = "User"
)]
pub async fn update_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<UpdateUserQuery>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::update_user(&state, &user, query).await?;
    Ok(Json(resp))
}
