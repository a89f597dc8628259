use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};
use validator::Validate;

use crate::{
    dto::user::UpdateUserQuery,
    entity::users::{ActiveModel as UserActive, Column, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    middleware::identity::CurrentUser,
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const DEMO_USER_NAME: &str = "Demo User";
pub const DEMO_USER_EMAIL: &str = "demo@hfashion.com";
pub const DEMO_USER_AVATAR: &str =
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100";

pub async fn get_user(state: &AppState, user: &CurrentUser) -> AppResult<ApiResponse<User>> {
    let model = ensure_user(&state.orm, &user.user_id).await?;
    Ok(ApiResponse::success(
        "User",
        user_from_entity(model),
        Some(Meta::empty()),
    ))
}

pub async fn update_user(
    state: &AppState,
    user: &CurrentUser,
    query: UpdateUserQuery,
) -> AppResult<ApiResponse<User>> {
    query.validate()?;
    if query.name.is_none() && query.email.is_none() {
        return Err(AppError::BadRequest("name or email is required".into()));
    }

    let _guard = state.locks.acquire(&user.user_id).await;
    let existing = ensure_user(&state.orm, &user.user_id).await?;
    let mut active: UserActive = existing.into();
    if let Some(name) = query.name {
        active.name = Set(name);
    }
    if let Some(email) = query.email {
        active.email = Set(email);
    }
    let model = active.update(&state.orm).await?;

    tracing::info!(user_id = %model.id, "user profile updated");
    Ok(ApiResponse::success(
        "Updated",
        user_from_entity(model),
        Some(Meta::empty()),
    ))
}

/// Returns the user row, inserting the demo profile on first access.
///
/// Concurrent first accesses are safe: a row inserted by another request wins and is returned.
pub(crate) async fn ensure_user<C: ConnectionTrait>(db: &C, user_id: &str) -> AppResult<UserModel> {
    if let Some(model) = Users::find_by_id(user_id.to_owned()).one(db).await? {
        return Ok(model);
    }

    let profile = UserActive {
        id: Set(user_id.to_owned()),
        name: Set(DEMO_USER_NAME.to_string()),
        email: Set(DEMO_USER_EMAIL.to_string()),
        avatar: Set(Some(DEMO_USER_AVATAR.to_string())),
        created_at: Set(Utc::now().into()),
    };
    let inserted = Users::insert(profile)
        .on_conflict(OnConflict::column(Column::Id).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    if inserted > 0 {
        tracing::debug!(user_id = %user_id, "demo user created");
    }

    Users::find_by_id(user_id.to_owned())
        .one(db)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("user {user_id} missing after insert")))
}

fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        avatar: model.avatar,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
