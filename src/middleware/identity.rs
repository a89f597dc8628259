use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{error::AppError, state::AppState};

/// The identity a request acts for.
///
/// There is no authentication: every request is attributed to the configured demo user. Carts,
/// orders and wishlists are still keyed by this id so a real identity source can slot in here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: String,
}

impl CurrentUser {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser::new(state.config.demo_user_id.clone()))
    }
}
