use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    codes::{OrderCodeGenerator, RandomCodes},
    config::AppConfig,
    locks::UserLocks,
};

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub locks: Arc<UserLocks>,
    pub codes: Arc<dyn OrderCodeGenerator>,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, config: AppConfig) -> Self {
        Self::with_codes(orm, config, Arc::new(RandomCodes))
    }

    pub fn with_codes(
        orm: DatabaseConnection,
        config: AppConfig,
        codes: Arc<dyn OrderCodeGenerator>,
    ) -> Self {
        Self {
            orm,
            config: Arc::new(config),
            locks: Arc::new(UserLocks::default()),
            codes,
        }
    }
}
