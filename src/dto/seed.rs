use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SeedReport {
    /// False when the catalog was already populated and nothing was written.
    pub seeded: bool,
    pub products: u64,
}
