use altair_core::repository::{AvailabilityRepository, CatalogRepository};
use altair_store::{
    CheckinEngine, PostgresAvailabilityRepository, PostgresCatalogRepository, PurchaseEngine,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogRepository>,
    pub availability: Arc<dyn AvailabilityRepository>,
    pub purchase: Arc<PurchaseEngine>,
    pub checkin: Arc<CheckinEngine>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            catalog: Arc::new(PostgresCatalogRepository::new(pool.clone())),
            availability: Arc::new(PostgresAvailabilityRepository::new(pool.clone())),
            purchase: Arc::new(PurchaseEngine::new(pool.clone())),
            checkin: Arc::new(CheckinEngine::new(pool)),
        }
    }
}
