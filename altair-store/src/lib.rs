pub mod app_config;
pub mod availability;
pub mod catalog_repo;
pub mod checkin;
pub mod database;
pub mod purchase;

mod error;
mod rows;

pub use availability::PostgresAvailabilityRepository;
pub use catalog_repo::PostgresCatalogRepository;
pub use checkin::CheckinEngine;
pub use database::DbClient;
pub use purchase::PurchaseEngine;
