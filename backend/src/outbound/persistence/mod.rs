//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations are thin: they translate between Diesel row
//! structs and domain types and map driver errors to port errors. Row
//! structs (`models.rs`) and table definitions (`schema.rs`) are internal to
//! this module. Connections come from a `bb8` pool with native async support
//! through `diesel-async`.

mod diesel_item_repository;
mod diesel_point_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_item_repository::DieselItemRepository;
pub use diesel_point_repository::DieselPointRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
