// Service exports
pub mod cache;
pub mod postgres;

pub use cache::{CacheError, CacheKey, ReportCache};
pub use postgres::{ReportStore, StoreError};
