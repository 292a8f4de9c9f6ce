// Core algorithm exports
pub mod commission;
pub mod geo;
pub mod nearby;
pub mod report;

pub use commission::{is_won, CommissionEngine, DEFAULT_COMMISSION_RATE_BPS};
pub use geo::{bounding_box, haversine_distance_km, is_within_bounding_box, GeoError};
pub use nearby::filter_nearby;
pub use report::{
    distinct_sales_persons, filter_by_sales_person, filter_by_search, total_by_sales_person,
    total_commission,
};
