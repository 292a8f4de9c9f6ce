//! Atlas Reports - Geosearch and commission reporting service for the Atlas field apps
//!
//! This library provides the two report cores used by the Atlas apps: the
//! nearby-meetup geospatial filter (bounding-box pre-filter plus exact
//! haversine pass) and the sales commission engine (paid invoices joined
//! against won proposals). Both cores are pure functions over in-memory
//! data; the HTTP, storage and cache layers live around them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    bounding_box, filter_nearby, haversine_distance_km, is_won, CommissionEngine, GeoError,
};
pub use crate::models::{
    CommissionEntry, Invoice, InvoiceStatus, Meetup, Point, Proposal, RankedMeetup,
    SalesPersonFilter,
};
