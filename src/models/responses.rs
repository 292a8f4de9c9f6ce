use crate::models::domain::{CommissionEntry, RankedMeetup, SalesPerson};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Response for the nearby meetups endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyMeetupsResponse {
    pub meetups: Vec<RankedMeetup>,
    /// How many meetups the bounding-box query produced before the exact
    /// distance pass
    pub total_candidates: usize,
}

/// Response for the commission report endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionReportResponse {
    pub entries: Vec<CommissionEntry>,
    pub total_commission: BigDecimal,
    /// Every salesperson with at least one commission entry, regardless of
    /// the active filters; drives the report's dropdown
    pub sales_persons: Vec<SalesPerson>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
