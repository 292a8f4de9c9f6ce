use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to find meetups near a point
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyMeetupsRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 0.1, max = 500.0))]
    #[serde(default = "default_radius_km", rename = "radiusKm")]
    pub radius_km: f64,
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_radius_km() -> f64 {
    25.0
}

fn default_limit() -> u16 {
    50
}

/// Query parameters for the commission report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionReportRequest {
    /// Either a salesperson id or the literal "all"
    #[serde(default = "default_sales_person", rename = "salesPersonId")]
    pub sales_person_id: String,
    /// Free-text search over invoice number, client, salesperson and
    /// proposal number; blank means no filtering
    #[serde(default)]
    pub search: String,
}

fn default_sales_person() -> String {
    "all".to_string()
}
