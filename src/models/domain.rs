use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// A geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

impl Point {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Geospatial bounding box used as a cheap pre-filter before exact
/// distance computation. Derived, never persisted.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// A meetup as stored by the meetup app.
///
/// Coordinates are optional: a meetup whose host never set a venue location
/// has neither, and is simply invisible to the nearby search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meetup {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub venue_name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
}

/// A meetup that passed the exact distance filter, annotated with its
/// distance from the query point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedMeetup {
    pub id: Uuid,
    pub title: String,
    pub category: Option<String>,
    pub venue_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub starts_at: Option<DateTime<Utc>>,
    pub distance_km: f64,
}

/// Error raised when a stored enum column holds an unrecognized value
#[derive(Debug, Clone, Error)]
#[error("unrecognized {kind} value '{value}'")]
pub struct EnumParseError {
    pub kind: &'static str,
    pub value: String,
}

/// Invoice lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Overdue,
    PartialPaid,
    Cancelled,
}

impl FromStr for InvoiceStatus {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "overdue" => Ok(Self::Overdue),
            "partial-paid" => Ok(Self::PartialPaid),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(EnumParseError {
                kind: "invoice status",
                value: other.to_string(),
            }),
        }
    }
}

/// Management side of proposal approval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagementApproval {
    Pending,
    Approved,
    Rejected,
}

impl FromStr for ManagementApproval {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(EnumParseError {
                kind: "management approval",
                value: other.to_string(),
            }),
        }
    }
}

/// Client side of proposal approval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientApproval {
    Pending,
    Approved,
    Rejected,
    RequestChanges,
}

impl FromStr for ClientApproval {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "request_changes" => Ok(Self::RequestChanges),
            other => Err(EnumParseError {
                kind: "client approval",
                value: other.to_string(),
            }),
        }
    }
}

/// An invoice raised against a project.
///
/// `general_conditions` and `supervision_fee` are pass-through costs billed
/// to the client but not commissionable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    pub client_name: String,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub proposal_id: Option<String>,
    pub total_cost: BigDecimal,
    pub general_conditions: BigDecimal,
    pub supervision_fee: BigDecimal,
    pub created_by: String,
    pub created_by_name: String,
    pub invoice_date: NaiveDate,
    /// Semantically the paid date for paid invoices; the legacy schema
    /// stores it under an "approved" name and the mapping is preserved.
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
}

/// A project proposal. Won iff both approvals are `approved`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: String,
    pub number: String,
    pub management_approval: ManagementApproval,
    #[serde(default)]
    pub client_approval: Option<ClientApproval>,
}

/// A derived commission line for one paid invoice.
///
/// Entries exist only for the lifetime of a report; they are recomputed from
/// the invoice and proposal collections on demand and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionEntry {
    pub invoice_id: String,
    pub invoice_number: String,
    pub proposal_id: String,
    pub proposal_number: String,
    pub client_name: String,
    pub sales_person_id: String,
    pub sales_person_name: String,
    pub invoice_total: BigDecimal,
    pub general_conditions: BigDecimal,
    pub supervision_fee: BigDecimal,
    pub base_amount: BigDecimal,
    pub commission_rate: f64,
    pub commission_amount: BigDecimal,
    pub invoice_date: NaiveDate,
    pub paid_date: Option<DateTime<Utc>>,
}

/// A salesperson as seen in the commission report dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesPerson {
    pub id: String,
    pub name: String,
}

/// Salesperson scope for the commission report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SalesPersonFilter {
    All,
    Id(String),
}

impl From<&str> for SalesPersonFilter {
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Id(value.to_string())
        }
    }
}
