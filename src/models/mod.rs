// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, ClientApproval, CommissionEntry, EnumParseError, Invoice, InvoiceStatus,
    ManagementApproval, Meetup, Point, Proposal, RankedMeetup, SalesPerson, SalesPersonFilter,
};
pub use requests::{CommissionReportRequest, NearbyMeetupsRequest};
pub use responses::{CommissionReportResponse, ErrorResponse, HealthResponse, NearbyMeetupsResponse};
