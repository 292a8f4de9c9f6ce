use crate::models::{BoundingBox, EnumParseError, Invoice, Meetup, Proposal};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when reading report data from PostgreSQL
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("invalid value in column '{column}': {source}")]
    InvalidColumn {
        column: &'static str,
        source: EnumParseError,
    },
}

/// Read-only repository over the invoices, proposals and meetups tables.
///
/// The pure report cores never touch the database; this store fetches the
/// collections they operate on, including the bounding-box range query that
/// pre-filters meetups before the exact distance pass.
pub struct ReportStore {
    pool: PgPool,
}

impl ReportStore {
    /// Create a store from a connection string and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Fetch meetups whose coordinates fall inside the bounding box.
    ///
    /// Meetups without coordinates never qualify for a nearby search and are
    /// excluded here. The box over-includes by construction; the caller runs
    /// the exact haversine pass afterwards.
    pub async fn list_meetups_within(&self, bbox: &BoundingBox) -> Result<Vec<Meetup>, StoreError> {
        let query = r#"
            SELECT id, title, category, venue_name, latitude, longitude, starts_at
            FROM meetups
            WHERE latitude IS NOT NULL
              AND longitude IS NOT NULL
              AND latitude BETWEEN $1 AND $2
              AND longitude BETWEEN $3 AND $4
        "#;

        let rows = sqlx::query(query)
            .bind(bbox.min_lat)
            .bind(bbox.max_lat)
            .bind(bbox.min_lon)
            .bind(bbox.max_lon)
            .fetch_all(&self.pool)
            .await?;

        let meetups = rows
            .iter()
            .map(|row| {
                Ok(Meetup {
                    id: row.try_get("id")?,
                    title: row.try_get("title")?,
                    category: row.try_get("category")?,
                    venue_name: row.try_get("venue_name")?,
                    latitude: row.try_get("latitude")?,
                    longitude: row.try_get("longitude")?,
                    starts_at: row.try_get("starts_at")?,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        tracing::debug!("Bounding box query matched {} meetups", meetups.len());

        Ok(meetups)
    }

    /// Fetch every invoice in the reporting scope
    pub async fn list_invoices(&self) -> Result<Vec<Invoice>, StoreError> {
        let query = r#"
            SELECT id, invoice_number, client_name, status, proposal_id,
                   total_cost, general_conditions, supervision_fee,
                   created_by, created_by_name, invoice_date, approved_at
            FROM invoices
            ORDER BY invoice_date, id
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let invoices = rows
            .iter()
            .map(|row| {
                let status = row
                    .try_get::<String, _>("status")?
                    .parse()
                    .map_err(|source| StoreError::InvalidColumn {
                        column: "status",
                        source,
                    })?;

                Ok(Invoice {
                    id: row.try_get("id")?,
                    invoice_number: row.try_get("invoice_number")?,
                    client_name: row.try_get("client_name")?,
                    status,
                    proposal_id: row.try_get("proposal_id")?,
                    total_cost: row.try_get("total_cost")?,
                    general_conditions: row.try_get("general_conditions")?,
                    supervision_fee: row.try_get("supervision_fee")?,
                    created_by: row.try_get("created_by")?,
                    created_by_name: row.try_get("created_by_name")?,
                    invoice_date: row.try_get("invoice_date")?,
                    approved_at: row.try_get("approved_at")?,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        tracing::debug!("Fetched {} invoices", invoices.len());

        Ok(invoices)
    }

    /// Fetch every proposal in the reporting scope
    pub async fn list_proposals(&self) -> Result<Vec<Proposal>, StoreError> {
        let query = r#"
            SELECT id, number, management_approval, client_approval
            FROM proposals
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let proposals = rows
            .iter()
            .map(|row| {
                let management_approval = row
                    .try_get::<String, _>("management_approval")?
                    .parse()
                    .map_err(|source| StoreError::InvalidColumn {
                        column: "management_approval",
                        source,
                    })?;

                let client_approval = row
                    .try_get::<Option<String>, _>("client_approval")?
                    .map(|value| value.parse())
                    .transpose()
                    .map_err(|source| StoreError::InvalidColumn {
                        column: "client_approval",
                        source,
                    })?;

                Ok(Proposal {
                    id: row.try_get("id")?,
                    number: row.try_get("number")?,
                    management_approval,
                    client_approval,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        tracing::debug!("Fetched {} proposals", proposals.len());

        Ok(proposals)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_column_error_names_the_column() {
        let source = "refunded".parse::<crate::models::InvoiceStatus>().unwrap_err();
        let err = StoreError::InvalidColumn {
            column: "status",
            source,
        };

        let message = err.to_string();
        assert!(message.contains("status"));
        assert!(message.contains("refunded"));
    }
}
