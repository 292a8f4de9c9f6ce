use crate::core::{
    bounding_box, distinct_sales_persons, filter_by_sales_person, filter_by_search,
    filter_nearby, total_commission, CommissionEngine,
};
use crate::models::{
    CommissionEntry, CommissionReportRequest, CommissionReportResponse, ErrorResponse,
    HealthResponse, NearbyMeetupsRequest, NearbyMeetupsResponse, Point, RankedMeetup,
    SalesPersonFilter,
};
use crate::services::{CacheKey, ReportCache, ReportStore, StoreError};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ReportStore>,
    pub cache: Option<Arc<ReportCache>>,
    pub engine: CommissionEngine,
}

/// Configure all report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/meetups/nearby", web::post().to(nearby_meetups))
        .route("/reports/commissions", web::get().to(commission_report));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Nearby meetups endpoint
///
/// POST /api/v1/meetups/nearby
///
/// Request body:
/// ```json
/// {
///   "latitude": 48.8566,
///   "longitude": 2.3522,
///   "radiusKm": 25,
///   "limit": 50
/// }
/// ```
async fn nearby_meetups(
    state: web::Data<AppState>,
    req: web::Json<NearbyMeetupsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for nearby_meetups request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let center = Point::new(req.latitude, req.longitude);

    // Wide pre-filter for the database range query; the exact pass below
    // enforces the true radius.
    let bbox = match bounding_box(center, req.radius_km) {
        Ok(bbox) => bbox,
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid geographic input".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    let cache_key = CacheKey::nearby(req.latitude, req.longitude, req.radius_km);
    if let Some(cache) = &state.cache {
        match cache.get::<NearbyMeetupsResponse>(&cache_key).await {
            Ok(Some(mut cached)) => {
                cached.meetups.truncate(req.limit as usize);
                return HttpResponse::Ok().json(cached);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Cache read failed for {}: {}", cache_key, e),
        }
    }

    let candidates = match state.store.list_meetups_within(&bbox).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query meetups: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to query meetups".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let total_candidates = candidates.len();

    let ranked: Vec<RankedMeetup> = match filter_nearby(center, req.radius_km, candidates) {
        Ok(ranked) => ranked,
        Err(e) => {
            // Unreachable after request validation, but kept as a guard
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid geographic input".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    tracing::info!(
        "Nearby search at ({}, {}) r={}km: {} of {} candidates within radius",
        req.latitude,
        req.longitude,
        req.radius_km,
        ranked.len(),
        total_candidates
    );

    let mut response = NearbyMeetupsResponse {
        meetups: ranked,
        total_candidates,
    };

    // Cache the full ranked list; the limit is applied per request
    if let Some(cache) = &state.cache {
        if let Err(e) = cache.set(&cache_key, &response).await {
            tracing::warn!("Cache write failed for {}: {}", cache_key, e);
        }
    }

    response.meetups.truncate(req.limit as usize);

    HttpResponse::Ok().json(response)
}

/// Commission report endpoint
///
/// GET /api/v1/reports/commissions?salesPersonId=all&search=
///
/// Joins paid invoices against won proposals and returns the derived
/// commission entries, the commission total for the selected scope, and the
/// distinct salesperson list for the report dropdown.
async fn commission_report(
    state: web::Data<AppState>,
    query: web::Query<CommissionReportRequest>,
) -> impl Responder {
    let entries = match load_commission_entries(&state).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("Failed to build commission entries: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to build commission report".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Dropdown covers every salesperson with an entry, before filtering
    let sales_persons = distinct_sales_persons(&entries);

    let filter = SalesPersonFilter::from(query.sales_person_id.as_str());
    let scoped = filter_by_sales_person(&entries, &filter);
    let filtered = filter_by_search(&scoped, &query.search);
    let total = total_commission(&filtered);

    tracing::info!(
        "Commission report: {} of {} entries after filters (salesPersonId={}, search={:?})",
        filtered.len(),
        entries.len(),
        query.sales_person_id,
        query.search
    );

    HttpResponse::Ok().json(CommissionReportResponse {
        entries: filtered,
        total_commission: total,
        sales_persons,
    })
}

/// Fetch invoices and proposals in parallel and derive the full entry set,
/// going through the cache when one is configured
async fn load_commission_entries(state: &AppState) -> Result<Vec<CommissionEntry>, StoreError> {
    let cache_key = CacheKey::commission_entries();

    if let Some(cache) = &state.cache {
        match cache.get::<Vec<CommissionEntry>>(&cache_key).await {
            Ok(Some(entries)) => return Ok(entries),
            Ok(None) => {}
            Err(e) => tracing::warn!("Cache read failed for {}: {}", cache_key, e),
        }
    }

    let (invoices, proposals) =
        tokio::try_join!(state.store.list_invoices(), state.store.list_proposals())?;

    let entries = state.engine.build_entries(&invoices, &proposals);

    if let Some(cache) = &state.cache {
        if let Err(e) = cache.set(&cache_key, &entries).await {
            tracing::warn!("Cache write failed for {}: {}", cache_key, e);
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
