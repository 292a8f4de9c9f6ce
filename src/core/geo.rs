use crate::models::{BoundingBox, Point};
use thiserror::Error;

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// 1 degree of latitude is approximately 111 km
const KM_PER_DEGREE_LAT: f64 = 111.0;

/// Above this latitude the cosine term is too small to divide by; the
/// longitude band of a bounding box is treated as unbounded instead.
pub const POLAR_LAT_LIMIT_DEG: f64 = 89.0;

/// Errors for invalid geographic input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),

    #[error("radius {0} km is not a positive finite number")]
    InvalidRadius(f64),
}

/// Validate that a point carries in-range, finite coordinates
pub fn validate_point(point: Point) -> Result<(), GeoError> {
    if !point.latitude.is_finite() || point.latitude.abs() > 90.0 {
        return Err(GeoError::InvalidLatitude(point.latitude));
    }
    if !point.longitude.is_finite() || point.longitude.abs() > 180.0 {
        return Err(GeoError::InvalidLongitude(point.longitude));
    }
    Ok(())
}

/// Calculate the Haversine distance between two points in kilometers
///
/// Symmetric, zero for identical points, accurate to well under 0.5% for
/// distances below 1000 km.
#[inline]
pub fn haversine_distance_km(a: Point, b: Point) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Calculate a bounding box around a center point
///
/// The box is advisory and deliberately wider than the radius: it feeds a
/// cheap database range query and must never exclude a point the exact
/// distance pass would keep. Near the poles the longitude band degenerates
/// (cos(lat) approaches zero), so above [`POLAR_LAT_LIMIT_DEG`] the box
/// spans the full [-180, 180] longitude range.
pub fn bounding_box(center: Point, radius_km: f64) -> Result<BoundingBox, GeoError> {
    validate_point(center)?;
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(GeoError::InvalidRadius(radius_km));
    }

    let lat_delta = radius_km / KM_PER_DEGREE_LAT;
    let min_lat = (center.latitude - lat_delta).max(-90.0);
    let max_lat = (center.latitude + lat_delta).min(90.0);

    let (min_lon, max_lon) = if center.latitude.abs() > POLAR_LAT_LIMIT_DEG {
        (-180.0, 180.0)
    } else {
        // 1 degree longitude shrinks with latitude
        let lon_delta = radius_km / (KM_PER_DEGREE_LAT * center.latitude.to_radians().cos());
        (
            (center.longitude - lon_delta).max(-180.0),
            (center.longitude + lon_delta).min(180.0),
        )
    };

    Ok(BoundingBox {
        min_lat,
        max_lat,
        min_lon,
        max_lon,
    })
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(point: Point, bbox: &BoundingBox) -> bool {
    point.latitude >= bbox.min_lat
        && point.latitude <= bbox.max_lat
        && point.longitude >= bbox.min_lon
        && point.longitude <= bbox.max_lon
}
