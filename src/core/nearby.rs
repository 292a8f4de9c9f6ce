use crate::core::geo::{haversine_distance_km, validate_point, GeoError};
use crate::models::{Meetup, Point, RankedMeetup};
use std::cmp::Ordering;

/// Exact distance pass over a candidate set.
///
/// Intended to run after a bounding-box range query has narrowed the
/// candidates; it recomputes the true great-circle distance for each meetup,
/// drops anything beyond `radius_km`, and sorts ascending by distance.
/// Meetups without both coordinates are skipped, never an error.
pub fn filter_nearby(
    center: Point,
    radius_km: f64,
    meetups: Vec<Meetup>,
) -> Result<Vec<RankedMeetup>, GeoError> {
    validate_point(center)?;
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(GeoError::InvalidRadius(radius_km));
    }

    let mut ranked: Vec<RankedMeetup> = meetups
        .into_iter()
        .filter_map(|meetup| rank_meetup(center, radius_km, meetup))
        .collect();

    ranked.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
    });

    Ok(ranked)
}

fn rank_meetup(center: Point, radius_km: f64, meetup: Meetup) -> Option<RankedMeetup> {
    let latitude = meetup.latitude?;
    let longitude = meetup.longitude?;

    let distance_km = haversine_distance_km(center, Point::new(latitude, longitude));
    if distance_km > radius_km {
        return None;
    }

    Some(RankedMeetup {
        id: meetup.id,
        title: meetup.title,
        category: meetup.category,
        venue_name: meetup.venue_name,
        latitude,
        longitude,
        starts_at: meetup.starts_at,
        distance_km,
    })
}
