/// Geographic helpers: haversine distance and the bounding box pre-filter.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Rough kilometers per degree of latitude.
pub const KM_PER_DEGREE: f64 = 111.0;

/// WGS84 coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const UNSET: Coordinates = Coordinates {
        latitude: 0.0,
        longitude: 0.0,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Validated constructor; latitude in [-90, 90], longitude in [-180, 180].
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err("latitude must be between -90 and 90".to_string());
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err("longitude must be between -180 and 180".to_string());
        }
        Ok(Self::new(latitude, longitude))
    }

    /// (0, 0) means the caller shared no location.
    pub fn is_unset(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

/// Great-circle distance in kilometers (haversine).
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance rounded to whole meters.
pub fn distance_meters(from: Coordinates, to: Coordinates) -> i64 {
    (haversine_km(from, to) * 1000.0).round() as i64
}

/// Inclusive lat/lng rectangle around an origin. A superset of the radius circle
/// away from the poles; used only as a cheap pre-filter.
///
/// When the longitude range crosses the antimeridian it wraps, and
/// `min_longitude > max_longitude`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub origin: Coordinates,
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    pub fn around(origin: Coordinates, radius_km: f64) -> Self {
        let lat_span = radius_km / KM_PER_DEGREE;
        let cos_lat = origin.latitude.to_radians().cos();
        // cos(lat) vanishes at the poles; cover every longitude there.
        let lng_span = if cos_lat > 1e-9 {
            (radius_km / (KM_PER_DEGREE * cos_lat)).min(180.0)
        } else {
            180.0
        };

        let (min_longitude, max_longitude) = if lng_span >= 180.0 {
            (-180.0, 180.0)
        } else {
            let mut min = origin.longitude - lng_span;
            let mut max = origin.longitude + lng_span;
            if min < -180.0 {
                min += 360.0;
            }
            if max > 180.0 {
                max -= 360.0;
            }
            (min, max)
        };

        Self {
            origin,
            min_latitude: origin.latitude - lat_span,
            max_latitude: origin.latitude + lat_span,
            min_longitude,
            max_longitude,
        }
    }

    pub fn wraps_antimeridian(&self) -> bool {
        self.min_longitude > self.max_longitude
    }

    pub fn contains(&self, point: Coordinates) -> bool {
        if !(self.min_latitude..=self.max_latitude).contains(&point.latitude) {
            return false;
        }
        if self.wraps_antimeridian() {
            point.longitude >= self.min_longitude || point.longitude <= self.max_longitude
        } else {
            (self.min_longitude..=self.max_longitude).contains(&point.longitude)
        }
    }

    /// Scale applied to longitude deltas so they compare with latitude deltas.
    pub fn longitude_scale(&self) -> f64 {
        self.origin.latitude.to_radians().cos()
    }

    /// Squared equirectangular distance to the origin, in degrees². Orders
    /// candidates the same way the store does before applying its cap.
    pub fn planar_distance_sq(&self, point: Coordinates) -> f64 {
        let delta_lat = point.latitude - self.origin.latitude;
        let raw = (point.longitude - self.origin.longitude).abs();
        let delta_lng = raw.min(360.0 - raw) * self.longitude_scale();
        delta_lat * delta_lat + delta_lng * delta_lng
    }
}
