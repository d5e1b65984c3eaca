//! Great-circle geometry for distance annotations on list entries.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Haversine distance between two coordinates, in kilometres.
#[must_use]
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Formats a distance for display next to a list entry.
///
/// Distances under one kilometre are shown in metres rounded to the nearest
/// metre; everything else in kilometres with one decimal place.
#[must_use]
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{}m", (km * 1000.0).round() as i64)
    } else {
        format!("{km:.1}km")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: Coordinates = Coordinates::new(51.5074, -0.1278);
    const PARIS: Coordinates = Coordinates::new(48.8566, 2.3522);

    #[test]
    fn distance_is_symmetric() {
        let there = haversine_km(LONDON, PARIS);
        let back = haversine_km(PARIS, LONDON);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(haversine_km(LONDON, LONDON), 0.0);
    }

    #[test]
    fn london_paris_is_roughly_344_km() {
        let d = haversine_km(LONDON, PARIS);
        assert!((d - 343.5).abs() < 1.0, "got {d}");
    }

    #[test]
    fn formats_metres_below_one_km() {
        assert_eq!(format_distance(0.999), "999m");
        assert_eq!(format_distance(0.0004), "0m");
        assert_eq!(format_distance(0.25049), "250m");
    }

    #[test]
    fn formats_kilometres_from_one_km() {
        assert_eq!(format_distance(1.0), "1.0km");
        assert_eq!(format_distance(1.04), "1.0km");
        assert_eq!(format_distance(12.345), "12.3km");
    }
}
