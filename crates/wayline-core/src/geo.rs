//! Great-circle distance on the spherical Earth model.
//!
//! Both stores hand their rows to this module: proximity search ranks
//! positions by [`haversine_km`], and the travel statistics endpoint folds
//! an ordered history window through [`total_distance_km`].

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Anything with a latitude and longitude in degrees.
pub trait GeoPoint {
  fn latitude(&self) -> f64;
  fn longitude(&self) -> f64;
}

/// `(latitude, longitude)` pairs are points too.
impl GeoPoint for (f64, f64) {
  fn latitude(&self) -> f64 { self.0 }
  fn longitude(&self) -> f64 { self.1 }
}

/// Great-circle distance in kilometres between two coordinate pairs.
///
/// Haversine formula: `a = sin²(Δφ/2) + cos φ₁ · cos φ₂ · sin²(Δλ/2)`,
/// `c = 2 · atan2(√a, √(1−a))`, distance `= R · c`.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
  let d_lat = (lat2 - lat1).to_radians();
  let d_lon = (lon2 - lon1).to_radians();
  let lat1 = lat1.to_radians();
  let lat2 = lat2.to_radians();

  let a = (d_lat / 2.0).sin().powi(2)
    + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
  let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

  EARTH_RADIUS_KM * c
}

/// Total distance along `path` in kilometres, summing consecutive pairwise
/// haversine distances in input order. Zero or one point is a zero-length
/// path.
pub fn total_distance_km<P: GeoPoint>(path: &[P]) -> f64 {
  path
    .windows(2)
    .map(|w| {
      haversine_km(
        w[0].latitude(),
        w[0].longitude(),
        w[1].latitude(),
        w[1].longitude(),
      )
    })
    .sum()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn almost_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
  }

  #[test]
  fn distance_to_self_is_zero() {
    assert_eq!(haversine_km(34.0522, -118.2437, 34.0522, -118.2437), 0.0);
    assert_eq!(haversine_km(0.0, 0.0, 0.0, 0.0), 0.0);
    assert_eq!(haversine_km(-90.0, 180.0, -90.0, 180.0), 0.0);
  }

  #[test]
  fn distance_is_symmetric() {
    let forward = haversine_km(51.5007, 0.1246, 40.6892, -74.0445);
    let back = haversine_km(40.6892, -74.0445, 51.5007, 0.1246);
    assert_eq!(forward, back);
  }

  #[test]
  fn london_to_new_york_is_about_5591_km() {
    let d = haversine_km(51.5007, 0.1246, 40.6892, -74.0445);
    assert!(almost_eq(d, 5591.0, 1.0), "got {d} km");
  }

  #[test]
  fn reference_pair_is_about_445_km() {
    let d = haversine_km(35.12314, 27.64532, 39.12355, 27.64538);
    assert!(almost_eq(d, 445.0, 1.0), "got {d} km");
  }

  #[test]
  fn total_of_empty_path_is_zero() {
    let path: Vec<(f64, f64)> = vec![];
    assert_eq!(total_distance_km(&path), 0.0);
  }

  #[test]
  fn total_of_single_point_is_zero() {
    assert_eq!(total_distance_km(&[(40.7128, -74.0060)]), 0.0);
  }

  #[test]
  fn total_is_sum_of_consecutive_legs() {
    let path = [(35.12314, 27.64532), (39.12355, 27.64538), (35.12314, 27.64532)];
    let expected = haversine_km(35.12314, 27.64532, 39.12355, 27.64538)
      + haversine_km(39.12355, 27.64538, 35.12314, 27.64532);
    assert_eq!(total_distance_km(&path), expected);
  }

  #[test]
  fn total_follows_input_order_not_coordinate_order() {
    // Visits the middle point last; re-sorting by latitude would shorten
    // the path.
    let zigzag = [(0.0, 0.0), (2.0, 0.0), (1.0, 0.0)];
    let sorted = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)];

    let zigzag_total = total_distance_km(&zigzag);
    let expected = haversine_km(0.0, 0.0, 2.0, 0.0) + haversine_km(2.0, 0.0, 1.0, 0.0);

    assert_eq!(zigzag_total, expected);
    assert!(zigzag_total > total_distance_km(&sorted));
  }
}
