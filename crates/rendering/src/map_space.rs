//! Projection between geographic coordinates and world space.
//!
//! The map lives on the ground plane: longitude maps to +X (east), latitude
//! to -Z (north). The scale is a plain equirectangular stretch, which is
//! plenty for a viewport a tenth of a degree across.

use bevy::prelude::*;

use session::geo::Coordinate;
use session::state::{SignId, SignMarker};

/// World units per degree of latitude or longitude.
pub const WORLD_UNITS_PER_DEGREE: f64 = 1000.0;

/// Vertical field of view the distance mapping assumes, in radians.
/// Matches the default perspective projection.
const CAMERA_FOV_Y: f64 = std::f64::consts::FRAC_PI_4;

pub fn geo_to_world(coordinate: Coordinate) -> Vec3 {
    Vec3::new(
        (coordinate.longitude * WORLD_UNITS_PER_DEGREE) as f32,
        0.0,
        (-coordinate.latitude * WORLD_UNITS_PER_DEGREE) as f32,
    )
}

pub fn world_to_geo(position: Vec3) -> Coordinate {
    Coordinate::new(
        -(position.z as f64) / WORLD_UNITS_PER_DEGREE,
        position.x as f64 / WORLD_UNITS_PER_DEGREE,
    )
}

/// Camera distance that makes `latitude_delta` degrees fill the viewport
/// height. Shrinking the span flies the camera in, so zoom steps read as
/// real zoom.
pub fn delta_to_distance(latitude_delta: f64) -> f32 {
    let visible_height = latitude_delta * WORLD_UNITS_PER_DEGREE;
    (visible_height / (2.0 * (CAMERA_FOV_Y / 2.0).tan())) as f32
}

/// Find the sign nearest to `at` within `radius_degrees`, if any.
///
/// Distance is Euclidean over raw degrees, matching how the signs are laid
/// out on the projected plane.
pub fn pick_sign(signs: &[SignMarker], at: Coordinate, radius_degrees: f64) -> Option<SignId> {
    let mut best: Option<(SignId, f64)> = None;
    for sign in signs {
        let dlat = sign.coordinate.latitude - at.latitude;
        let dlon = sign.coordinate.longitude - at.longitude;
        let dist = (dlat * dlat + dlon * dlon).sqrt();
        if dist <= radius_degrees && best.map_or(true, |(_, d)| dist < d) {
            best = Some((sign.id, dist));
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn east_is_positive_x_north_is_negative_z() {
        let origin = geo_to_world(Coordinate::new(0.0, 0.0));
        assert_eq!(origin, Vec3::ZERO);

        let east = geo_to_world(Coordinate::new(0.0, 1.0));
        assert!(east.x > 0.0);

        let north = geo_to_world(Coordinate::new(1.0, 0.0));
        assert!(north.z < 0.0);
    }

    #[test]
    fn world_round_trip() {
        let coordinate = Coordinate::new(40.7357, -74.1724);
        let back = world_to_geo(geo_to_world(coordinate));
        assert!((back.latitude - coordinate.latitude).abs() < 1e-4);
        assert!((back.longitude - coordinate.longitude).abs() < 1e-4);
    }

    #[test]
    fn distance_shrinks_with_the_span() {
        let wide = delta_to_distance(0.0922);
        let narrow = delta_to_distance(0.001);
        assert!(wide > narrow);
        assert!(narrow > 0.0);
    }

    #[test]
    fn pick_finds_the_nearest_sign() {
        let signs = vec![
            SignMarker {
                id: SignId(1),
                coordinate: Coordinate::new(40.0, -74.0),
            },
            SignMarker {
                id: SignId(2),
                coordinate: Coordinate::new(40.001, -74.001),
            },
        ];
        let hit = pick_sign(&signs, Coordinate::new(40.0008, -74.0008), 0.01);
        assert_eq!(hit, Some(SignId(2)));
    }

    #[test]
    fn pick_respects_the_radius() {
        let signs = vec![SignMarker {
            id: SignId(1),
            coordinate: Coordinate::new(40.0, -74.0),
        }];
        assert_eq!(
            pick_sign(&signs, Coordinate::new(40.5, -74.0), 0.01),
            None
        );
        assert_eq!(
            pick_sign(&signs, Coordinate::new(40.0005, -74.0), 0.01),
            Some(SignId(1))
        );
    }

    #[test]
    fn pick_on_empty_list_is_none() {
        assert_eq!(pick_sign(&[], Coordinate::new(40.0, -74.0), 1.0), None);
    }
}
