//! Property tests for distance, bearing, destination and membership.

use proptest::prelude::*;
use shopmap_geo::{
    bearing, circle_polygon, destination, haversine_distance, point_in_polygon, Corridor,
    Location, EARTH_RADIUS_KM,
};
use std::f64::consts::PI;

fn location() -> impl Strategy<Value = Location> {
    (-89.0f64..89.0, -180.0f64..180.0).prop_map(|(lat, lng)| Location::new(lat, lng))
}

proptest! {
    #[test]
    fn distance_is_symmetric_and_bounded(a in location(), b in location()) {
        let ab = haversine_distance(&a, &b);
        let ba = haversine_distance(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-9);
        prop_assert!(ab >= 0.0);
        prop_assert!(ab <= PI * EARTH_RADIUS_KM + 1e-6);
        prop_assert_eq!(haversine_distance(&a, &a), 0.0);
    }

    #[test]
    fn bearing_stays_in_range(a in location(), b in location()) {
        let deg = bearing(&a, &b);
        prop_assert!((0.0..360.0).contains(&deg));
    }

    #[test]
    fn destination_travels_requested_distance(
        origin in (-80.0f64..80.0, -180.0f64..180.0),
        heading in 0.0f64..360.0,
        km in 0.0f64..2000.0,
    ) {
        let origin = Location::new(origin.0, origin.1);
        let target = destination(&origin, heading, km);
        prop_assert!(target.is_valid());
        prop_assert!((haversine_distance(&origin, &target) - km).abs() < 1e-6);
    }

    #[test]
    fn circle_centre_is_inside(
        center in (-60.0f64..60.0, -170.0f64..170.0),
        radius in 0.05f64..50.0,
    ) {
        let center = Location::new(center.0, center.1);
        let circle = circle_polygon(&center, radius, 32);
        prop_assert_eq!(circle.len(), 32);
        prop_assert!(point_in_polygon(&center, circle.vertices()));
    }

    #[test]
    fn corridor_contains_its_own_route(
        start in (-60.0f64..60.0, -170.0f64..170.0),
        legs in prop::collection::vec((0.0f64..360.0, 0.1f64..5.0), 1..5),
        width in 0.01f64..1.0,
    ) {
        let mut route = vec![Location::new(start.0, start.1)];
        for (heading, km) in legs {
            let last = *route.last().unwrap();
            route.push(destination(&last, heading, km));
        }
        let corridor = Corridor::new(&route, width, 8);
        for point in &route {
            prop_assert!(corridor.contains(point));
        }
    }
}
