//! Unit tests for wf-core primitives.

#[cfg(test)]
mod ids {
    use crate::NodeId;

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(NodeId::default(), NodeId::INVALID);
        assert!(!NodeId::INVALID.is_valid());
        assert!(NodeId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{GeoPoint, Point};

    #[test]
    fn euclidean_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
        assert_eq!(a.distance_2(b), 25.0);
    }

    #[test]
    fn zero_distance() {
        let p = Point::new(0.25, 0.75);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(30.0, -88.0);
        let b = GeoPoint::new(31.0, -88.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn projection_agrees_with_haversine() {
        let origin = GeoPoint::new(48.85, 2.35);
        let p = GeoPoint::new(48.86, 2.37);
        let (e, n) = p.project_m(origin);
        let planar = (e * e + n * n).sqrt();
        let great_circle = origin.distance_m(p);
        assert!((planar - great_circle).abs() / great_circle < 0.01);
        assert!(e > 0.0 && n > 0.0);
    }
}

#[cfg(test)]
mod input {
    use crate::{Axis, CoreError, MapPercent, Point};

    #[test]
    fn boundaries_accepted() {
        assert!(MapPercent::new(0.0, 0.0).is_ok());
        assert!(MapPercent::new(100.0, 100.0).is_ok());
        assert!(MapPercent::new(0.0, 100.0).is_ok());
    }

    #[test]
    fn just_outside_rejected() {
        let err = MapPercent::new(-0.001, 50.0).unwrap_err();
        assert!(matches!(err, CoreError::CoordinateOutOfRange { axis: Axis::X, .. }));

        let err = MapPercent::new(50.0, 100.001).unwrap_err();
        assert!(matches!(err, CoreError::CoordinateOutOfRange { axis: Axis::Y, .. }));
    }

    #[test]
    fn nan_rejected() {
        assert!(MapPercent::new(f32::NAN, 10.0).is_err());
    }

    #[test]
    fn normalized_scales_to_unit() {
        let p = MapPercent::new(50.0, 100.0).unwrap();
        assert_eq!(p.normalized(), Point::new(0.5, 1.0));
    }

    #[test]
    fn parse_space_and_comma() {
        let a: MapPercent = "10 90".parse().unwrap();
        let b: MapPercent = "10,90".parse().unwrap();
        let c: MapPercent = " 10 ,  90 ".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.x(), 10.0);
        assert_eq!(a.y(), 90.0);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!("10".parse::<MapPercent>(), Err(CoreError::Parse(_))));
        assert!(matches!("1 2 3".parse::<MapPercent>(), Err(CoreError::Parse(_))));
        assert!(matches!("a b".parse::<MapPercent>(), Err(CoreError::Parse(_))));
        assert!(matches!(
            "101 5".parse::<MapPercent>(),
            Err(CoreError::CoordinateOutOfRange { .. })
        ));
    }
}
