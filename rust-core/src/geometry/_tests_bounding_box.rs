#[cfg(test)]
mod _tests_bounding_box {
    use super::super::bounding_box::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn cloud() -> Vec<Vector3<f64>> {
        vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(10.0, 4.0, 6.0),
            Vector3::new(5.0, 2.0, 3.0),
            Vector3::new(1.0, 2.0, 3.0),
        ]
    }

    #[test]
    fn test_from_points() {
        let bb = BoundingBox3D::from_points(&cloud()).unwrap();
        assert_eq!(bb.min, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(bb.max, Vector3::new(10.0, 4.0, 6.0));
        assert_eq!(bb.size(), Vector3::new(10.0, 4.0, 6.0));
        assert!(BoundingBox3D::from_points(&[]).is_none());
    }

    #[test]
    fn test_distance_to_boundary() {
        let bb = BoundingBox3D::from_points(&cloud()).unwrap();
        assert_relative_eq!(bb.distance_to_boundary(&Vector3::new(5.0, 2.0, 3.0)), 2.0);
        assert_relative_eq!(bb.distance_to_boundary(&Vector3::new(1.0, 2.0, 3.0)), 1.0);
        assert!(bb.distance_to_boundary(&Vector3::new(-1.0, 2.0, 3.0)) < 0.0);
        assert_eq!(bb.distance_to_boundary(&Vector3::new(10.0, 4.0, 6.0)), 0.0);
    }

    #[test]
    fn test_inside_mask() {
        let mask = inside_mask(&cloud(), 1.5);
        assert_eq!(mask, vec![false, false, true, false]);
        // Zero margin keeps boundary points
        assert!(inside_mask(&cloud(), 0.0).iter().all(|&b| b));
    }
}
