use crate::qmap::plane::Plane;
use glam::{dvec3, DVec3};

const EPSILON: f64 = 1e-9;

fn assert_on_plane(plane: &Plane, points: [DVec3; 3]) {
    assert!((plane.normal.length() - 1.0).abs() < EPSILON);

    for point in points {
        assert!(
            plane.point_side(point).abs() < EPSILON,
            "{point} is off {plane:?}"
        );
    }
}

#[test]
fn axial_plane() {
    let points = [
        dvec3(-64.0, -64.0, -16.0),
        dvec3(-64.0, -63.0, -16.0),
        dvec3(-64.0, -64.0, -15.0),
    ];
    let plane = Plane::from_points(points);

    assert_eq!(plane.normal, dvec3(-1.0, 0.0, 0.0));
    assert_eq!(plane.distance, 64.0);
    assert_on_plane(&plane, points);
}

#[test]
fn winding_order_flips_normal() {
    let points = [
        dvec3(0.0, 0.0, 32.0),
        dvec3(1.0, 0.0, 32.0),
        dvec3(0.0, 1.0, 32.0),
    ];
    let plane = Plane::from_points(points);
    let flipped = Plane::from_points([points[0], points[2], points[1]]);

    assert_eq!(plane.normal, -flipped.normal);
    assert_eq!(plane.distance, -flipped.distance);
}

#[test]
fn oblique_plane() {
    let points = [
        dvec3(12.5, -3.0, 7.25),
        dvec3(-40.0, 18.0, 2.0),
        dvec3(5.0, 5.0, -60.0),
    ];
    let plane = Plane::from_points(points);

    assert!(plane.is_finite());
    assert_on_plane(&plane, points);
}

#[test]
fn collinear_points_are_not_finite() {
    let plane = Plane::from_points([
        dvec3(0.0, 0.0, 0.0),
        dvec3(1.0, 1.0, 1.0),
        dvec3(2.0, 2.0, 2.0),
    ]);

    assert!(!plane.is_finite());
}
