//! 3D vector geometry for interaction detection.
//!
//! Everything here is a pure function over [`nalgebra`] points and vectors.

use nalgebra as na;

/// Normal returned by [`plane_normal`] when fewer than three points are given.
pub const SENTINEL_NORMAL: na::Vector3<f64> = na::Vector3::new(0.0, 0.0, 1.0);

/// Euclidean distance between two points.
pub fn distance(a: &na::Point3<f64>, b: &na::Point3<f64>) -> f64 {
    na::distance(a, b)
}

/// Squared Euclidean distance between two points.
pub fn distance_squared(a: &na::Point3<f64>, b: &na::Point3<f64>) -> f64 {
    na::distance_squared(a, b)
}

/// Arithmetic mean of the points, or the origin if there are none.
pub fn centroid(points: &[na::Point3<f64>]) -> na::Point3<f64> {
    if points.is_empty() {
        return na::Point3::origin();
    }
    let sum = points
        .iter()
        .fold(na::Vector3::zeros(), |acc, p| acc + p.coords);
    na::Point3::from(sum / points.len() as f64)
}

/// Approximate the normal of the plane through an ordered set of points.
///
/// The first, middle and last points span two edge vectors whose cross product
/// is normalized. Collinear input gives the zero vector, which callers must treat
/// as an undefined orientation. Fewer than three points give [`SENTINEL_NORMAL`].
pub fn plane_normal(points: &[na::Point3<f64>]) -> na::Vector3<f64> {
    if points.len() < 3 {
        return SENTINEL_NORMAL;
    }
    let first = points[0];
    let middle = points[points.len() / 2];
    let last = points[points.len() - 1];

    let normal = (middle - first).cross(&(last - first));
    normal.try_normalize(f64::EPSILON).unwrap_or_else(na::Vector3::zeros)
}

/// Acute angle in degrees between two directions, ignoring their sign.
///
/// Returns NaN when either vector has zero length, so every threshold comparison
/// against the result is false.
pub fn angle_between_vectors(v1: &na::Vector3<f64>, v2: &na::Vector3<f64>) -> f64 {
    let norms = v1.norm() * v2.norm();
    if norms == 0.0 {
        return f64::NAN;
    }
    let cos = (v1.dot(v2) / norms).abs().min(1.0);
    cos.acos().to_degrees()
}

/// Angle a-b-c in degrees, with the vertex at `b`.
pub fn angle_at_vertex(a: &na::Point3<f64>, b: &na::Point3<f64>, c: &na::Point3<f64>) -> f64 {
    let ba = a - b;
    let bc = c - b;
    let norms = ba.norm() * bc.norm();
    if norms == 0.0 {
        return f64::NAN;
    }
    let cos = (ba.dot(&bc) / norms).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// True if the vector can serve as a plane orientation.
pub fn is_defined_direction(v: &na::Vector3<f64>) -> bool {
    v.norm_squared() > f64::EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> na::Point3<f64> {
        na::Point3::new(x, y, z)
    }

    #[test]
    fn test_distance() {
        assert!((distance(&p(0.0, 0.0, 0.0), &p(0.0, 3.0, 4.0)) - 5.0).abs() < 1e-12);
        assert!((distance_squared(&p(1.0, 1.0, 1.0), &p(2.0, 2.0, 2.0)) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_centroid() {
        assert_eq!(centroid(&[]), na::Point3::origin());
        let c = centroid(&[p(0.0, 0.0, 0.0), p(2.0, 4.0, -6.0)]);
        assert_eq!(c, p(1.0, 2.0, -3.0));
    }

    #[test]
    fn test_plane_normal() {
        let square = [
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ];
        let n = plane_normal(&square);
        assert!((n.norm() - 1.0).abs() < 1e-12);
        assert!((n.z.abs() - 1.0).abs() < 1e-12);

        // Collinear points have no orientation
        let line = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)];
        assert!(!is_defined_direction(&plane_normal(&line)));

        assert_eq!(plane_normal(&[p(0.0, 0.0, 0.0)]), SENTINEL_NORMAL);
    }

    #[test]
    fn test_angle_between_vectors_is_acute() {
        let x = na::Vector3::new(1.0, 0.0, 0.0);
        let diag = na::Vector3::new(1.0, 1.0, 0.0);
        for (a, b) in [(x, diag), (-x, diag), (x, -diag), (-x, -diag)] {
            let angle = angle_between_vectors(&a, &b);
            assert!((angle - 45.0).abs() < 1e-9, "{angle}");
        }
        assert!(angle_between_vectors(&x, &-x).abs() < 1e-9);
        let y = na::Vector3::new(0.0, -2.0, 0.0);
        assert!((angle_between_vectors(&x, &y) - 90.0).abs() < 1e-9);
        for v in [
            na::Vector3::new(0.3, -0.7, 0.2),
            na::Vector3::new(-5.0, 1.0, 9.0),
            na::Vector3::new(0.0, 0.0, -1.0),
        ] {
            let angle = angle_between_vectors(&diag, &v);
            assert!((0.0..=90.0).contains(&angle));
        }
    }

    #[test]
    fn test_zero_vector_fails_comparisons() {
        let angle = angle_between_vectors(&na::Vector3::zeros(), &na::Vector3::x());
        assert!(!(angle <= 30.0));
        assert!(!(angle >= 60.0));
    }

    #[test]
    fn test_angle_at_vertex() {
        let angle = angle_at_vertex(&p(1.0, 0.0, 0.0), &p(0.0, 0.0, 0.0), &p(0.0, 1.0, 0.0));
        assert!((angle - 90.0).abs() < 1e-9);
        let straight = angle_at_vertex(&p(-1.0, 0.0, 0.0), &p(0.0, 0.0, 0.0), &p(3.0, 0.0, 0.0));
        assert!((straight - 180.0).abs() < 1e-9);
    }
}
