use nalgebra::{Point2, Point3, Rotation3, Unit, Vector3};

const EPSILON: f64 = 1.0e-7;

pub fn rotation_from_axis_angle(axis: &Vector3<f64>, angle_degrees: f64) -> Rotation3<f64> {
    match Unit::try_new(*axis, EPSILON) {
        Some(axis) => Rotation3::from_axis_angle(&axis, angle_degrees.to_radians()),
        None => Rotation3::identity(),
    }
}

/// Angle between two vectors in degrees, in `[0, 180]`.
///
/// A zero-length input yields 0.
pub fn angle_degrees(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let norms = a.norm() * b.norm();
    if norms < EPSILON {
        return 0.0;
    }
    (a.dot(b) / norms).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Angle between two base normals folded into `[0, 90]`.
pub fn plane_angle_degrees(z1: &Vector3<f64>, z2: &Vector3<f64>) -> f64 {
    let angle = angle_degrees(z1, z2);
    if angle > 90.0 { 180.0 - angle } else { angle }
}

/// Component of `v` perpendicular to `axis`, normalized.
///
/// Returns `None` when `v` is (nearly) parallel to `axis`.
pub fn orthogonal_unit(v: &Vector3<f64>, axis: &Vector3<f64>) -> Option<Vector3<f64>> {
    let axis = Unit::try_new(*axis, EPSILON)?;
    let perpendicular = v - axis.into_inner() * v.dot(&axis);
    perpendicular.try_normalize(EPSILON)
}

/// Signed angle in degrees from `a` to `b`, measured in the plane perpendicular
/// to `reference`; positive when the rotation follows the right-hand rule about it.
pub fn signed_angle_degrees(a: &Vector3<f64>, b: &Vector3<f64>, reference: &Vector3<f64>) -> f64 {
    let (Some(a_perp), Some(b_perp)) = (orthogonal_unit(a, reference), orthogonal_unit(b, reference))
    else {
        return 0.0;
    };
    let angle = angle_degrees(&a_perp, &b_perp);
    if a_perp.cross(&b_perp).dot(reference) < 0.0 {
        -angle
    } else {
        angle
    }
}

/// Projects points onto the plane through `origin` with the given `normal` and
/// returns their 2D coordinates in an arbitrary in-plane basis.
pub fn project_onto_plane(
    points: &[Point3<f64>],
    origin: &Point3<f64>,
    normal: &Vector3<f64>,
) -> Vec<Point2<f64>> {
    let Some(normal) = normal.try_normalize(EPSILON) else {
        return Vec::new();
    };
    let helper = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = (helper - normal * normal.dot(&helper)).normalize();
    let v = normal.cross(&u);

    points
        .iter()
        .map(|p| {
            let d = p - origin;
            Point2::new(d.dot(&u), d.dot(&v))
        })
        .collect()
}

/// Signed polygon area by the shoelace formula (positive for counter-clockwise).
pub fn signed_polygon_area(polygon: &[Point2<f64>]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let twice_area: f64 = polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    0.5 * twice_area
}

fn cross_2d(origin: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    (a.x - origin.x) * (b.y - origin.y) - (a.y - origin.y) * (b.x - origin.x)
}

fn segment_line_intersection(
    p: &Point2<f64>,
    q: &Point2<f64>,
    a: &Point2<f64>,
    b: &Point2<f64>,
) -> Point2<f64> {
    let dp = cross_2d(a, b, p);
    let dq = cross_2d(a, b, q);
    let t = dp / (dp - dq);
    p + (q - p) * t
}

/// Clips `subject` against a counter-clockwise convex polygon (Sutherland-Hodgman).
fn clip_convex(subject: &[Point2<f64>], clip: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut output = subject.to_vec();
    for (a, b) in clip.iter().zip(clip.iter().cycle().skip(1)) {
        if output.is_empty() {
            break;
        }
        let input = std::mem::take(&mut output);
        for (k, current) in input.iter().enumerate() {
            let previous = &input[(k + input.len() - 1) % input.len()];
            let current_inside = cross_2d(a, b, current) >= 0.0;
            let previous_inside = cross_2d(a, b, previous) >= 0.0;
            if current_inside {
                if !previous_inside {
                    output.push(segment_line_intersection(previous, current, a, b));
                }
                output.push(*current);
            } else if previous_inside {
                output.push(segment_line_intersection(previous, current, a, b));
            }
        }
    }
    output
}

/// Fan triangulation of a polygon; every triangle is returned counter-clockwise
/// together with the sign of its original orientation.
fn signed_fan(polygon: &[Point2<f64>]) -> Vec<([Point2<f64>; 3], f64)> {
    if polygon.len() < 3 {
        return Vec::new();
    }
    let apex = polygon[0];
    polygon
        .windows(2)
        .skip(1)
        .filter_map(|edge| {
            let area = cross_2d(&apex, &edge[0], &edge[1]);
            if area.abs() < EPSILON {
                None
            } else if area > 0.0 {
                Some(([apex, edge[0], edge[1]], 1.0))
            } else {
                Some(([apex, edge[1], edge[0]], -1.0))
            }
        })
        .collect()
}

/// Area of the intersection of two simple polygons.
///
/// Each polygon is decomposed into a signed triangle fan; the intersection area
/// is the signed sum of pairwise convex triangle intersections, which holds for
/// non-convex outlines as well.
pub fn polygon_overlap_area(a: &[Point2<f64>], b: &[Point2<f64>]) -> f64 {
    let fan_a = signed_fan(a);
    let fan_b = signed_fan(b);

    let mut total = 0.0;
    for (tri_a, sign_a) in &fan_a {
        for (tri_b, sign_b) in &fan_b {
            let clipped = clip_convex(tri_a, tri_b);
            total += sign_a * sign_b * signed_polygon_area(&clipped);
        }
    }
    total.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn square(x0: f64, y0: f64, side: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x0 + side, y0),
            Point2::new(x0 + side, y0 + side),
            Point2::new(x0, y0 + side),
        ]
    }

    #[test]
    fn angle_degrees_handles_parallel_and_antiparallel() {
        assert!((angle_degrees(&Vector3::z(), &Vector3::z())).abs() < TOLERANCE);
        assert!((angle_degrees(&Vector3::z(), &-Vector3::z()) - 180.0).abs() < TOLERANCE);
        assert!((angle_degrees(&Vector3::x(), &Vector3::y()) - 90.0).abs() < TOLERANCE);
        assert_eq!(angle_degrees(&Vector3::zeros(), &Vector3::x()), 0.0);
    }

    #[test]
    fn plane_angle_is_folded_into_first_quadrant() {
        let tilted = Vector3::new(0.0, 1.0, -1.0);
        assert!((plane_angle_degrees(&Vector3::z(), &tilted) - 45.0).abs() < 1e-9);
        assert!(plane_angle_degrees(&Vector3::z(), &-Vector3::z()).abs() < TOLERANCE);
    }

    #[test]
    fn signed_angle_follows_right_hand_rule() {
        let angle = signed_angle_degrees(&Vector3::x(), &Vector3::y(), &Vector3::z());
        assert!((angle - 90.0).abs() < TOLERANCE);
        let angle = signed_angle_degrees(&Vector3::x(), &Vector3::y(), &-Vector3::z());
        assert!((angle + 90.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_angle_ignores_component_along_reference() {
        let a = Vector3::new(1.0, 0.0, 5.0);
        let b = Vector3::new(0.0, 1.0, -3.0);
        let angle = signed_angle_degrees(&a, &b, &Vector3::z());
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn projection_preserves_in_plane_distances() {
        let points = [Point3::new(1.0, 2.0, 0.0), Point3::new(4.0, 6.0, 0.0)];
        let projected = project_onto_plane(&points, &Point3::new(0.0, 0.0, 3.0), &Vector3::z());
        assert_eq!(projected.len(), 2);
        assert!(((projected[1] - projected[0]).norm() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn shoelace_area_is_signed() {
        let ccw = square(0.0, 0.0, 2.0);
        let mut cw = ccw.clone();
        cw.reverse();
        assert!((signed_polygon_area(&ccw) - 4.0).abs() < TOLERANCE);
        assert!((signed_polygon_area(&cw) + 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn overlap_of_partially_covering_squares() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        assert!((polygon_overlap_area(&a, &b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn overlap_of_disjoint_polygons_is_zero() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(5.0, 5.0, 1.0);
        assert!(polygon_overlap_area(&a, &b).abs() < TOLERANCE);
    }

    #[test]
    fn overlap_is_independent_of_winding() {
        let a = square(0.0, 0.0, 2.0);
        let mut b = square(0.5, 0.5, 1.0);
        b.reverse();
        assert!((polygon_overlap_area(&a, &b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn overlap_handles_non_convex_outline() {
        // L-shaped polygon covering three unit cells of a 2x2 square.
        let l_shape = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        let full = square(0.0, 0.0, 2.0);
        assert!((polygon_overlap_area(&l_shape, &full) - 3.0).abs() < 1e-9);
        let missing_cell = square(1.0, 1.0, 1.0);
        assert!(polygon_overlap_area(&l_shape, &missing_cell).abs() < 1e-9);
    }

    #[test]
    fn rotation_about_degenerate_axis_is_identity() {
        let rotation = rotation_from_axis_angle(&Vector3::zeros(), 45.0);
        assert_eq!(rotation, Rotation3::identity());
    }
}
