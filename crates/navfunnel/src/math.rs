use glam::Vec3A;

/// Two points closer than this (squared distance) are considered the same point.
pub const VEQUAL_EPSILON_SQ: f32 = 1.0e-5;

/// Returns `true` if `a` and `b` are the same point within [`VEQUAL_EPSILON_SQ`].
#[inline]
pub fn vequal(a: Vec3A, b: Vec3A) -> bool {
    a.distance_squared(b) < VEQUAL_EPSILON_SQ
}

/// Signed turn direction of `c` relative to the directed segment `a -> b`, projected onto the xz-plane.
///
/// Both `a -> b` and `a -> c` are normalized first, so the magnitude is roughly the sine of the angle
/// between them. A positive value means `c` lies on the side of `a -> b` that the funnel treats as "inward"
/// for its right edge, a negative value the opposite side. Zero means collinear.
///
/// If `a` coincides with `b` or `c` the corresponding direction collapses to zero and so does the result.
/// Callers that care about that case should check with [`vequal`] first.
#[inline]
pub fn turn_direction(a: Vec3A, b: Vec3A, c: Vec3A) -> f32 {
    let ab = (b - a).normalize_or_zero();
    let ac = (c - a).normalize_or_zero();
    ab.cross(ac).y
}

/// Twice the signed area of the triangle `a, b, c` on the xz-plane.
///
/// Unlike [`turn_direction`] the inputs are not normalized, but the sign is the same.
#[inline]
pub fn tri_area_2d(a: Vec3A, b: Vec3A, c: Vec3A) -> f32 {
    let abx = b.x - a.x;
    let abz = b.z - a.z;
    let acx = c.x - a.x;
    let acz = c.z - a.z;
    acx * abz - abx * acz
}

/// Total length of a polyline.
pub fn path_length(path: &[Vec3A]) -> f32 {
    path.windows(2).map(|w| w[0].distance(w[1])).sum()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn vequal_uses_squared_tolerance() {
        let a = Vec3A::new(1.0, 2.0, 3.0);
        assert!(vequal(a, a + Vec3A::splat(0.001)));
        assert!(!vequal(a, a + Vec3A::new(0.01, 0.0, 0.0)));
    }

    #[test]
    fn turn_direction_sign() {
        let a = Vec3A::ZERO;
        let b = Vec3A::new(2.0, 0.0, 1.0);
        assert!(turn_direction(a, b, Vec3A::new(2.0, 0.0, 0.5)) > 0.0);
        assert!(turn_direction(a, b, Vec3A::new(2.0, 0.0, 1.5)) < 0.0);
        assert_eq!(turn_direction(a, Vec3A::X * 2.0, Vec3A::X * 5.0), 0.0);
    }

    #[test]
    fn turn_direction_ignores_height() {
        let a = Vec3A::ZERO;
        let b = Vec3A::new(1.0, 0.0, 0.0);
        let flat = turn_direction(a, b, Vec3A::new(0.0, 0.0, -1.0));
        let raised = turn_direction(a, b, Vec3A::new(0.0, 5.0, -1.0));
        assert!(flat > 0.0);
        assert!(raised > 0.0);
        assert_abs_diff_eq!(flat, 1.0);
    }

    #[test]
    fn turn_direction_is_zero_for_coincident_points() {
        let a = Vec3A::new(4.0, 0.0, 1.0);
        assert_eq!(turn_direction(a, a, Vec3A::new(5.0, 0.0, 8.0)), 0.0);
    }

    #[test]
    fn tri_area_2d_is_twice_the_area() {
        let area = tri_area_2d(Vec3A::ZERO, Vec3A::X * 2.0, Vec3A::Z * 2.0);
        assert_abs_diff_eq!(area, -4.0);
        assert_eq!(
            area.signum(),
            turn_direction(Vec3A::ZERO, Vec3A::X * 2.0, Vec3A::Z * 2.0).signum()
        );
    }

    #[test]
    fn path_length_sums_segments() {
        let path = [Vec3A::ZERO, Vec3A::X * 3.0, Vec3A::new(3.0, 0.0, 4.0)];
        assert_abs_diff_eq!(path_length(&path), 7.0);
        assert_eq!(path_length(&path[..1]), 0.0);
    }
}
