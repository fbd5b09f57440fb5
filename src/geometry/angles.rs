//! Angle wrapping helpers.

use std::f64::consts::{PI, TAU};

/// Wraps an angle into the closed interval [-π, π].
///
/// Uses the truncated remainder, so the sign of the input picks the branch:
///
/// ```text
/// t >= 0:  ((t + π) mod  2π) - π
/// t <  0:  ((t - π) mod -2π) + π
/// ```
///
/// The seam is not symmetric: `normalize_angle(π)` is `-π` and
/// `normalize_angle(-π)` is `π`. Both are inside the interval.
#[inline]
pub fn normalize_angle(t: f64) -> f64 {
    if t >= 0.0 {
        (t + PI) % TAU - PI
    } else {
        (t - PI) % -TAU + PI
    }
}

/// Signed shortest rotation taking `from` to `to`, in [-π, π].
#[inline]
pub fn shortest_angular_distance(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn in_range(a: f64) -> bool {
        (-PI..=PI).contains(&a)
    }

    #[test]
    fn test_normalize_zero() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(-0.0), 0.0);
    }

    #[test]
    fn test_normalize_seam() {
        assert_relative_eq!(normalize_angle(PI), -PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-PI), PI, epsilon = 1e-12);
        assert!(in_range(normalize_angle(PI)));
        assert!(in_range(normalize_angle(-PI)));
    }

    #[test]
    fn test_normalize_inside_interval_is_identity() {
        for &a in &[0.1, -0.1, 1.5, -1.5, 3.0, -3.0] {
            assert_relative_eq!(normalize_angle(a), a, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_normalize_large_multiples() {
        for k in 1..50 {
            let k = k as f64;
            let even = normalize_angle(2.0 * k * PI);
            let odd = normalize_angle((2.0 * k + 1.0) * PI);
            assert!(in_range(even) && in_range(odd));
            assert!(even.abs() < 1e-9, "2kπ should wrap to 0, got {}", even);
            assert!(PI - odd.abs() < 1e-9, "(2k+1)π should wrap to ±π, got {}", odd);

            let neg = normalize_angle(-2.0 * k * PI);
            assert!(in_range(neg));
            assert!(neg.abs() < 1e-9);
        }
    }

    #[test]
    fn test_normalize_always_in_range() {
        let mut t = -1000.0;
        while t <= 1000.0 {
            let n = normalize_angle(t);
            assert!(in_range(n), "normalize({}) = {} out of range", t, n);
            t += 0.37;
        }
    }

    #[test]
    fn test_normalize_periodic() {
        for &a in &[0.3, -0.3, 2.9, -2.9, 1.0, -1.7] {
            for k in -5..=5 {
                let shifted = a + TAU * k as f64;
                assert_relative_eq!(normalize_angle(shifted), normalize_angle(a), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_shortest_angular_distance_wraps() {
        // 170° to -170° is a 20° step, not -340°
        let from = 170f64.to_radians();
        let to = -170f64.to_radians();
        assert_relative_eq!(
            shortest_angular_distance(from, to),
            20f64.to_radians(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            shortest_angular_distance(to, from),
            -20f64.to_radians(),
            epsilon = 1e-12
        );
    }
}
