//! Normalisation helpers that turn raw metric pairs into a signed value in
//! [-1, +1], where +1 is maximal home advantage.
//!
//! Every helper is total: non-finite intermediates collapse to 0.0 and any
//! differential beyond the scale saturates at ±1.

/// Clamp to [-1, 1]. NaN maps to neutral.
#[inline]
pub fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) }
}

/// `(home - away) / scale`, saturated. A non-positive or non-finite scale is
/// treated as "no signal".
#[inline]
pub fn scaled_diff(home: f64, away: f64, scale: f64) -> f64 {
    if !(scale.is_finite() && scale > 0.0) {
        return 0.0;
    }
    clamp_unit((home - away) / scale)
}

/// Same as [`scaled_diff`] for metrics where lower is better
/// (turnover rate, defensive rating, opponent shooting).
#[inline]
pub fn inverse_diff(home: f64, away: f64, scale: f64) -> f64 {
    scaled_diff(away, home, scale)
}

/// Differential of two fractions (0.52 vs 0.50) expressed in percentage
/// points before scaling.
#[inline]
pub fn pct_point_diff(home: f64, away: f64, scale_points: f64) -> f64 {
    scaled_diff(home * 100.0, away * 100.0, scale_points)
}

/// Saturating signed value of a single already-differenced quantity.
#[inline]
pub fn scaled(delta: f64, scale: f64) -> f64 {
    scaled_diff(delta, 0.0, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturates_beyond_scale() {
        assert_eq!(scaled_diff(30.0, -30.0, 10.0), 1.0);
        assert_eq!(scaled_diff(-30.0, 30.0, 10.0), -1.0);
        assert!((scaled_diff(5.0, 0.0, 10.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn degenerate_scale_is_neutral() {
        assert_eq!(scaled_diff(5.0, 1.0, 0.0), 0.0);
        assert_eq!(scaled_diff(5.0, 1.0, -3.0), 0.0);
        assert_eq!(scaled_diff(5.0, 1.0, f64::NAN), 0.0);
    }

    #[test]
    fn inverse_flips_direction() {
        // Home turns it over less: home edge.
        assert!(inverse_diff(12.0, 15.0, 4.0) > 0.0);
        assert_eq!(inverse_diff(12.0, 15.0, 4.0), -scaled_diff(12.0, 15.0, 4.0));
    }

    #[test]
    fn infinities_never_escape() {
        assert_eq!(scaled_diff(f64::INFINITY, 0.0, 1.0), 1.0);
        assert_eq!(scaled_diff(f64::INFINITY, f64::INFINITY, 1.0), 0.0);
        assert_eq!(clamp_unit(f64::NAN), 0.0);
    }

    #[test]
    fn pct_points_use_percentage_scale() {
        // 3 percentage points over a 6 point scale.
        assert!((pct_point_diff(0.55, 0.52, 6.0) - 0.5).abs() < 1e-9);
    }
}
