//! Hue stepping on the circular `[0, 1)` domain.

use crate::random::RandomSource;

/// Advance `hue` by `step`, wrapping into `[0, 1)`.
///
/// A non-finite `step` (NaN or infinite) ignores `hue` and draws a fresh
/// uniform hue from `rng`. Negative steps wrap from below, so
/// `next_hue(0.0, -0.25)` is `0.75`.
pub fn next_hue<R: RandomSource + ?Sized>(hue: f64, step: f64, rng: &mut R) -> f64 {
    if !step.is_finite() {
        return rng.next_unit();
    }
    wrap_hue(hue + step)
}

/// Fold any finite value into `[0, 1)`.
pub(crate) fn wrap_hue(value: f64) -> f64 {
    let wrapped = value.rem_euclid(1.0);
    // rem_euclid of a tiny negative value rounds up to exactly 1.0.
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::XorShift64;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_positive_step() {
        let mut rng = XorShift64::new(1);
        assert!(approx(next_hue(0.25, 0.5, &mut rng), 0.75));
        assert!(approx(next_hue(0.75, 0.5, &mut rng), 0.25));
    }

    #[test]
    fn test_negative_step_wraps_from_below() {
        let mut rng = XorShift64::new(1);
        assert!(approx(next_hue(0.0, -0.25, &mut rng), 0.75));
        assert!(approx(next_hue(0.5, -0.03, &mut rng), 0.47));
        assert!(approx(next_hue(0.01, -0.015, &mut rng), 0.995));
    }

    #[test]
    fn test_tiny_negative_folds_to_zero() {
        let mut rng = XorShift64::new(1);
        let h = next_hue(0.0, -1e-18, &mut rng);
        assert!((0.0..1.0).contains(&h));
    }

    #[test]
    fn test_full_turn_is_identity() {
        let mut rng = XorShift64::new(1);
        assert!(approx(next_hue(0.3, 1.0, &mut rng), 0.3));
        assert!(approx(next_hue(0.3, -2.0, &mut rng), 0.3));
    }

    #[test]
    fn test_non_finite_step_draws_from_rng() {
        let mut a = XorShift64::new(42);
        let mut b = XorShift64::new(42);
        let expected = b.next_unit();
        assert_eq!(next_hue(0.5, f64::NAN, &mut a), expected);

        for step in [f64::INFINITY, f64::NEG_INFINITY] {
            let h = next_hue(0.5, step, &mut a);
            assert!((0.0..1.0).contains(&h));
        }
    }

    #[test]
    fn test_finite_step_does_not_consume_rng() {
        let mut a = XorShift64::new(9);
        let before = a.clone();
        let _ = next_hue(0.1, 0.2, &mut a);
        assert_eq!(a, before);
    }
}
