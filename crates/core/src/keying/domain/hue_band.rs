use super::keying_error::KeyingError;

/// The open interval of hues treated as the key color.
///
/// A hue is keyed iff `center - variance < hue < center + variance`. The
/// interval does not wrap around 0°/360°: a red key centered on 0° matches
/// hues just above 0° but not those just below 360°.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HueBand {
    center: f64,
    variance: f64,
}

impl HueBand {
    pub fn new(center: f64, variance: f64) -> Result<Self, KeyingError> {
        if !(0.0..360.0).contains(&center) {
            return Err(KeyingError::InvalidHue(center));
        }
        if !variance.is_finite() || variance < 0.0 {
            return Err(KeyingError::InvalidVariance(variance));
        }
        Ok(Self { center, variance })
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Exclusive lower bound.
    pub fn lower(&self) -> f64 {
        self.center - self.variance
    }

    /// Exclusive upper bound.
    pub fn upper(&self) -> f64 {
        self.center + self.variance
    }

    #[inline]
    pub fn contains(&self, hue: f64) -> bool {
        self.lower() < hue && hue < self.upper()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_bounds() {
        let band = HueBand::new(120.0, 35.0).unwrap();
        assert_relative_eq!(band.lower(), 85.0);
        assert_relative_eq!(band.upper(), 155.0);
        assert_relative_eq!(band.center(), 120.0);
        assert_relative_eq!(band.variance(), 35.0);
    }

    #[rstest]
    #[case::center(120.0, true)]
    #[case::just_inside_low(85.5, true)]
    #[case::just_inside_high(154.5, true)]
    #[case::lower_bound(85.0, false)]
    #[case::upper_bound(155.0, false)]
    #[case::below(10.0, false)]
    #[case::above(300.0, false)]
    fn test_contains_is_strict(#[case] hue: f64, #[case] expected: bool) {
        let band = HueBand::new(120.0, 35.0).unwrap();
        assert_eq!(band.contains(hue), expected);
    }

    #[test]
    fn test_zero_variance_matches_nothing() {
        let band = HueBand::new(120.0, 0.0).unwrap();
        assert!(!band.contains(120.0));
    }

    #[test]
    fn test_no_wraparound_at_zero() {
        let band = HueBand::new(0.0, 10.0).unwrap();
        assert!(band.contains(0.0));
        assert!(band.contains(9.9));
        assert!(!band.contains(355.0));
    }

    #[rstest]
    #[case::negative(-1.0)]
    #[case::full_turn(360.0)]
    #[case::nan(f64::NAN)]
    fn test_rejects_invalid_center(#[case] center: f64) {
        assert!(matches!(
            HueBand::new(center, 10.0),
            Err(KeyingError::InvalidHue(_))
        ));
    }

    #[rstest]
    #[case::negative(-5.0)]
    #[case::infinite(f64::INFINITY)]
    #[case::nan(f64::NAN)]
    fn test_rejects_invalid_variance(#[case] variance: f64) {
        assert!(matches!(
            HueBand::new(120.0, variance),
            Err(KeyingError::InvalidVariance(_))
        ));
    }
}
