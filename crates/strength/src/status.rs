use common::StrengthStatus;

/// Label a strength score. Thresholds are exclusive lower bounds, checked
/// from the top.
pub fn classify(strength: f64) -> StrengthStatus {
    if strength > 3.0 {
        StrengthStatus::VeryStrong
    } else if strength > 1.0 {
        StrengthStatus::Strong
    } else if strength > -1.0 {
        StrengthStatus::Moderate
    } else if strength > -3.0 {
        StrengthStatus::Weak
    } else {
        StrengthStatus::VeryWeak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_exclusive() {
        assert_eq!(classify(3.0), StrengthStatus::Strong);
        assert_eq!(classify(1.0), StrengthStatus::Moderate);
        assert_eq!(classify(-1.0), StrengthStatus::Weak);
        assert_eq!(classify(-3.0), StrengthStatus::VeryWeak);
    }

    #[test]
    fn interior_values() {
        assert_eq!(classify(3.01), StrengthStatus::VeryStrong);
        assert_eq!(classify(25.0), StrengthStatus::VeryStrong);
        assert_eq!(classify(1.6), StrengthStatus::Strong);
        assert_eq!(classify(0.0), StrengthStatus::Moderate);
        assert_eq!(classify(-0.99), StrengthStatus::Moderate);
        assert_eq!(classify(-2.0), StrengthStatus::Weak);
        assert_eq!(classify(-3.5), StrengthStatus::VeryWeak);
    }

    #[test]
    fn nan_falls_through_to_very_weak() {
        assert_eq!(classify(f64::NAN), StrengthStatus::VeryWeak);
    }
}
