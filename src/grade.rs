use crate::types::Grade;

/// Converts an overall mark into a letter grade.
///
/// | Range   | Grade |
/// |---------|-------|
/// | >= 70   | A     |
/// | >= 60   | B     |
/// | >= 50   | C     |
/// | >= 40   | D     |
/// | < 40    | F     |
///
/// The mark is used at full precision; a NaN mark grades as `F`.
pub fn grade(mark: f64) -> Grade {
    match mark {
        m if m >= 70.0 => Grade::A,
        m if m >= 60.0 => Grade::B,
        m if m >= 50.0 => Grade::C,
        m if m >= 40.0 => Grade::D,
        _ => Grade::F,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(grade(100.0), Grade::A);
        assert_eq!(grade(70.0), Grade::A);
        assert_eq!(grade(69.999), Grade::B);
        assert_eq!(grade(60.0), Grade::B);
        assert_eq!(grade(59.999), Grade::C);
        assert_eq!(grade(50.0), Grade::C);
        assert_eq!(grade(49.999), Grade::D);
        assert_eq!(grade(40.0), Grade::D);
        assert_eq!(grade(39.999), Grade::F);
        assert_eq!(grade(0.0), Grade::F);
    }

    #[test]
    fn test_grade_is_total() {
        assert_eq!(grade(f64::NAN), Grade::F);
        assert_eq!(grade(-5.0), Grade::F);
        assert_eq!(grade(150.0), Grade::A);
        assert_eq!(grade(f64::INFINITY), Grade::A);
    }

    #[test]
    fn test_grade_uses_unrounded_mark() {
        // Displays as 70.00 but stays below the boundary.
        assert_eq!(grade(69.9999999), Grade::B);
    }
}
