//! GPA and attendance computation.
//!
//! GPA is never stored; callers fetch the completed records and recompute on
//! demand.

use rust_decimal::Decimal;

use super::LetterGrade;

/// One completed course as input to the GPA computation.
#[derive(Debug, Clone)]
pub struct GradedCourse {
    /// The recorded letter grade.
    pub grade: LetterGrade,
    /// Grade points earned (0.00 - 4.00).
    pub grade_points: Decimal,
    /// Credit hours for the course.
    pub credits: Decimal,
}

/// Computes a cumulative GPA over completed course records.
///
/// Administrative codes (I, W, P, NP) are excluded. An F still contributes
/// its credits to the denominator. Returns 0 when no record qualifies.
#[must_use]
pub fn cumulative_gpa(records: &[GradedCourse]) -> Decimal {
    let mut total_points = Decimal::ZERO;
    let mut total_credits = Decimal::ZERO;

    for record in records {
        if !record.grade.counts_toward_gpa() {
            continue;
        }
        total_points += record.grade_points * record.credits;
        total_credits += record.credits;
    }

    if total_credits.is_zero() {
        return Decimal::ZERO;
    }

    (total_points / total_credits).round_dp(2)
}

/// Computes an attendance percentage, rounded to the nearest whole percent.
///
/// Returns `None` when no sessions have been held yet.
#[must_use]
pub fn attendance_percentage(attended_sessions: i32, total_sessions: i32) -> Option<Decimal> {
    if total_sessions <= 0 {
        return None;
    }

    let attended = Decimal::from(attended_sessions);
    let total = Decimal::from(total_sessions);
    Some((attended / total * Decimal::ONE_HUNDRED).round_dp(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn graded(grade: LetterGrade, credits: Decimal) -> GradedCourse {
        GradedCourse {
            grade,
            grade_points: grade.default_points().unwrap_or(Decimal::ZERO),
            credits,
        }
    }

    #[test]
    fn test_empty_record_set_is_zero() {
        assert_eq!(cumulative_gpa(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_only_administrative_codes_is_zero() {
        let records = vec![graded(LetterGrade::W, dec!(3)), graded(LetterGrade::P, dec!(2))];
        assert_eq!(cumulative_gpa(&records), Decimal::ZERO);
    }

    #[test]
    fn test_f_contributes_credits_but_no_points() {
        // A (4.0 x 3cr) + F (0.0 x 3cr) = 12 points over 6 credits = 2.00
        let records = vec![graded(LetterGrade::A, dec!(3)), graded(LetterGrade::F, dec!(3))];
        assert_eq!(cumulative_gpa(&records), dec!(2.00));
    }

    #[test]
    fn test_single_f_is_zero_not_empty() {
        let records = vec![graded(LetterGrade::F, dec!(3))];
        assert_eq!(cumulative_gpa(&records), dec!(0.00));
    }

    #[test]
    fn test_weighted_mix() {
        // B+ (3.3 x 4cr) + C (2.0 x 2cr) = 17.2 points over 6 credits = 2.87
        let records = vec![
            graded(LetterGrade::BPlus, dec!(4)),
            graded(LetterGrade::C, dec!(2)),
        ];
        assert_eq!(cumulative_gpa(&records), dec!(2.87));
    }

    #[test]
    fn test_administrative_codes_are_skipped_in_mix() {
        let with_withdrawal = vec![
            graded(LetterGrade::A, dec!(3)),
            graded(LetterGrade::W, dec!(3)),
        ];
        assert_eq!(cumulative_gpa(&with_withdrawal), dec!(4.00));
    }

    #[test]
    fn test_attendance_percentage() {
        assert_eq!(attendance_percentage(18, 20), Some(dec!(90)));
        assert_eq!(attendance_percentage(1, 3), Some(dec!(33)));
        assert_eq!(attendance_percentage(0, 10), Some(dec!(0)));
    }

    #[test]
    fn test_attendance_without_sessions() {
        assert_eq!(attendance_percentage(0, 0), None);
        assert_eq!(attendance_percentage(5, -1), None);
    }

    proptest::proptest! {
        #[test]
        fn prop_gpa_stays_on_the_four_point_scale(
            points in proptest::collection::vec(0u32..=400, 0..12),
            credits in proptest::collection::vec(1u32..=6, 0..12),
        ) {
            let records: Vec<GradedCourse> = points
                .iter()
                .zip(credits.iter())
                .map(|(&p, &c)| GradedCourse {
                    grade: LetterGrade::B,
                    grade_points: Decimal::new(i64::from(p), 2),
                    credits: Decimal::from(c),
                })
                .collect();

            let gpa = cumulative_gpa(&records);
            proptest::prop_assert!(gpa >= Decimal::ZERO);
            proptest::prop_assert!(gpa <= dec!(4.00));
        }
    }
}
