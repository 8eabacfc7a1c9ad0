//! Letter grades and their grade-point values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Letter grades recorded on academic history entries.
///
/// `I`, `W`, `P` and `NP` are administrative codes: they appear on a
/// transcript but never enter the GPA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterGrade {
    /// 4.00 grade points.
    A,
    /// 3.70 grade points.
    #[serde(rename = "A-")]
    AMinus,
    /// 3.30 grade points.
    #[serde(rename = "B+")]
    BPlus,
    /// 3.00 grade points.
    B,
    /// 2.70 grade points.
    #[serde(rename = "B-")]
    BMinus,
    /// 2.30 grade points.
    #[serde(rename = "C+")]
    CPlus,
    /// 2.00 grade points.
    C,
    /// 1.70 grade points.
    #[serde(rename = "C-")]
    CMinus,
    /// 1.30 grade points.
    #[serde(rename = "D+")]
    DPlus,
    /// 1.00 grade points.
    D,
    /// 0.70 grade points.
    #[serde(rename = "D-")]
    DMinus,
    /// 0.00 grade points.
    F,
    /// Incomplete.
    I,
    /// Withdrawn.
    W,
    /// Pass (ungraded).
    P,
    /// No pass (ungraded).
    NP,
}

impl LetterGrade {
    /// Parses a grade from its transcript representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A" => Some(Self::A),
            "A-" => Some(Self::AMinus),
            "B+" => Some(Self::BPlus),
            "B" => Some(Self::B),
            "B-" => Some(Self::BMinus),
            "C+" => Some(Self::CPlus),
            "C" => Some(Self::C),
            "C-" => Some(Self::CMinus),
            "D+" => Some(Self::DPlus),
            "D" => Some(Self::D),
            "D-" => Some(Self::DMinus),
            "F" => Some(Self::F),
            "I" => Some(Self::I),
            "W" => Some(Self::W),
            "P" => Some(Self::P),
            "NP" => Some(Self::NP),
            _ => None,
        }
    }

    /// The transcript representation of this grade.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::DMinus => "D-",
            Self::F => "F",
            Self::I => "I",
            Self::W => "W",
            Self::P => "P",
            Self::NP => "NP",
        }
    }

    /// Returns true when this grade enters the GPA.
    #[must_use]
    pub const fn counts_toward_gpa(&self) -> bool {
        !matches!(self, Self::I | Self::W | Self::P | Self::NP)
    }

    /// Default grade points for this grade, when it is a graded letter.
    #[must_use]
    pub fn default_points(&self) -> Option<Decimal> {
        let hundredths = match self {
            Self::A => 400,
            Self::AMinus => 370,
            Self::BPlus => 330,
            Self::B => 300,
            Self::BMinus => 270,
            Self::CPlus => 230,
            Self::C => 200,
            Self::CMinus => 170,
            Self::DPlus => 130,
            Self::D => 100,
            Self::DMinus => 70,
            Self::F => 0,
            Self::I | Self::W | Self::P | Self::NP => return None,
        };
        Some(Decimal::new(hundredths, 2))
    }

    /// Returns true for grades that flag a student as failing.
    #[must_use]
    pub const fn is_failing(&self) -> bool {
        matches!(self, Self::F | Self::D | Self::DMinus)
    }
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_round_trip() {
        for s in [
            "A", "A-", "B+", "B", "B-", "C+", "C", "C-", "D+", "D", "D-", "F", "I", "W", "P", "NP",
        ] {
            let grade = LetterGrade::parse(s).unwrap();
            assert_eq!(grade.as_str(), s);
        }
        assert!(LetterGrade::parse("E").is_none());
    }

    #[test]
    fn test_administrative_codes_do_not_count() {
        assert!(!LetterGrade::I.counts_toward_gpa());
        assert!(!LetterGrade::W.counts_toward_gpa());
        assert!(!LetterGrade::P.counts_toward_gpa());
        assert!(!LetterGrade::NP.counts_toward_gpa());
        assert!(LetterGrade::F.counts_toward_gpa());
    }

    #[test]
    fn test_default_points() {
        assert_eq!(LetterGrade::A.default_points(), Some(dec!(4.00)));
        assert_eq!(LetterGrade::BMinus.default_points(), Some(dec!(2.70)));
        assert_eq!(LetterGrade::F.default_points(), Some(dec!(0.00)));
        assert_eq!(LetterGrade::W.default_points(), None);
    }

    #[test]
    fn test_failing_grades() {
        assert!(LetterGrade::F.is_failing());
        assert!(LetterGrade::D.is_failing());
        assert!(LetterGrade::DMinus.is_failing());
        assert!(!LetterGrade::DPlus.is_failing());
        assert!(!LetterGrade::C.is_failing());
    }
}
