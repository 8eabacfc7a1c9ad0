//! Lead scoring from qualification criteria.

use chrono::{DateTime, Duration, Utc};

/// Contact within this many days earns the engagement bonus.
pub const RECENT_CONTACT_DAYS: i64 = 7;

/// Qualification state of a lead.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadQualification {
    /// The contact can make the purchase decision.
    pub decision_maker: bool,
    /// Budget has been confirmed.
    pub budget: bool,
    /// A concrete need has been established.
    pub need: bool,
    /// A purchase timeline exists.
    pub timeline: bool,
    /// When the lead was last contacted.
    pub last_contact: Option<DateTime<Utc>>,
}

/// Scores a lead 0-100.
///
/// Each confirmed qualification criterion is worth 25 points; contact within
/// the last week adds 10. The score is capped at 100.
#[must_use]
pub fn lead_score(qualification: &LeadQualification, now: DateTime<Utc>) -> i32 {
    let mut score = 0;

    if qualification.decision_maker {
        score += 25;
    }
    if qualification.budget {
        score += 25;
    }
    if qualification.need {
        score += 25;
    }
    if qualification.timeline {
        score += 25;
    }

    if qualification
        .last_contact
        .is_some_and(|at| now - at < Duration::days(RECENT_CONTACT_DAYS))
    {
        score += 10;
    }

    score.min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unqualified_lead_scores_zero() {
        assert_eq!(lead_score(&LeadQualification::default(), Utc::now()), 0);
    }

    #[test]
    fn test_each_criterion_is_25() {
        let q = LeadQualification {
            decision_maker: true,
            need: true,
            ..LeadQualification::default()
        };
        assert_eq!(lead_score(&q, Utc::now()), 50);
    }

    #[test]
    fn test_recent_contact_bonus() {
        let now = Utc::now();
        let q = LeadQualification {
            budget: true,
            last_contact: Some(now - Duration::days(2)),
            ..LeadQualification::default()
        };
        assert_eq!(lead_score(&q, now), 35);
    }

    #[test]
    fn test_stale_contact_earns_no_bonus() {
        let now = Utc::now();
        let q = LeadQualification {
            budget: true,
            last_contact: Some(now - Duration::days(30)),
            ..LeadQualification::default()
        };
        assert_eq!(lead_score(&q, now), 25);
    }

    #[test]
    fn test_fully_qualified_recent_lead_caps_at_100() {
        let now = Utc::now();
        let q = LeadQualification {
            decision_maker: true,
            budget: true,
            need: true,
            timeline: true,
            last_contact: Some(now - Duration::hours(1)),
        };
        assert_eq!(lead_score(&q, now), 100);
    }
}
