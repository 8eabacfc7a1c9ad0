//! Deal pipeline stages.

use serde::{Deserialize, Serialize};

/// Stages a deal moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealStage {
    /// Initial outreach.
    Prospecting,
    /// Qualifying fit and budget.
    Qualification,
    /// Understanding requirements.
    #[serde(rename = "Needs Analysis")]
    NeedsAnalysis,
    /// Proposal delivered.
    Proposal,
    /// Terms under negotiation.
    Negotiation,
    /// Awaiting a decision.
    Decision,
    /// Won.
    #[serde(rename = "Closed Won")]
    ClosedWon,
    /// Lost.
    #[serde(rename = "Closed Lost")]
    ClosedLost,
}

impl DealStage {
    /// Parses a stage from its wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Prospecting" => Some(Self::Prospecting),
            "Qualification" => Some(Self::Qualification),
            "Needs Analysis" => Some(Self::NeedsAnalysis),
            "Proposal" => Some(Self::Proposal),
            "Negotiation" => Some(Self::Negotiation),
            "Decision" => Some(Self::Decision),
            "Closed Won" => Some(Self::ClosedWon),
            "Closed Lost" => Some(Self::ClosedLost),
            _ => None,
        }
    }

    /// The wire representation of this stage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prospecting => "Prospecting",
            Self::Qualification => "Qualification",
            Self::NeedsAnalysis => "Needs Analysis",
            Self::Proposal => "Proposal",
            Self::Negotiation => "Negotiation",
            Self::Decision => "Decision",
            Self::ClosedWon => "Closed Won",
            Self::ClosedLost => "Closed Lost",
        }
    }

    /// All open stages, in pipeline order.
    #[must_use]
    pub const fn open_stages() -> [Self; 6] {
        [
            Self::Prospecting,
            Self::Qualification,
            Self::NeedsAnalysis,
            Self::Proposal,
            Self::Negotiation,
            Self::Decision,
        ]
    }

    /// Win probability implied by the stage, in percent.
    #[must_use]
    pub const fn probability(&self) -> i32 {
        match self {
            Self::Prospecting => 10,
            Self::Qualification => 20,
            Self::NeedsAnalysis => 30,
            Self::Proposal => 50,
            Self::Negotiation => 70,
            Self::Decision => 80,
            Self::ClosedWon => 100,
            Self::ClosedLost => 0,
        }
    }

    /// The next open stage, if any. Closed deals do not advance.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::Prospecting => Some(Self::Qualification),
            Self::Qualification => Some(Self::NeedsAnalysis),
            Self::NeedsAnalysis => Some(Self::Proposal),
            Self::Proposal => Some(Self::Negotiation),
            Self::Negotiation => Some(Self::Decision),
            Self::Decision | Self::ClosedWon | Self::ClosedLost => None,
        }
    }

    /// Returns true when the deal has closed either way.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::ClosedWon | Self::ClosedLost)
    }
}

impl std::fmt::Display for DealStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_ladder() {
        assert_eq!(DealStage::Prospecting.probability(), 10);
        assert_eq!(DealStage::Qualification.probability(), 20);
        assert_eq!(DealStage::NeedsAnalysis.probability(), 30);
        assert_eq!(DealStage::Proposal.probability(), 50);
        assert_eq!(DealStage::Negotiation.probability(), 70);
        assert_eq!(DealStage::Decision.probability(), 80);
        assert_eq!(DealStage::ClosedWon.probability(), 100);
        assert_eq!(DealStage::ClosedLost.probability(), 0);
    }

    #[test]
    fn test_advance_walks_the_open_ladder() {
        let mut stage = DealStage::Prospecting;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            stage = next;
            seen.push(stage);
        }
        assert_eq!(seen, DealStage::open_stages());
    }

    #[test]
    fn test_closed_deals_do_not_advance() {
        assert_eq!(DealStage::ClosedWon.next(), None);
        assert_eq!(DealStage::ClosedLost.next(), None);
        assert!(DealStage::ClosedWon.is_closed());
        assert!(!DealStage::Decision.is_closed());
    }

    #[test]
    fn test_parse_round_trip() {
        for s in [
            "Prospecting",
            "Qualification",
            "Needs Analysis",
            "Proposal",
            "Negotiation",
            "Decision",
            "Closed Won",
            "Closed Lost",
        ] {
            assert_eq!(DealStage::parse(s).unwrap().as_str(), s);
        }
        assert!(DealStage::parse("Discovery").is_none());
    }
}
