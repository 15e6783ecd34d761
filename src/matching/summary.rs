use crate::matching::matcher::Match;
use serde::{Deserialize, Serialize};

/// Score tier used to group matches for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Score 80 and above.
    High,
    /// Score 60–79.
    Medium,
    /// Score below 60.
    Low,
}

impl MatchTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => MatchTier::High,
            60..=79 => MatchTier::Medium,
            _ => MatchTier::Low,
        }
    }
}

/// Match counts per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl MatchSummary {
    pub fn from_matches(matches: &[Match]) -> Self {
        matches
            .iter()
            .fold(Self::default(), |mut summary, m| {
                summary.total += 1;
                match MatchTier::from_score(m.match_score) {
                    MatchTier::High => summary.high += 1,
                    MatchTier::Medium => summary.medium += 1,
                    MatchTier::Low => summary.low += 1,
                }
                summary
            })
    }
}

impl std::fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Match Summary ===")?;
        writeln!(f, "Total:          {}", self.total)?;
        writeln!(f, "High (>=80):    {}", self.high)?;
        writeln!(f, "Medium (60-79): {}", self.medium)?;
        writeln!(f, "Low (<60):      {}", self.low)?;
        Ok(())
    }
}
