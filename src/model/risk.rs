use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity assigned to a single clause finding by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Base weight contributed to the aggregate risk score.
    pub const fn weight(self) -> f64 {
        match self {
            RiskLevel::Critical => 10.0,
            RiskLevel::High => 7.0,
            RiskLevel::Medium => 4.0,
            RiskLevel::Low => 1.0,
        }
    }

    /// Whether a finding at this severity warrants legal consultation.
    pub const fn requires_lawyer(self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Critical => "critical",
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        };
        f.write_str(s)
    }
}

/// Backend confidence in a clause finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// Multiplier applied to a finding's base weight. Only the numerator of
    /// the score is confidence-adjusted; the ceiling is not.
    pub const fn multiplier(self) -> f64 {
        match self {
            ConfidenceLevel::High => 1.0,
            ConfidenceLevel::Medium => 0.8,
            ConfidenceLevel::Low => 0.6,
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        };
        f.write_str(s)
    }
}

/// Presentation-ready form of one clause finding.
///
/// Constructed once per highlights response and immutable afterwards; held
/// only in session state, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskItem {
    /// Stable identifier: the raw category key from the wire.
    pub id: String,
    /// Human-readable category label.
    pub category: String,
    pub title: String,
    pub description: String,
    pub severity: RiskLevel,
    pub confidence: ConfidenceLevel,
    pub recommendation: String,
    pub requires_lawyer: bool,
}

/// Qualitative band for a 0–100 risk score, with presentation hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskScoreLabel {
    pub label: &'static str,
    pub color: &'static str,
    pub bg_color: &'static str,
}

/// Per-severity item counts. Invariant: the four fields sum to the number of
/// items they were computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// Everything the risk engine derives from one highlights response.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub items: Vec<RiskItem>,
    pub score: u8,
    pub label: RiskScoreLabel,
    pub counts: SeverityCounts,
}
