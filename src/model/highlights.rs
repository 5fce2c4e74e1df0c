//! Wire contract of the highlights endpoint
//!
//! The backend returns exactly five clause findings, one per known contract
//! category. Deserialization rejects responses missing any of the five keys,
//! so everything past this boundary can assume a fully populated set.

use serde::{Deserialize, Serialize};

use super::risk::{ConfidenceLevel, RiskLevel};

/// The five category keys the backend reports on, in presentation order.
pub const CATEGORY_KEYS: [&str; 5] = [
    "termination",
    "financial",
    "liability",
    "renewal",
    "service",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clause {
    pub heading: String,
    /// Bounded to ~30 words by backend convention, not enforced here.
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseDetails {
    pub clause: Clause,
    /// Bounded to ~20 words by backend convention.
    pub recommendation: String,
    pub risk: RiskLevel,
    pub confidence: ConfidenceLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightsResponse {
    pub termination: ClauseDetails,
    pub financial: ClauseDetails,
    pub liability: ClauseDetails,
    pub renewal: ClauseDetails,
    pub service: ClauseDetails,
}

/// One category's finding, tagged with its wire key. The unit the risk
/// engine consumes.
#[derive(Debug, Clone)]
pub struct ClauseAssessment {
    pub category: String,
    pub details: ClauseDetails,
}

impl HighlightsResponse {
    /// Flatten into per-category assessments, in the fixed category order.
    pub fn into_assessments(self) -> Vec<ClauseAssessment> {
        let Self {
            termination,
            financial,
            liability,
            renewal,
            service,
        } = self;

        [termination, financial, liability, renewal, service]
            .into_iter()
            .zip(CATEGORY_KEYS)
            .map(|(details, key)| ClauseAssessment {
                category: key.to_string(),
                details,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HighlightsRequest {
    pub namespace: String,
}
