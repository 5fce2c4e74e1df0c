//! Risk scoring and categorization engine
//!
//! Turns the five per-category clause findings of a highlights response into
//! presentation-ready risk items, a normalized 0–100 risk score, and the
//! aggregates the report and dashboard consume. Every function here is pure
//! and synchronous.

use crate::model::highlights::{ClauseAssessment, CATEGORY_KEYS};
use crate::model::risk::{
    RiskAssessment, RiskItem, RiskLevel, RiskScoreLabel, SeverityCounts,
};

/// Display labels for the known category keys. Unknown keys fall back to the
/// raw key.
const CATEGORY_LABELS: [(&str, &str); 5] = [
    ("termination", "Termination Conditions"),
    ("financial", "Financial Obligations"),
    ("liability", "Liability Clauses"),
    ("renewal", "Renewal Terms"),
    ("service", "Service Delivery"),
];

/// Bonus applied per unit of category diversity.
const DIVERSITY_BONUS: f64 = 0.1;
/// Bonus applied per unit of lawyer-required ratio.
const LAWYER_BONUS: f64 = 0.2;

fn category_label(key: &str) -> &str {
    CATEGORY_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

/// Map clause assessments to risk items, preserving input order.
///
/// Total over any input length; scoring downstream treats the actual item
/// count as the population, not the fixed five.
pub fn classify(assessments: Vec<ClauseAssessment>) -> Vec<RiskItem> {
    assessments
        .into_iter()
        .map(|assessment| {
            let ClauseAssessment { category, details } = assessment;
            let label = category_label(&category).to_string();
            RiskItem {
                requires_lawyer: details.risk.requires_lawyer(),
                id: category,
                category: label,
                title: details.clause.heading,
                description: details.clause.description,
                severity: details.risk,
                confidence: details.confidence,
                recommendation: details.recommendation,
            }
        })
        .collect()
}

/// Aggregate a normalized risk score in [0, 100].
///
/// Each item contributes its severity weight scaled by its confidence
/// multiplier. The ceiling is what the same number of items would contribute
/// if all were critical, without confidence adjustment. Two multiplicative
/// bonuses are applied before normalizing: one for category diversity
/// (distinct categories over the fixed five known ones) and one for the
/// fraction of items needing legal review. The diversity divisor stays 5 and
/// the ceiling uses the actual item count even when they disagree; changing
/// either would change scores for existing documents.
pub fn compute_score(items: &[RiskItem]) -> u8 {
    if items.is_empty() {
        return 0;
    }

    let mut total: f64 = items
        .iter()
        .map(|item| item.severity.weight() * item.confidence.multiplier())
        .sum();

    let max_possible = items.len() as f64 * RiskLevel::Critical.weight();

    let mut categories: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
    categories.sort_unstable();
    categories.dedup();
    let diversity_factor = categories.len() as f64 / CATEGORY_KEYS.len() as f64;

    let lawyer_count = items.iter().filter(|item| item.requires_lawyer).count();
    let lawyer_factor = lawyer_count as f64 / items.len() as f64;

    total *= 1.0 + diversity_factor * DIVERSITY_BONUS;
    total *= 1.0 + lawyer_factor * LAWYER_BONUS;

    let normalized = (total / max_possible * 100.0).min(100.0);
    let score = normalized.round() as u8;

    tracing::debug!(
        items = items.len(),
        diversity_factor = diversity_factor,
        lawyer_factor = lawyer_factor,
        normalized = normalized,
        score = score,
        "Computed risk score"
    );

    score
}

/// Qualitative band for a score. Bands are contiguous and exhaustive over
/// 0–100; first match from the top wins.
pub fn label_for_score(score: u8) -> RiskScoreLabel {
    if score >= 80 {
        RiskScoreLabel {
            label: "Critical",
            color: "text-red-600",
            bg_color: "bg-red-50",
        }
    } else if score >= 65 {
        RiskScoreLabel {
            label: "High",
            color: "text-red-500",
            bg_color: "bg-red-50",
        }
    } else if score >= 50 {
        RiskScoreLabel {
            label: "Medium-High",
            color: "text-accent-600",
            bg_color: "bg-accent-50",
        }
    } else if score >= 35 {
        RiskScoreLabel {
            label: "Medium",
            color: "text-warning-600",
            bg_color: "bg-warning-50",
        }
    } else if score >= 20 {
        RiskScoreLabel {
            label: "Low-Medium",
            color: "text-warning-500",
            bg_color: "bg-warning-50",
        }
    } else {
        RiskScoreLabel {
            label: "Low",
            color: "text-success-600",
            bg_color: "bg-success-50",
        }
    }
}

/// Group items by category label, first-seen category order, stable within
/// each category.
pub fn group_by_category(items: &[RiskItem]) -> Vec<(String, Vec<RiskItem>)> {
    let mut groups: Vec<(String, Vec<RiskItem>)> = Vec::new();

    for item in items {
        match groups.iter_mut().find(|(label, _)| *label == item.category) {
            Some((_, group)) => group.push(item.clone()),
            None => groups.push((item.category.clone(), vec![item.clone()])),
        }
    }

    groups
}

/// Count items per severity level.
pub fn severity_counts(items: &[RiskItem]) -> SeverityCounts {
    let mut counts = SeverityCounts::default();
    for item in items {
        match item.severity {
            RiskLevel::Critical => counts.critical += 1,
            RiskLevel::High => counts.high += 1,
            RiskLevel::Medium => counts.medium += 1,
            RiskLevel::Low => counts.low += 1,
        }
    }
    counts
}

/// Run the full engine over one highlights result.
pub fn assess(assessments: Vec<ClauseAssessment>) -> RiskAssessment {
    let items = classify(assessments);
    let score = compute_score(&items);
    let label = label_for_score(score);
    let counts = severity_counts(&items);

    RiskAssessment {
        items,
        score,
        label,
        counts,
    }
}
