//! Risk analysis report generation
//!
//! Renders the exportable report as Markdown: overall score, severity
//! breakdown, then every risk item grouped by category in first-seen order.
//! PDF rendering is left to whatever consumes the Markdown.

use chrono::Utc;

use crate::model::risk::RiskAssessment;
use crate::service::risk::group_by_category;

pub fn render_report(assessment: &RiskAssessment) -> String {
    let mut out = String::new();

    out.push_str("# Risk Analysis Report\n\n");
    out.push_str(&format!(
        "Generated: {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!(
        "Risk Score: {}/100 ({})\n\n",
        assessment.score, assessment.label.label
    ));

    out.push_str(&format!("- Critical Risks: {}\n", assessment.counts.critical));
    out.push_str(&format!("- High Risks: {}\n", assessment.counts.high));
    out.push_str(&format!("- Medium Risks: {}\n", assessment.counts.medium));
    out.push_str(&format!("- Low Risks: {}\n", assessment.counts.low));

    for (category, items) in group_by_category(&assessment.items) {
        out.push_str(&format!("\n## {}\n", category));

        for item in items {
            out.push_str(&format!("\n### {}\n\n", item.title));
            out.push_str(&format!("- **Severity:** {}\n", item.severity));
            out.push_str(&format!("- **Confidence:** {}\n", item.confidence));
            out.push_str(&format!("- **Description:** {}\n", item.description));
            out.push_str(&format!("- **Recommendation:** {}\n", item.recommendation));
            if item.requires_lawyer {
                out.push_str("- **Note:** Legal consultation recommended\n");
            }
        }
    }

    out
}
