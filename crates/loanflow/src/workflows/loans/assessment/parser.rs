use super::super::evaluation::{Verdict, VerdictStatus};

const DEFAULT_REASON: &str = "Assessment completed";
const DEFAULT_DOCUMENTS: &str = "Identity Proof, Income Proof, Address Proof";
const DEFAULT_RECOMMENDATIONS: &str = "Standard documentation required";

/// Parse the labeled lines of a free-text assessment reply. Any missing
/// label keeps its safe default; an unknown status maps to pending review.
pub(crate) fn parse_assessment_reply(text: &str) -> Verdict {
    let mut status = VerdictStatus::PendingReview;
    let mut reason = DEFAULT_REASON.to_string();
    let mut documents = DEFAULT_DOCUMENTS.to_string();
    let mut recommendations = DEFAULT_RECOMMENDATIONS.to_string();

    for line in text.lines() {
        let line = line.trim();
        if let Some(value) = line.strip_prefix("ELIGIBILITY:") {
            status = VerdictStatus::from_label(value).unwrap_or(VerdictStatus::PendingReview);
        } else if let Some(value) = line.strip_prefix("REASON:") {
            reason = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("DOCUMENTS:") {
            documents = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("RECOMMENDATIONS:") {
            recommendations = value.trim().to_string();
        }
    }

    Verdict {
        status,
        factors: Vec::new(),
        reason,
        documents: split_list(&documents),
        recommendations: vec![recommendations],
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
