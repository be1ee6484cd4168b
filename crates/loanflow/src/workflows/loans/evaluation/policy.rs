use serde::{Deserialize, Serialize};

/// Final status of an eligibility assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictStatus {
    Approved,
    ConditionallyApproved,
    Rejected,
    PendingReview,
}

impl VerdictStatus {
    pub const fn label(self) -> &'static str {
        match self {
            VerdictStatus::Approved => "APPROVED",
            VerdictStatus::ConditionallyApproved => "CONDITIONALLY_APPROVED",
            VerdictStatus::Rejected => "REJECTED",
            VerdictStatus::PendingReview => "PENDING_REVIEW",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim() {
            "APPROVED" => Some(Self::Approved),
            "CONDITIONALLY_APPROVED" => Some(Self::ConditionallyApproved),
            "REJECTED" => Some(Self::Rejected),
            "PENDING_REVIEW" => Some(Self::PendingReview),
            _ => None,
        }
    }
}

/// Structured rule findings. Rendering to free text happens at the boundary
/// so tests can assert on variants instead of substrings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EligibilityFactor {
    AgeBelowMinimum { age: u8, minimum: u8 },
    AgeAboveMaximum { age: u8, maximum: u8 },
    IncomeBelowMinimum { income: f64, minimum: f64 },
    RatioExceeded { ratio: f64, cap: f64 },
    LowCibil { score: u16, floor: u16 },
}

impl EligibilityFactor {
    pub fn summary(&self) -> String {
        match self {
            EligibilityFactor::AgeBelowMinimum { minimum, .. } => {
                format!("Applicant below minimum age of {minimum} years")
            }
            EligibilityFactor::AgeAboveMaximum { maximum, .. } => {
                format!("Applicant above maximum age of {maximum} years")
            }
            EligibilityFactor::IncomeBelowMinimum { minimum, .. } => {
                format!("Annual income below minimum requirement of ₹{}", group_inr(*minimum))
            }
            EligibilityFactor::RatioExceeded { cap, .. } => {
                format!("Loan amount exceeds {} times annual income", *cap as u32)
            }
            EligibilityFactor::LowCibil { floor, .. } => {
                format!("CIBIL score below {floor}")
            }
        }
    }
}

/// Render a rupee amount with thousands separators for reason strings.
fn group_inr(amount: f64) -> String {
    let whole = amount.max(0.0) as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Outcome of an eligibility assessment. Rule-based verdicts carry their
/// structured factors; remote verdicts carry only the rendered reason text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub factors: Vec<EligibilityFactor>,
    pub reason: String,
    pub documents: Vec<String>,
    pub recommendations: Vec<String>,
}

impl Verdict {
    /// Build a verdict from rule findings, rendering the reason line.
    pub fn from_factors(
        status: VerdictStatus,
        factors: Vec<EligibilityFactor>,
        documents: Vec<String>,
        recommendations: Vec<String>,
    ) -> Self {
        let reason = if factors.is_empty() {
            "All eligibility criteria met".to_string()
        } else {
            factors
                .iter()
                .map(EligibilityFactor::summary)
                .collect::<Vec<_>>()
                .join("; ")
        };

        Self {
            status,
            factors,
            reason,
            documents,
            recommendations,
        }
    }

    pub fn documents_line(&self) -> String {
        self.documents.join(", ")
    }

    pub fn recommendations_line(&self) -> String {
        self.recommendations.join("; ")
    }
}

/// Coarse eligibility tier deciding whether scheme matching runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilityGate {
    Eligible,
    ConditionallyEligible,
    NotEligible,
}

impl EligibilityGate {
    pub const fn label(self) -> &'static str {
        match self {
            EligibilityGate::Eligible => "ELIGIBLE",
            EligibilityGate::ConditionallyEligible => "CONDITIONALLY_ELIGIBLE",
            EligibilityGate::NotEligible => "NOT_ELIGIBLE",
        }
    }
}

pub(crate) fn recommendations_for(status: VerdictStatus) -> Vec<String> {
    match status {
        VerdictStatus::Rejected => vec![
            "Improve CIBIL score and reapply after 6 months".to_string(),
            "Consider applying for a smaller loan amount".to_string(),
        ],
        VerdictStatus::ConditionallyApproved => vec![
            "Additional verification required".to_string(),
            "Co-applicant may be required".to_string(),
        ],
        VerdictStatus::Approved | VerdictStatus::PendingReview => {
            vec!["Please submit all required documents for final approval".to_string()]
        }
    }
}
