mod config;
mod documents;
mod policy;
mod rules;

pub use config::{EligibilityPolicy, GateThresholds, VerdictThresholds};
pub use documents::required_documents;
pub use policy::{EligibilityFactor, EligibilityGate, Verdict, VerdictStatus};

use super::domain::ApplicantProfile;
use policy::recommendations_for;

/// Stateless evaluator applying the configured policy to an applicant
/// profile. Exposes the detailed verdict and the coarse gate as two views of
/// the same policy object.
pub struct EligibilityEngine {
    policy: EligibilityPolicy,
}

impl EligibilityEngine {
    pub fn new(policy: EligibilityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    /// Detailed verdict: ordered rule factors, required documents, and
    /// status-specific recommendations.
    pub fn assess(&self, profile: &ApplicantProfile) -> Verdict {
        let outcome = rules::evaluate(profile, &self.policy.verdict);
        let documents = required_documents(&profile.loan_type, &profile.employment_type);
        let recommendations = recommendations_for(outcome.status);

        Verdict::from_factors(outcome.status, outcome.factors, documents, recommendations)
    }

    /// Coarse tier used to decide whether scheme matching is worthwhile.
    pub fn gate(&self, profile: &ApplicantProfile) -> EligibilityGate {
        let thresholds = &self.policy.gate;
        let ratio = profile.income_ratio();

        if profile.cibil_score >= thresholds.clear_cibil
            && ratio <= thresholds.clear_ratio_cap
            && profile.annual_income >= thresholds.clear_minimum_income
            && thresholds
                .clear_employment
                .iter()
                .any(|allowed| allowed == &profile.employment_type)
        {
            EligibilityGate::Eligible
        } else if profile.cibil_score >= thresholds.conditional_cibil
            && ratio <= thresholds.conditional_ratio_cap
            && profile.annual_income >= thresholds.conditional_minimum_income
        {
            EligibilityGate::ConditionallyEligible
        } else {
            EligibilityGate::NotEligible
        }
    }

    /// Actionable suggestions for applicants the gate turned away.
    pub fn improvement_suggestions(&self, profile: &ApplicantProfile) -> Vec<String> {
        let mut suggestions = Vec::new();

        if profile.cibil_score < self.policy.verdict.cibil_floor {
            suggestions.push(
                "Improve your CIBIL score by clearing outstanding dues and paying EMIs on time"
                    .to_string(),
            );
        }
        if profile.annual_income < self.policy.verdict.minimum_annual_income {
            suggestions
                .push("Increase your documented annual income before reapplying".to_string());
        }
        if profile.income_ratio() > self.policy.gate.conditional_ratio_cap {
            suggestions.push("Reduce the requested loan amount relative to your income".to_string());
        }

        if suggestions.is_empty() {
            suggestions.push("Review your application details and try again".to_string());
        }

        suggestions
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::new(EligibilityPolicy::default())
    }
}
