use super::super::domain::ApplicantProfile;
use super::config::VerdictThresholds;
use super::policy::{EligibilityFactor, VerdictStatus};

pub(crate) struct RuleOutcome {
    pub(crate) status: VerdictStatus,
    pub(crate) factors: Vec<EligibilityFactor>,
}

/// Evaluate every rule in order, accumulating factors. Rejected is sticky:
/// later rules may add factors but never upgrade the status.
pub(crate) fn evaluate(profile: &ApplicantProfile, thresholds: &VerdictThresholds) -> RuleOutcome {
    let mut factors = Vec::new();
    let mut status = VerdictStatus::Approved;

    if let Some(age) = profile.age {
        if age < thresholds.minimum_age {
            factors.push(EligibilityFactor::AgeBelowMinimum {
                age,
                minimum: thresholds.minimum_age,
            });
            status = VerdictStatus::Rejected;
        } else if age > thresholds.maximum_age {
            factors.push(EligibilityFactor::AgeAboveMaximum {
                age,
                maximum: thresholds.maximum_age,
            });
            status = VerdictStatus::Rejected;
        }
    }

    if profile.annual_income < thresholds.minimum_annual_income {
        factors.push(EligibilityFactor::IncomeBelowMinimum {
            income: profile.annual_income,
            minimum: thresholds.minimum_annual_income,
        });
        status = VerdictStatus::Rejected;
    }

    if profile.annual_income > 0.0 {
        let ratio = profile.loan_amount / profile.annual_income;
        if ratio > thresholds.income_ratio_cap {
            factors.push(EligibilityFactor::RatioExceeded {
                ratio,
                cap: thresholds.income_ratio_cap,
            });
            status = downgrade(status);
        }
    }

    if profile.cibil_score < thresholds.cibil_floor {
        factors.push(EligibilityFactor::LowCibil {
            score: profile.cibil_score,
            floor: thresholds.cibil_floor,
        });
        if profile.cibil_score < thresholds.cibil_reject_below {
            status = VerdictStatus::Rejected;
        } else {
            status = downgrade(status);
        }
    }

    RuleOutcome { status, factors }
}

fn downgrade(status: VerdictStatus) -> VerdictStatus {
    match status {
        VerdictStatus::Approved => VerdictStatus::ConditionallyApproved,
        other => other,
    }
}
