use super::common::*;
use crate::workflows::loans::evaluation::{
    required_documents, EligibilityFactor, EligibilityGate, VerdictStatus,
};

#[test]
fn clean_profile_is_approved_with_no_factors() {
    let verdict = engine().assess(&strong_profile());

    assert_eq!(verdict.status, VerdictStatus::Approved);
    assert!(verdict.factors.is_empty());
    assert_eq!(verdict.reason, "All eligibility criteria met");
    assert_eq!(
        verdict.recommendations,
        vec!["Please submit all required documents for final approval".to_string()]
    );
}

#[test]
fn applicant_below_minimum_age_is_rejected() {
    let mut form = strong_form();
    form.date_of_birth = dob_for_age(19);
    let verdict = engine().assess(&profile(&form));

    assert_eq!(verdict.status, VerdictStatus::Rejected);
    assert!(matches!(
        verdict.factors[0],
        EligibilityFactor::AgeBelowMinimum { age: 19, minimum: 21 }
    ));
}

#[test]
fn applicant_above_maximum_age_is_rejected() {
    let mut form = strong_form();
    form.date_of_birth = dob_for_age(70);
    let verdict = engine().assess(&profile(&form));

    assert_eq!(verdict.status, VerdictStatus::Rejected);
    assert!(matches!(
        verdict.factors[0],
        EligibilityFactor::AgeAboveMaximum { age: 70, maximum: 65 }
    ));
}

#[test]
fn unknown_age_skips_the_age_rules() {
    let mut form = strong_form();
    form.date_of_birth = "not-a-date".to_string();
    let verdict = engine().assess(&profile(&form));

    assert_eq!(verdict.status, VerdictStatus::Approved);
    assert!(verdict.factors.is_empty());
}

#[test]
fn income_below_minimum_is_rejected() {
    let mut form = strong_form();
    form.annual_income = "250000".to_string();
    form.loan_amount = "250000".to_string();
    let verdict = engine().assess(&profile(&form));

    assert_eq!(verdict.status, VerdictStatus::Rejected);
    assert!(verdict
        .factors
        .iter()
        .any(|f| matches!(f, EligibilityFactor::IncomeBelowMinimum { .. })));
}

#[test]
fn high_ratio_downgrades_to_conditional() {
    let mut form = strong_form();
    form.loan_amount = "6000000".to_string();
    let verdict = engine().assess(&profile(&form));

    assert_eq!(verdict.status, VerdictStatus::ConditionallyApproved);
    assert!(matches!(
        verdict.factors[0],
        EligibilityFactor::RatioExceeded { ratio, cap } if ratio == 6.0 && cap == 5.0
    ));
    assert_eq!(
        verdict.recommendations,
        vec![
            "Additional verification required".to_string(),
            "Co-applicant may be required".to_string(),
        ]
    );
}

#[test]
fn ratio_rule_never_upgrades_a_rejection() {
    let mut form = strong_form();
    form.date_of_birth = dob_for_age(19);
    form.loan_amount = "6000000".to_string();
    let verdict = engine().assess(&profile(&form));

    assert_eq!(verdict.status, VerdictStatus::Rejected);
    assert_eq!(verdict.factors.len(), 2);
}

#[test]
fn moderate_cibil_is_conditionally_approved() {
    let mut form = strong_form();
    form.cibil_score = "600".to_string();
    let verdict = engine().assess(&profile(&form));

    assert_eq!(verdict.status, VerdictStatus::ConditionallyApproved);
    assert!(matches!(
        verdict.factors[0],
        EligibilityFactor::LowCibil { score: 600, floor: 650 }
    ));
}

#[test]
fn critical_cibil_rejects_regardless_of_strengths() {
    let mut form = strong_form();
    form.cibil_score = "540".to_string();
    let verdict = engine().assess(&profile(&form));

    assert_eq!(verdict.status, VerdictStatus::Rejected);
    assert_eq!(
        verdict.recommendations,
        vec![
            "Improve CIBIL score and reapply after 6 months".to_string(),
            "Consider applying for a smaller loan amount".to_string(),
        ]
    );
}

#[test]
fn unparseable_cibil_counts_as_zero_and_rejects() {
    let mut form = strong_form();
    form.cibil_score = "abc".to_string();
    let verdict = engine().assess(&profile(&form));

    assert_eq!(verdict.status, VerdictStatus::Rejected);
    assert!(matches!(
        verdict.factors[0],
        EligibilityFactor::LowCibil { score: 0, .. }
    ));
}

#[test]
fn weak_applicant_accumulates_factors_in_rule_order() {
    let verdict = engine().assess(&profile(&weak_form()));

    assert_eq!(verdict.status, VerdictStatus::Rejected);
    assert!(matches!(
        verdict.factors[0],
        EligibilityFactor::IncomeBelowMinimum { .. }
    ));
    assert!(matches!(
        verdict.factors[1],
        EligibilityFactor::RatioExceeded { .. }
    ));
    assert!(matches!(
        verdict.factors[2],
        EligibilityFactor::LowCibil { .. }
    ));

    // The rendered reason keeps evaluation order and names both failures.
    assert!(verdict.reason.contains("income"));
    assert!(verdict.reason.contains("CIBIL"));
    let income_at = verdict.reason.find("income").expect("income fragment");
    let cibil_at = verdict.reason.find("CIBIL").expect("cibil fragment");
    assert!(income_at < cibil_at);
}

#[test]
fn documents_cover_employment_and_loan_type() {
    let salaried_home = required_documents("Home Loan", "Salaried");
    assert!(salaried_home.contains(&"Form 16".to_string()));
    assert!(salaried_home.contains(&"Property Documents".to_string()));
    assert!(salaried_home.contains(&"Aadhaar Card".to_string()));

    let business_personal = required_documents("Personal Loan", "Business Owner");
    assert!(business_personal.contains(&"Business Registration".to_string()));
    assert!(!business_personal.contains(&"Form 16".to_string()));
    assert!(!business_personal.contains(&"Property Documents".to_string()));

    let education = required_documents("Educational Loan", "Student");
    assert!(education.contains(&"Admission Letter".to_string()));
}

#[test]
fn gate_tiers_follow_their_thresholds() {
    assert_eq!(engine().gate(&strong_profile()), EligibilityGate::Eligible);

    let mut form = strong_form();
    form.cibil_score = "700".to_string();
    assert_eq!(
        engine().gate(&profile(&form)),
        EligibilityGate::ConditionallyEligible
    );

    assert_eq!(
        engine().gate(&profile(&weak_form())),
        EligibilityGate::NotEligible
    );
}

#[test]
fn gate_requires_known_employment_for_the_clear_tier() {
    let mut form = strong_form();
    form.employment_type = "Freelancer".to_string();
    assert_eq!(
        engine().gate(&profile(&form)),
        EligibilityGate::ConditionallyEligible
    );
}

#[test]
fn gate_treats_zero_income_as_not_eligible() {
    let mut form = strong_form();
    form.annual_income = String::new();
    assert_eq!(engine().gate(&profile(&form)), EligibilityGate::NotEligible);
}

#[test]
fn improvement_suggestions_name_the_failing_dimensions() {
    let suggestions = engine().improvement_suggestions(&profile(&weak_form()));
    assert_eq!(suggestions.len(), 3);
    assert!(suggestions[0].contains("CIBIL"));
    assert!(suggestions[1].contains("income"));
    assert!(suggestions[2].contains("loan amount"));
}
