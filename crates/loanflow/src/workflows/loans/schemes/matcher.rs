use serde::Serialize;

use super::super::domain::ApplicantProfile;
use super::catalog::{LoanScheme, SchemeCatalog};

/// Age substituted when the date of birth was unparseable.
const DEFAULT_MATCH_AGE: u8 = 30;

/// How many schemes a recommendation returns at most.
const MAX_RECOMMENDATIONS: usize = 3;

/// A scheme paired with its heuristic fit score. Derived per request, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemeMatch {
    pub scheme: LoanScheme,
    pub match_score: u8,
}

/// Filters the catalog down to eligible schemes and ranks them by an
/// additive fit score.
pub struct SchemeMatcher {
    catalog: SchemeCatalog,
}

impl SchemeMatcher {
    pub fn new(catalog: SchemeCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &SchemeCatalog {
        &self.catalog
    }

    /// Top matches in descending score order; ties keep catalog order.
    pub fn recommend(&self, profile: &ApplicantProfile) -> Vec<SchemeMatch> {
        let mut matches: Vec<SchemeMatch> = self
            .catalog
            .schemes()
            .iter()
            .filter(|scheme| is_eligible(profile, scheme))
            .map(|scheme| SchemeMatch {
                scheme: scheme.clone(),
                match_score: match_score(profile, scheme),
            })
            .collect();

        matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        matches.truncate(MAX_RECOMMENDATIONS);
        matches
    }
}

/// All bound checks must pass for a scheme to be recommended.
pub fn is_eligible(profile: &ApplicantProfile, scheme: &LoanScheme) -> bool {
    let loan_type = profile.loan_type.to_lowercase();
    if !scheme.loan_type.to_lowercase().contains(&loan_type) {
        return false;
    }

    if profile.loan_amount < scheme.min_amount || profile.loan_amount > scheme.max_amount {
        return false;
    }

    if profile.annual_income < scheme.min_income {
        return false;
    }

    let age = profile.age.unwrap_or(DEFAULT_MATCH_AGE);
    if age < scheme.eligibility.min_age || age > scheme.eligibility.max_age {
        return false;
    }

    if profile.cibil_score < scheme.eligibility.min_cibil {
        return false;
    }

    scheme
        .eligibility
        .employment
        .iter()
        .any(|allowed| *allowed == profile.employment_type)
}

/// Additive fit score over four independent factors, capped at 100.
pub fn match_score(profile: &ApplicantProfile, scheme: &LoanScheme) -> u8 {
    let mut score: u32 = 0;

    let ratio = profile.income_ratio();
    if ratio <= 3.0 {
        score += 30;
    } else if ratio <= 5.0 {
        score += 20;
    } else if ratio <= 7.0 {
        score += 10;
    }

    if profile.cibil_score >= 800 {
        score += 25;
    } else if profile.cibil_score >= 750 {
        score += 20;
    } else if profile.cibil_score >= 700 {
        score += 15;
    } else if profile.cibil_score >= 650 {
        score += 10;
    }

    let midpoint = scheme.amount_midpoint();
    if midpoint > 0.0 && ((profile.loan_amount - midpoint).abs() / midpoint) <= 0.5 {
        score += 20;
    }

    if profile.annual_income >= scheme.min_income * 2.0 {
        score += 15;
    } else if profile.annual_income >= scheme.min_income * 1.5 {
        score += 10;
    } else if profile.annual_income >= scheme.min_income {
        score += 5;
    }

    score.min(100) as u8
}
