use chrono::{Datelike, NaiveDate};

use super::domain::{ApplicantProfile, LoanApplicationForm};

/// Normalize a raw form into a typed applicant profile.
///
/// Malformed numeric fields default to zero and a missing or unparseable
/// date of birth leaves the age unknown; intake never rejects a submission.
pub fn profile_from_form(form: &LoanApplicationForm, as_of: NaiveDate) -> ApplicantProfile {
    ApplicantProfile {
        user_email: form.user_email.clone(),
        full_name: form.full_name.clone(),
        date_of_birth: form.date_of_birth.clone(),
        gender: form.gender.clone(),
        marital_status: form.marital_status.clone(),
        nationality: form.nationality.clone(),
        contact_number: form.contact_number.clone(),
        employment_type: form.employment_type.clone(),
        employer_name: form.employer_name.clone(),
        annual_income: parse_amount(&form.annual_income),
        existing_loans: form.existing_loans.clone(),
        loan_type: form.loan_type.clone(),
        loan_amount: parse_amount(&form.loan_amount),
        loan_tenure: form.loan_tenure.clone(),
        loan_purpose: form.loan_purpose.clone(),
        preferred_emi: form.preferred_emi.clone(),
        cibil_score: parse_cibil(&form.cibil_score),
        age: age_on(&form.date_of_birth, as_of),
    }
}

fn parse_amount(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

/// Credit scores must be plain digit strings; anything else counts as zero,
/// which the rule engine treats as a critically low score.
fn parse_cibil(raw: &str) -> u16 {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    trimmed.parse::<u16>().unwrap_or(0)
}

/// Completed years between the date of birth and `as_of`.
pub fn age_on(date_of_birth: &str, as_of: NaiveDate) -> Option<u8> {
    let dob = NaiveDate::parse_from_str(date_of_birth.trim(), "%Y-%m-%d").ok()?;
    let mut years = as_of.year() - dob.year();
    if (as_of.month(), as_of.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    Some(years.clamp(0, u8::MAX as i32) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date")
    }

    #[test]
    fn age_counts_completed_years_only() {
        assert_eq!(age_on("1996-06-15", as_of()), Some(30));
        assert_eq!(age_on("1996-06-16", as_of()), Some(29));
        assert_eq!(age_on("1996-12-01", as_of()), Some(29));
    }

    #[test]
    fn age_is_unknown_for_bad_input() {
        assert_eq!(age_on("", as_of()), None);
        assert_eq!(age_on("15/06/1996", as_of()), None);
        assert_eq!(age_on("not-a-date", as_of()), None);
    }

    #[test]
    fn malformed_numeric_fields_default_to_zero() {
        let form = LoanApplicationForm {
            annual_income: "abc".to_string(),
            loan_amount: "".to_string(),
            cibil_score: "72O".to_string(),
            ..LoanApplicationForm::default()
        };

        let profile = profile_from_form(&form, as_of());
        assert_eq!(profile.annual_income, 0.0);
        assert_eq!(profile.loan_amount, 0.0);
        assert_eq!(profile.cibil_score, 0);
    }

    #[test]
    fn well_formed_numeric_fields_parse() {
        let form = LoanApplicationForm {
            annual_income: " 1000000 ".to_string(),
            loan_amount: "2000000".to_string(),
            cibil_score: "800".to_string(),
            date_of_birth: "1996-03-01".to_string(),
            ..LoanApplicationForm::default()
        };

        let profile = profile_from_form(&form, as_of());
        assert_eq!(profile.annual_income, 1_000_000.0);
        assert_eq!(profile.loan_amount, 2_000_000.0);
        assert_eq!(profile.cibil_score, 800);
        assert_eq!(profile.age, Some(30));
    }

    #[test]
    fn cibil_overflow_counts_as_zero() {
        let form = LoanApplicationForm {
            cibil_score: "99999".to_string(),
            ..LoanApplicationForm::default()
        };
        assert_eq!(profile_from_form(&form, as_of()).cibil_score, 0);
    }

    #[test]
    fn income_ratio_is_infinite_for_zero_income() {
        let form = LoanApplicationForm {
            loan_amount: "500000".to_string(),
            ..LoanApplicationForm::default()
        };
        let profile = profile_from_form(&form, as_of());
        assert!(profile.income_ratio().is_infinite());
    }
}
