use std::sync::Arc;

use crate::infra::{InMemoryApplicationRepository, InMemoryAuditJournal};
use loanflow::error::AppError;
use loanflow::notify::LogNotifier;
use loanflow::workflows::loans::{
    EligibilityEngine, LoanApplicationForm, LoanApplicationService, RuleAssessor, SchemeCatalog,
    SchemeMatcher,
};

/// Run two sample applicants through assessment and scheme matching without
/// touching the filesystem or any external service.
pub(crate) async fn run_demo() -> Result<(), AppError> {
    let repository = Arc::new(InMemoryApplicationRepository::default());
    let journal = Arc::new(InMemoryAuditJournal::default());
    let service = LoanApplicationService::new(
        repository,
        journal,
        Arc::new(RuleAssessor::default()),
        Arc::new(LogNotifier),
        EligibilityEngine::default(),
        SchemeMatcher::new(SchemeCatalog::standard()),
    );

    println!("Loan application demo\n");

    for (label, form) in [
        ("Strong applicant", strong_applicant()),
        ("Weak applicant", weak_applicant()),
    ] {
        println!("== {label}: {} ==", form.full_name);

        let report = service.check_eligibility(&form);
        println!("Eligibility gate: {}", report.eligibility_status);
        if report.eligible {
            println!("Recommended schemes:");
            for entry in &report.recommended_schemes {
                println!(
                    "- {} ({}) score {}",
                    entry.scheme.name, entry.scheme.interest_rate, entry.match_score
                );
            }
        } else {
            println!("Improvement suggestions:");
            for suggestion in &report.improvement_suggestions {
                println!("- {suggestion}");
            }
        }

        let outcome = service.submit(form).await?;
        println!(
            "Submitted as {}: {} ({})",
            outcome.application_id, outcome.eligibility_status, outcome.eligibility_reason
        );
        println!("Next step: {}\n", outcome.next_step);
    }

    Ok(())
}

fn strong_applicant() -> LoanApplicationForm {
    LoanApplicationForm {
        user_email: "asha@example.com".to_string(),
        full_name: "Asha Verma".to_string(),
        date_of_birth: "1995-03-01".to_string(),
        gender: "Female".to_string(),
        marital_status: "Single".to_string(),
        nationality: "Indian".to_string(),
        contact_number: "9999999999".to_string(),
        employment_type: "Salaried".to_string(),
        employer_name: "Acme Ltd".to_string(),
        annual_income: "1000000".to_string(),
        existing_loans: "None".to_string(),
        loan_type: "Personal Loan".to_string(),
        loan_amount: "2000000".to_string(),
        loan_tenure: "5".to_string(),
        loan_purpose: "Home renovation".to_string(),
        preferred_emi: "30000".to_string(),
        cibil_score: "800".to_string(),
    }
}

fn weak_applicant() -> LoanApplicationForm {
    LoanApplicationForm {
        user_email: "ravi@example.com".to_string(),
        full_name: "Ravi Kumar".to_string(),
        date_of_birth: "1986-07-20".to_string(),
        annual_income: "200000".to_string(),
        loan_amount: "3000000".to_string(),
        cibil_score: "500".to_string(),
        loan_type: "Personal Loan".to_string(),
        employment_type: "Salaried".to_string(),
        ..strong_applicant()
    }
}
