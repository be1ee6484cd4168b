use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw submission as received from the application form. Numeric fields stay
/// strings here; intake normalizes them with malformed values defaulting to
/// zero rather than failing the submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanApplicationForm {
    pub user_email: String,
    pub full_name: String,
    /// Date of birth, `YYYY-MM-DD`.
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub marital_status: String,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub employment_type: String,
    #[serde(default)]
    pub employer_name: String,
    #[serde(default)]
    pub annual_income: String,
    #[serde(default)]
    pub existing_loans: String,
    #[serde(default)]
    pub loan_type: String,
    #[serde(default)]
    pub loan_amount: String,
    /// Requested tenure in years.
    #[serde(default)]
    pub loan_tenure: String,
    #[serde(default)]
    pub loan_purpose: String,
    #[serde(default)]
    pub preferred_emi: String,
    #[serde(default)]
    pub cibil_score: String,
}

/// Typed applicant snapshot produced by intake and consumed by the
/// eligibility engine and the scheme matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub user_email: String,
    pub full_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub marital_status: String,
    pub nationality: String,
    pub contact_number: String,
    pub employment_type: String,
    pub employer_name: String,
    pub annual_income: f64,
    pub existing_loans: String,
    pub loan_type: String,
    pub loan_amount: f64,
    pub loan_tenure: String,
    pub loan_purpose: String,
    pub preferred_emi: String,
    pub cibil_score: u16,
    /// Age at submission time; `None` when the date of birth was missing or
    /// unparseable, in which case age-based rules are skipped.
    pub age: Option<u8>,
}

impl ApplicantProfile {
    /// Requested amount relative to annual income; infinite when income is zero.
    pub fn income_ratio(&self) -> f64 {
        if self.annual_income > 0.0 {
            self.loan_amount / self.annual_income
        } else {
            f64::INFINITY
        }
    }
}

/// Workflow state tracked on the stored application record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    EligibilityAssessed,
    DocumentsSubmitted,
    Approved,
    Rejected,
    ObjectionRaised,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::EligibilityAssessed => "eligibility_assessed",
            ApplicationStatus::DocumentsSubmitted => "documents_submitted",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::ObjectionRaised => "objection_raised",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "eligibility_assessed" => Some(Self::EligibilityAssessed),
            "documents_submitted" => Some(Self::DocumentsSubmitted),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "objection_raised" => Some(Self::ObjectionRaised),
            _ => None,
        }
    }
}

/// Staff document-verification state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "verified" => Some(Self::Verified),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}
