//! Loan application intake, eligibility assessment, and scheme recommendation.
//!
//! Submissions arrive as raw form data, are normalized into a typed applicant
//! profile, assessed (remote backend with a deterministic rule fallback), and
//! persisted with their verdict. Staff review actions, document uploads, and
//! objections append to the audit journal and trigger notifications.

pub mod assessment;
pub mod domain;
pub mod evaluation;
pub mod intake;
pub mod repository;
pub mod router;
pub mod schemes;
pub mod service;

#[cfg(test)]
mod tests;

pub use assessment::{Assessor, AssessmentError, FallbackAssessor, RemoteAssessor, RuleAssessor};
pub use domain::{
    ApplicantProfile, ApplicationId, ApplicationStatus, LoanApplicationForm, VerificationStatus,
};
pub use evaluation::{
    EligibilityEngine, EligibilityFactor, EligibilityGate, EligibilityPolicy, GateThresholds,
    Verdict, VerdictStatus, VerdictThresholds,
};
pub use repository::{
    ApplicationRecord, ApplicationRepository, ApplicationStatusView, AuditJournal, DocumentUpload,
    HistoryAction, HistoryEntry, NotificationLogEntry, Objection, RepositoryError, UserAlert,
    UserAlertKind,
};
pub use router::loan_router;
pub use schemes::{LoanScheme, SchemeCatalog, SchemeMatch, SchemeMatcher};
pub use service::{
    AnalyticsSummary, DocumentSubmission, EligibilityReport, LoanApplicationService,
    LoanServiceError, SubmissionOutcome,
};
