use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicantProfile, ApplicationId, ApplicationStatus, VerificationStatus};
use super::evaluation::Verdict;

/// Persistent application record: the applicant snapshot plus verdict and
/// review metadata. `eligibility_status` is a free label because staff
/// actions overwrite it with values outside the verdict vocabulary
/// (e.g. `OBJECTION_RAISED`), a quirk carried over from the record format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub application_id: ApplicationId,
    pub profile: ApplicantProfile,
    pub status: ApplicationStatus,
    pub eligibility_status: String,
    pub eligibility_reason: String,
    pub required_documents: String,
    pub uploaded_documents: String,
    pub admin_notes: String,
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn new(
        application_id: ApplicationId,
        profile: ApplicantProfile,
        verdict: &Verdict,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            application_id,
            profile,
            status: ApplicationStatus::EligibilityAssessed,
            eligibility_status: verdict.status.label().to_string(),
            eligibility_reason: verdict.reason.clone(),
            required_documents: verdict.documents_line(),
            uploaded_documents: String::new(),
            admin_notes: verdict.recommendations_line(),
            verification_status: VerificationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.application_id.clone(),
            status: self.status.label(),
            eligibility_status: self.eligibility_status.clone(),
            eligibility_reason: self.eligibility_reason.clone(),
            required_documents: self.required_documents.clone(),
            verification_status: self.verification_status.label(),
        }
    }
}

/// Sanitized representation of an application's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub status: &'static str,
    pub eligibility_status: String,
    pub eligibility_reason: String,
    pub required_documents: String,
    pub verification_status: &'static str,
}

/// Storage abstraction over the application record set.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn for_user(&self, user_email: &str) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn all(&self) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

/// Error enumeration for record-store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Alert categories shown on the applicant dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserAlertKind {
    DocumentRequired,
    ConditionalApproval,
    Rejection,
    StatusUpdate,
    Objection,
}

impl UserAlertKind {
    pub const fn label(self) -> &'static str {
        match self {
            UserAlertKind::DocumentRequired => "document_required",
            UserAlertKind::ConditionalApproval => "conditional_approval",
            UserAlertKind::Rejection => "rejection",
            UserAlertKind::StatusUpdate => "status_update",
            UserAlertKind::Objection => "objection",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "document_required" => Some(Self::DocumentRequired),
            "conditional_approval" => Some(Self::ConditionalApproval),
            "rejection" => Some(Self::Rejection),
            "status_update" => Some(Self::StatusUpdate),
            "objection" => Some(Self::Objection),
            _ => None,
        }
    }
}

/// Dashboard alert for an applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAlert {
    pub id: String,
    pub user_email: String,
    pub application_id: ApplicationId,
    pub kind: UserAlertKind,
    pub title: String,
    pub message: String,
    pub priority: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle actions recorded in the application history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryAction {
    Submitted,
    Approved,
    Rejected,
    ObjectionRaised,
    DocumentsUploaded,
}

impl HistoryAction {
    pub const fn label(self) -> &'static str {
        match self {
            HistoryAction::Submitted => "submitted",
            HistoryAction::Approved => "approved",
            HistoryAction::Rejected => "rejected",
            HistoryAction::ObjectionRaised => "objection_raised",
            HistoryAction::DocumentsUploaded => "documents_uploaded",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "submitted" => Some(Self::Submitted),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "objection_raised" => Some(Self::ObjectionRaised),
            "documents_uploaded" => Some(Self::DocumentsUploaded),
            _ => None,
        }
    }
}

/// One audit-trail entry for an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub application_id: ApplicationId,
    pub user_email: String,
    pub action: HistoryAction,
    pub actor: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// A staff objection requesting corrected or additional documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objection {
    pub id: String,
    pub application_id: ApplicationId,
    pub user_email: String,
    pub reason: String,
    pub requested_documents: String,
    pub status: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Metadata for an uploaded document; file contents live elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub id: String,
    pub application_id: ApplicationId,
    pub user_email: String,
    pub document_type: String,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Log line for every outbound notification attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationLogEntry {
    pub id: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub kind: String,
    pub sent_at: DateTime<Utc>,
}

/// Append-mostly side-channel record sets: alerts, history, objections,
/// document metadata, and the notification log.
pub trait AuditJournal: Send + Sync {
    fn record_alert(&self, alert: UserAlert) -> Result<(), RepositoryError>;
    fn alerts_for_user(&self, user_email: &str) -> Result<Vec<UserAlert>, RepositoryError>;
    fn record_history(&self, entry: HistoryEntry) -> Result<(), RepositoryError>;
    fn history_for(&self, id: &ApplicationId) -> Result<Vec<HistoryEntry>, RepositoryError>;
    fn record_objection(&self, objection: Objection) -> Result<(), RepositoryError>;
    fn objections_for(&self, id: &ApplicationId) -> Result<Vec<Objection>, RepositoryError>;
    fn record_document(&self, upload: DocumentUpload) -> Result<(), RepositoryError>;
    fn documents_for(&self, id: &ApplicationId) -> Result<Vec<DocumentUpload>, RepositoryError>;
    fn record_notification(&self, entry: NotificationLogEntry) -> Result<(), RepositoryError>;
}
