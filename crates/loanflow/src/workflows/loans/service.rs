use std::sync::Arc;

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::notify::templates::{alert_email_html, format_currency, AlertTone};
use crate::notify::{Notifier, OutboundEmail};

use super::assessment::Assessor;
use super::domain::{
    ApplicationId, ApplicationStatus, LoanApplicationForm, VerificationStatus,
};
use super::evaluation::{EligibilityEngine, EligibilityGate, Verdict, VerdictStatus};
use super::intake;
use super::repository::{
    ApplicationRecord, ApplicationRepository, ApplicationStatusView, AuditJournal, DocumentUpload,
    HistoryAction, HistoryEntry, NotificationLogEntry, Objection, RepositoryError, UserAlert,
    UserAlertKind,
};
use super::schemes::{SchemeMatch, SchemeMatcher};

/// Service composing intake, assessment, scheme matching, the record store,
/// and notifications.
pub struct LoanApplicationService<R, J> {
    repository: Arc<R>,
    journal: Arc<J>,
    assessor: Arc<dyn Assessor>,
    notifier: Arc<dyn Notifier>,
    engine: EligibilityEngine,
    matcher: SchemeMatcher,
}

/// Error raised by the loan application service.
#[derive(Debug, thiserror::Error)]
pub enum LoanServiceError {
    #[error("application {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Outcome returned to the applicant right after submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub application_id: ApplicationId,
    pub status: &'static str,
    pub eligibility_status: String,
    pub eligibility_reason: String,
    pub required_documents: String,
    pub next_step: &'static str,
}

/// Result of the coarse eligibility check: schemes when the gate clears,
/// improvement suggestions otherwise.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityReport {
    pub eligible: bool,
    pub eligibility_status: &'static str,
    pub recommended_schemes: Vec<SchemeMatch>,
    pub improvement_suggestions: Vec<String>,
}

/// Document metadata submitted alongside an upload.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentSubmission {
    pub document_type: String,
    pub file_name: String,
}

/// Dashboard aggregates over the whole application record set.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub total_applications: usize,
    pub approved: usize,
    pub conditionally_approved: usize,
    pub rejected: usize,
    pub pending_review: usize,
    pub approval_rate: f64,
    pub average_loan_amount: f64,
}

fn next_application_id() -> ApplicationId {
    let token = Uuid::new_v4().simple().to_string();
    ApplicationId(token[..8].to_uppercase())
}

fn record_id() -> String {
    Uuid::new_v4().to_string()
}

impl<R, J> LoanApplicationService<R, J>
where
    R: ApplicationRepository + 'static,
    J: AuditJournal + 'static,
{
    pub fn new(
        repository: Arc<R>,
        journal: Arc<J>,
        assessor: Arc<dyn Assessor>,
        notifier: Arc<dyn Notifier>,
        engine: EligibilityEngine,
        matcher: SchemeMatcher,
    ) -> Self {
        Self {
            repository,
            journal,
            assessor,
            notifier,
            engine,
            matcher,
        }
    }

    /// Submit a new application: assess, persist, alert, and notify.
    pub async fn submit(
        &self,
        form: LoanApplicationForm,
    ) -> Result<SubmissionOutcome, LoanServiceError> {
        let profile = intake::profile_from_form(&form, Local::now().date_naive());

        let verdict = match self.assessor.assess(&profile).await {
            Ok(verdict) => verdict,
            Err(err) => {
                tracing::error!(error = %err, "assessment failed, deferring to manual review");
                manual_review_verdict()
            }
        };

        let application_id = next_application_id();
        let record = ApplicationRecord::new(
            application_id.clone(),
            profile,
            &verdict,
            Utc::now(),
        );
        let stored = self.repository.insert(record)?;

        tracing::info!(
            application_id = %application_id,
            eligibility_status = verdict.status.label(),
            "loan application assessed and stored"
        );

        self.append_history(
            &stored,
            HistoryAction::Submitted,
            "system",
            verdict.status.label(),
        );
        self.push_submission_alert(&stored, &verdict);
        self.dispatch_email(submission_email(&stored, &verdict)).await;

        let next_step = match verdict.status {
            VerdictStatus::Approved | VerdictStatus::ConditionallyApproved => "document_upload",
            VerdictStatus::Rejected | VerdictStatus::PendingReview => "eligibility_review",
        };

        Ok(SubmissionOutcome {
            application_id,
            status: stored.status.label(),
            eligibility_status: stored.eligibility_status.clone(),
            eligibility_reason: stored.eligibility_reason.clone(),
            required_documents: stored.required_documents.clone(),
            next_step,
        })
    }

    /// Fetch an application for API responses.
    pub fn get(&self, id: &ApplicationId) -> Result<ApplicationRecord, LoanServiceError> {
        self.repository
            .fetch(id)?
            .ok_or_else(|| LoanServiceError::NotFound(id.0.clone()))
    }

    pub fn status_view(&self, id: &ApplicationId) -> Result<ApplicationStatusView, LoanServiceError> {
        Ok(self.get(id)?.status_view())
    }

    pub fn applications_for(
        &self,
        user_email: &str,
    ) -> Result<Vec<ApplicationRecord>, LoanServiceError> {
        Ok(self.repository.for_user(user_email)?)
    }

    pub fn alerts_for(&self, user_email: &str) -> Result<Vec<UserAlert>, LoanServiceError> {
        Ok(self.journal.alerts_for_user(user_email)?)
    }

    pub fn history_for(&self, id: &ApplicationId) -> Result<Vec<HistoryEntry>, LoanServiceError> {
        Ok(self.journal.history_for(id)?)
    }

    /// Run the coarse gate; eligible applicants get ranked schemes, others
    /// get improvement suggestions.
    pub fn check_eligibility(&self, form: &LoanApplicationForm) -> EligibilityReport {
        let profile = intake::profile_from_form(form, Local::now().date_naive());
        let gate = self.engine.gate(&profile);

        match gate {
            EligibilityGate::Eligible => EligibilityReport {
                eligible: true,
                eligibility_status: gate.label(),
                recommended_schemes: self.matcher.recommend(&profile),
                improvement_suggestions: Vec::new(),
            },
            EligibilityGate::ConditionallyEligible | EligibilityGate::NotEligible => {
                EligibilityReport {
                    eligible: false,
                    eligibility_status: gate.label(),
                    recommended_schemes: Vec::new(),
                    improvement_suggestions: self.engine.improvement_suggestions(&profile),
                }
            }
        }
    }

    /// Staff approval: overwrite status fields, journal, and notify.
    pub async fn approve(
        &self,
        id: &ApplicationId,
        notes: &str,
        actor: &str,
    ) -> Result<ApplicationRecord, LoanServiceError> {
        let mut record = self.get(id)?;
        record.status = ApplicationStatus::Approved;
        record.eligibility_status = VerdictStatus::Approved.label().to_string();
        record.verification_status = VerificationStatus::Verified;
        if !notes.is_empty() {
            record.admin_notes = notes.to_string();
        }
        record.updated_at = Utc::now();
        self.repository.update(record.clone())?;

        self.append_history(&record, HistoryAction::Approved, actor, notes);
        self.push_alert(
            &record,
            UserAlertKind::StatusUpdate,
            "Loan Application Approved",
            format!(
                "Your loan application {} has been approved after document verification.",
                record.application_id
            ),
            "high",
        );
        self.dispatch_email(decision_email(&record, true)).await;

        Ok(record)
    }

    /// Staff rejection: overwrite status fields, journal, and notify.
    pub async fn reject(
        &self,
        id: &ApplicationId,
        notes: &str,
        actor: &str,
    ) -> Result<ApplicationRecord, LoanServiceError> {
        let mut record = self.get(id)?;
        record.status = ApplicationStatus::Rejected;
        record.eligibility_status = VerdictStatus::Rejected.label().to_string();
        record.verification_status = VerificationStatus::Rejected;
        if !notes.is_empty() {
            record.admin_notes = notes.to_string();
        }
        record.updated_at = Utc::now();
        self.repository.update(record.clone())?;

        self.append_history(&record, HistoryAction::Rejected, actor, notes);
        self.push_alert(
            &record,
            UserAlertKind::Rejection,
            "Loan Application Rejected",
            format!(
                "Your loan application {} was not approved. Please review the reasons and consider reapplying.",
                record.application_id
            ),
            "high",
        );
        self.dispatch_email(decision_email(&record, false)).await;

        Ok(record)
    }

    /// Staff objection: request corrected documents and park the application.
    pub async fn raise_objection(
        &self,
        id: &ApplicationId,
        reason: &str,
        requested_documents: &str,
        actor: &str,
    ) -> Result<Objection, LoanServiceError> {
        let mut record = self.get(id)?;

        let objection = Objection {
            id: record_id(),
            application_id: record.application_id.clone(),
            user_email: record.profile.user_email.clone(),
            reason: reason.to_string(),
            requested_documents: requested_documents.to_string(),
            status: "pending".to_string(),
            created_by: actor.to_string(),
            created_at: Utc::now(),
            resolved_at: None,
        };
        if let Err(err) = self.journal.record_objection(objection.clone()) {
            tracing::warn!(error = %err, "failed to journal objection");
        }

        record.status = ApplicationStatus::ObjectionRaised;
        record.eligibility_status = "OBJECTION_RAISED".to_string();
        record.admin_notes = format!("Objection raised: {reason}");
        record.updated_at = Utc::now();
        self.repository.update(record.clone())?;

        self.append_history(&record, HistoryAction::ObjectionRaised, actor, reason);
        self.push_alert(
            &record,
            UserAlertKind::Objection,
            "Document Resubmission Required",
            format!(
                "An objection was raised on application {}: {}. Requested documents: {}.",
                record.application_id, reason, requested_documents
            ),
            "high",
        );
        self.dispatch_email(objection_email(&record, reason, requested_documents))
            .await;

        Ok(objection)
    }

    /// Register uploaded document metadata and move the application into
    /// verification.
    pub async fn register_documents(
        &self,
        id: &ApplicationId,
        uploads: Vec<DocumentSubmission>,
    ) -> Result<ApplicationRecord, LoanServiceError> {
        let mut record = self.get(id)?;

        let mut file_names: Vec<String> = record
            .uploaded_documents
            .split(", ")
            .filter(|name| !name.is_empty())
            .map(|name| name.to_string())
            .collect();

        for upload in &uploads {
            let entry = DocumentUpload {
                id: record_id(),
                application_id: record.application_id.clone(),
                user_email: record.profile.user_email.clone(),
                document_type: upload.document_type.clone(),
                file_name: upload.file_name.clone(),
                uploaded_at: Utc::now(),
            };
            if let Err(err) = self.journal.record_document(entry) {
                tracing::warn!(error = %err, "failed to journal document upload");
            }
            file_names.push(upload.file_name.clone());
        }

        record.uploaded_documents = file_names.join(", ");
        record.status = ApplicationStatus::DocumentsSubmitted;
        record.verification_status = VerificationStatus::Pending;
        record.updated_at = Utc::now();
        self.repository.update(record.clone())?;

        let applicant = record.profile.user_email.clone();
        self.append_history(&record, HistoryAction::DocumentsUploaded, &applicant, "");
        self.push_alert(
            &record,
            UserAlertKind::StatusUpdate,
            "Documents Received",
            format!(
                "We received {} document(s) for application {}. Verification is in progress.",
                uploads.len(),
                record.application_id
            ),
            "medium",
        );
        self.dispatch_email(documents_email(&record)).await;

        Ok(record)
    }

    /// Aggregates for the staff dashboard.
    pub fn analytics(&self) -> Result<AnalyticsSummary, LoanServiceError> {
        let records = self.repository.all()?;
        let total = records.len();

        let count_by = |label: &str| {
            records
                .iter()
                .filter(|record| record.eligibility_status == label)
                .count()
        };

        let approved = count_by(VerdictStatus::Approved.label());
        let conditionally_approved = count_by(VerdictStatus::ConditionallyApproved.label());
        let rejected = count_by(VerdictStatus::Rejected.label());
        let pending_review = count_by(VerdictStatus::PendingReview.label());

        let approval_rate = if total > 0 {
            approved as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let average_loan_amount = if total > 0 {
            records.iter().map(|r| r.profile.loan_amount).sum::<f64>() / total as f64
        } else {
            0.0
        };

        Ok(AnalyticsSummary {
            total_applications: total,
            approved,
            conditionally_approved,
            rejected,
            pending_review,
            approval_rate,
            average_loan_amount,
        })
    }

    fn append_history(
        &self,
        record: &ApplicationRecord,
        action: HistoryAction,
        actor: &str,
        reason: &str,
    ) {
        let entry = HistoryEntry {
            id: record_id(),
            application_id: record.application_id.clone(),
            user_email: record.profile.user_email.clone(),
            action,
            actor: actor.to_string(),
            reason: reason.to_string(),
            created_at: Utc::now(),
        };
        if let Err(err) = self.journal.record_history(entry) {
            tracing::warn!(error = %err, "failed to journal history entry");
        }
    }

    fn push_alert(
        &self,
        record: &ApplicationRecord,
        kind: UserAlertKind,
        title: &str,
        message: String,
        priority: &str,
    ) {
        let alert = UserAlert {
            id: record_id(),
            user_email: record.profile.user_email.clone(),
            application_id: record.application_id.clone(),
            kind,
            title: title.to_string(),
            message,
            priority: priority.to_string(),
            read: false,
            created_at: Utc::now(),
        };
        if let Err(err) = self.journal.record_alert(alert) {
            tracing::warn!(error = %err, "failed to journal user alert");
        }
    }

    fn push_submission_alert(&self, record: &ApplicationRecord, verdict: &Verdict) {
        match verdict.status {
            VerdictStatus::Approved => self.push_alert(
                record,
                UserAlertKind::DocumentRequired,
                "Documents Required - Loan Application",
                format!(
                    "Congratulations! Your loan application {} is pre-approved. Please submit the required documents to complete the process.",
                    record.application_id
                ),
                "high",
            ),
            VerdictStatus::ConditionallyApproved => self.push_alert(
                record,
                UserAlertKind::ConditionalApproval,
                "Conditional Approval - Additional Requirements",
                format!(
                    "Your loan application {} is conditionally approved. Please review the requirements and submit documents.",
                    record.application_id
                ),
                "medium",
            ),
            VerdictStatus::Rejected => self.push_alert(
                record,
                UserAlertKind::Rejection,
                "Loan Application Not Approved",
                format!(
                    "Unfortunately, your loan application {} does not meet the current eligibility criteria.",
                    record.application_id
                ),
                "high",
            ),
            VerdictStatus::PendingReview => self.push_alert(
                record,
                UserAlertKind::StatusUpdate,
                "Application Under Review",
                format!(
                    "Your loan application {} requires manual review. We will get back to you shortly.",
                    record.application_id
                ),
                "medium",
            ),
        }
    }

    /// Delivery is fire-and-forget; failures are logged and recorded in the
    /// notification log with a `_failed` suffix.
    async fn dispatch_email(&self, email: OutboundEmail) {
        let mut kind = email.kind.clone();
        if let Err(err) = self.notifier.send(&email).await {
            tracing::warn!(error = %err, to = %email.to, "notification delivery failed");
            kind = format!("{kind}_failed");
        }

        let entry = NotificationLogEntry {
            id: record_id(),
            email: email.to.clone(),
            subject: email.subject.clone(),
            message: email.text_body.clone(),
            kind,
            sent_at: Utc::now(),
        };
        if let Err(err) = self.journal.record_notification(entry) {
            tracing::warn!(error = %err, "failed to journal notification");
        }
    }
}

fn manual_review_verdict() -> Verdict {
    Verdict {
        status: VerdictStatus::PendingReview,
        factors: Vec::new(),
        reason: "Manual review required due to assessment error".to_string(),
        documents: vec![
            "Identity Proof".to_string(),
            "Income Proof".to_string(),
            "Address Proof".to_string(),
        ],
        recommendations: vec!["Please contact the bank for manual assessment".to_string()],
    }
}

fn submission_email(record: &ApplicationRecord, verdict: &Verdict) -> OutboundEmail {
    let amount = format_currency(&record.profile.loan_amount.to_string());
    let name = if record.profile.full_name.is_empty() {
        "Applicant"
    } else {
        record.profile.full_name.as_str()
    };

    let (subject, title, tone, body) = match verdict.status {
        VerdictStatus::Approved => (
            format!("Loan Pre-Approval - Application {}", record.application_id),
            "Loan Pre-Approval",
            AlertTone::Success,
            format!(
                "Dear {name},\n\nYour loan application has been pre-approved.\n\n\
                 Application ID: {id}\nLoan Type: {loan_type}\nLoan Amount: {amount}\n\n\
                 Required Documents:\n{documents}\n\n\
                 Please log in to your account and upload these documents to proceed. \
                 This pre-approval is valid for 30 days.",
                id = record.application_id,
                loan_type = record.profile.loan_type,
                documents = verdict.documents_line(),
            ),
        ),
        VerdictStatus::ConditionallyApproved => (
            format!(
                "Conditional Approval - Application {}",
                record.application_id
            ),
            "Conditional Loan Approval",
            AlertTone::Warning,
            format!(
                "Dear {name},\n\nYour loan application received conditional approval.\n\n\
                 Application ID: {id}\nLoan Type: {loan_type}\nLoan Amount: {amount}\n\n\
                 Reason: {reason}\n\nRequired Documents:\n{documents}\n\n\
                 Recommendations:\n{recommendations}",
                id = record.application_id,
                loan_type = record.profile.loan_type,
                reason = verdict.reason,
                documents = verdict.documents_line(),
                recommendations = verdict.recommendations_line(),
            ),
        ),
        VerdictStatus::Rejected => (
            format!(
                "Loan Application Status - Application {}",
                record.application_id
            ),
            "Loan Application Status Update",
            AlertTone::Danger,
            format!(
                "Dear {name},\n\nAfter careful review, your loan application does not \
                 currently meet our eligibility criteria.\n\n\
                 Application ID: {id}\nLoan Type: {loan_type}\nLoan Amount: {amount}\n\n\
                 Reason: {reason}\n\nRecommendations:\n{recommendations}\n\n\
                 You may reapply after addressing these requirements.",
                id = record.application_id,
                loan_type = record.profile.loan_type,
                reason = verdict.reason,
                recommendations = verdict.recommendations_line(),
            ),
        ),
        VerdictStatus::PendingReview => (
            format!(
                "Application Under Review - Application {}",
                record.application_id
            ),
            "Application Under Review",
            AlertTone::Info,
            format!(
                "Dear {name},\n\nYour loan application {id} requires manual review. \
                 Our team will contact you shortly.",
                id = record.application_id,
            ),
        ),
    };

    build_email(record, subject, title, tone, body, "application_status")
}

fn decision_email(record: &ApplicationRecord, approved: bool) -> OutboundEmail {
    let name = record.profile.full_name.clone();
    let (subject, title, tone, body) = if approved {
        (
            format!("Loan Approved - Application {}", record.application_id),
            "Loan Approved",
            AlertTone::Success,
            format!(
                "Dear {name},\n\nYour loan application {id} has been approved after \
                 document verification. Our disbursement team will contact you with \
                 the next steps.",
                id = record.application_id,
            ),
        )
    } else {
        (
            format!("Loan Application Update - Application {}", record.application_id),
            "Loan Application Rejected",
            AlertTone::Danger,
            format!(
                "Dear {name},\n\nWe are unable to approve your loan application {id}.\n\n\
                 Notes: {notes}\n\nYou may reapply once the highlighted concerns are \
                 addressed.",
                id = record.application_id,
                notes = record.admin_notes,
            ),
        )
    };

    build_email(record, subject, title, tone, body, "review_decision")
}

fn objection_email(record: &ApplicationRecord, reason: &str, requested: &str) -> OutboundEmail {
    let body = format!(
        "Dear {name},\n\nAn objection was raised on your loan application {id}.\n\n\
         Reason: {reason}\n\nRequested Documents:\n{requested}\n\n\
         Please upload the requested documents from your dashboard to resume processing.",
        name = record.profile.full_name,
        id = record.application_id,
    );

    build_email(
        record,
        format!(
            "Document Resubmission Required - Application {}",
            record.application_id
        ),
        "Document Resubmission Required",
        AlertTone::Warning,
        body,
        "objection",
    )
}

fn documents_email(record: &ApplicationRecord) -> OutboundEmail {
    let body = format!(
        "Dear {name},\n\nWe received your documents for application {id}:\n{documents}\n\n\
         Our team will verify them and update you on the outcome.",
        name = record.profile.full_name,
        id = record.application_id,
        documents = record.uploaded_documents,
    );

    build_email(
        record,
        format!("Documents Received - Application {}", record.application_id),
        "Documents Received",
        AlertTone::Info,
        body,
        "document_upload",
    )
}

fn build_email(
    record: &ApplicationRecord,
    subject: String,
    title: &str,
    tone: AlertTone,
    body: String,
    kind: &str,
) -> OutboundEmail {
    let html_body = match alert_email_html(title, &body, None, tone) {
        Ok(html) => Some(html),
        Err(err) => {
            tracing::warn!(error = %err, "failed to render email template");
            None
        }
    };

    OutboundEmail {
        to: record.profile.user_email.clone(),
        subject,
        text_body: body,
        html_body,
        kind: kind.to_string(),
    }
}
