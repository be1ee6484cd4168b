use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::notify::{Notifier, NotifyError, OutboundEmail};
use crate::workflows::loans::assessment::{AssessmentError, Assessor, RuleAssessor};
use crate::workflows::loans::domain::{ApplicantProfile, ApplicationId, LoanApplicationForm};
use crate::workflows::loans::evaluation::{EligibilityEngine, Verdict};
use crate::workflows::loans::intake;
use crate::workflows::loans::repository::{
    ApplicationRecord, ApplicationRepository, AuditJournal, DocumentUpload, HistoryEntry,
    NotificationLogEntry, Objection, RepositoryError, UserAlert,
};
use crate::workflows::loans::schemes::{SchemeCatalog, SchemeMatcher};
use crate::workflows::loans::service::LoanApplicationService;

pub(super) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date")
}

pub(super) fn dob_for_age(age: u8) -> String {
    format!("{}-01-01", 2026 - age as i32)
}

/// Applicant that clears every rule: age ~31, strong income and credit.
pub(super) fn strong_form() -> LoanApplicationForm {
    LoanApplicationForm {
        user_email: "asha@example.com".to_string(),
        full_name: "Asha Verma".to_string(),
        date_of_birth: dob_for_age(30),
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

/// Applicant failing income, ratio, and credit checks at once.
pub(super) fn weak_form() -> LoanApplicationForm {
    LoanApplicationForm {
        date_of_birth: dob_for_age(40),
        annual_income: "200000".to_string(),
        loan_amount: "3000000".to_string(),
        cibil_score: "500".to_string(),
        ..strong_form()
    }
}

pub(super) fn profile(form: &LoanApplicationForm) -> ApplicantProfile {
    intake::profile_from_form(form, as_of())
}

pub(super) fn strong_profile() -> ApplicantProfile {
    profile(&strong_form())
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::default()
}

pub(super) fn matcher() -> SchemeMatcher {
    SchemeMatcher::new(SchemeCatalog::standard())
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application_id) {
            guard.insert(record.application_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_user(&self, user_email: &str) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.profile.user_email == user_email)
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryJournal {
    pub(super) alerts: Mutex<Vec<UserAlert>>,
    pub(super) history: Mutex<Vec<HistoryEntry>>,
    pub(super) objections: Mutex<Vec<Objection>>,
    pub(super) documents: Mutex<Vec<DocumentUpload>>,
    pub(super) notifications: Mutex<Vec<NotificationLogEntry>>,
}

impl AuditJournal for MemoryJournal {
    fn record_alert(&self, alert: UserAlert) -> Result<(), RepositoryError> {
        self.alerts.lock().expect("alerts mutex poisoned").push(alert);
        Ok(())
    }

    fn alerts_for_user(&self, user_email: &str) -> Result<Vec<UserAlert>, RepositoryError> {
        Ok(self
            .alerts
            .lock()
            .expect("alerts mutex poisoned")
            .iter()
            .filter(|alert| alert.user_email == user_email)
            .cloned()
            .collect())
    }

    fn record_history(&self, entry: HistoryEntry) -> Result<(), RepositoryError> {
        self.history
            .lock()
            .expect("history mutex poisoned")
            .push(entry);
        Ok(())
    }

    fn history_for(&self, id: &ApplicationId) -> Result<Vec<HistoryEntry>, RepositoryError> {
        Ok(self
            .history
            .lock()
            .expect("history mutex poisoned")
            .iter()
            .filter(|entry| &entry.application_id == id)
            .cloned()
            .collect())
    }

    fn record_objection(&self, objection: Objection) -> Result<(), RepositoryError> {
        self.objections
            .lock()
            .expect("objections mutex poisoned")
            .push(objection);
        Ok(())
    }

    fn objections_for(&self, id: &ApplicationId) -> Result<Vec<Objection>, RepositoryError> {
        Ok(self
            .objections
            .lock()
            .expect("objections mutex poisoned")
            .iter()
            .filter(|objection| &objection.application_id == id)
            .cloned()
            .collect())
    }

    fn record_document(&self, upload: DocumentUpload) -> Result<(), RepositoryError> {
        self.documents
            .lock()
            .expect("documents mutex poisoned")
            .push(upload);
        Ok(())
    }

    fn documents_for(&self, id: &ApplicationId) -> Result<Vec<DocumentUpload>, RepositoryError> {
        Ok(self
            .documents
            .lock()
            .expect("documents mutex poisoned")
            .iter()
            .filter(|upload| &upload.application_id == id)
            .cloned()
            .collect())
    }

    fn record_notification(&self, entry: NotificationLogEntry) -> Result<(), RepositoryError> {
        self.notifications
            .lock()
            .expect("notifications mutex poisoned")
            .push(entry);
        Ok(())
    }
}

/// Captures outbound emails so tests can assert on notifications.
#[derive(Default)]
pub(super) struct RecordingNotifier {
    pub(super) emails: Mutex<Vec<OutboundEmail>>,
}

impl RecordingNotifier {
    pub(super) fn sent(&self) -> Vec<OutboundEmail> {
        self.emails.lock().expect("emails mutex poisoned").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, email: &OutboundEmail) -> Result<(), NotifyError> {
        self.emails
            .lock()
            .expect("emails mutex poisoned")
            .push(email.clone());
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "recording"
    }
}

/// Assessor that always fails, for exercising the manual-review path.
pub(super) struct FailingAssessor;

#[async_trait]
impl Assessor for FailingAssessor {
    async fn assess(&self, _profile: &ApplicantProfile) -> Result<Verdict, AssessmentError> {
        Err(AssessmentError::Status(500))
    }
}

pub(super) fn build_service() -> (
    LoanApplicationService<MemoryRepository, MemoryJournal>,
    Arc<MemoryRepository>,
    Arc<MemoryJournal>,
    Arc<RecordingNotifier>,
) {
    build_service_with_assessor(Arc::new(RuleAssessor::default()))
}

pub(super) fn build_service_with_assessor(
    assessor: Arc<dyn Assessor>,
) -> (
    LoanApplicationService<MemoryRepository, MemoryJournal>,
    Arc<MemoryRepository>,
    Arc<MemoryJournal>,
    Arc<RecordingNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let journal = Arc::new(MemoryJournal::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = LoanApplicationService::new(
        repository.clone(),
        journal.clone(),
        assessor,
        notifier.clone(),
        engine(),
        matcher(),
    );
    (service, repository, journal, notifier)
}
