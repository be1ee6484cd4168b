use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;

use loanflow::workflows::loans::{
    ApplicationId, ApplicationRecord, ApplicationRepository, AuditJournal, DocumentUpload,
    HistoryEntry, NotificationLogEntry, Objection, RepositoryError, UserAlert,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Repository used by the CLI demo so it leaves no files behind.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditJournal {
    alerts: Arc<Mutex<Vec<UserAlert>>>,
    history: Arc<Mutex<Vec<HistoryEntry>>>,
    objections: Arc<Mutex<Vec<Objection>>>,
    documents: Arc<Mutex<Vec<DocumentUpload>>>,
    notifications: Arc<Mutex<Vec<NotificationLogEntry>>>,
}

impl AuditJournal for InMemoryAuditJournal {
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
