use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::loans::{
    ApplicationId, AuditJournal, DocumentUpload, HistoryAction, HistoryEntry,
    NotificationLogEntry, Objection, RepositoryError, UserAlert, UserAlertKind,
};

use super::{append_row, read_rows};

const ALERTS_FILE: &str = "user_alerts.csv";
const HISTORY_FILE: &str = "application_history.csv";
const OBJECTIONS_FILE: &str = "objections.csv";
const DOCUMENTS_FILE: &str = "document_uploads.csv";
const NOTIFICATIONS_FILE: &str = "notifications.csv";

/// Append-mostly side-channel record sets, one CSV file and one mutex each.
pub struct CsvAuditJournal {
    dir: PathBuf,
    alerts: Mutex<()>,
    history: Mutex<()>,
    objections: Mutex<()>,
    documents: Mutex<()>,
    notifications: Mutex<()>,
}

impl CsvAuditJournal {
    pub fn open(data_dir: &Path) -> Result<Self, RepositoryError> {
        fs::create_dir_all(data_dir)
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;
        Ok(Self {
            dir: data_dir.to_path_buf(),
            alerts: Mutex::new(()),
            history: Mutex::new(()),
            objections: Mutex::new(()),
            documents: Mutex::new(()),
            notifications: Mutex::new(()),
        })
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}

impl AuditJournal for CsvAuditJournal {
    fn record_alert(&self, alert: UserAlert) -> Result<(), RepositoryError> {
        let _guard = self.alerts.lock().expect("alerts mutex poisoned");
        append_row(&self.path(ALERTS_FILE), &AlertRow::from(&alert))
    }

    fn alerts_for_user(&self, user_email: &str) -> Result<Vec<UserAlert>, RepositoryError> {
        let _guard = self.alerts.lock().expect("alerts mutex poisoned");
        read_rows::<AlertRow>(&self.path(ALERTS_FILE))?
            .into_iter()
            .filter(|row| row.user_email == user_email)
            .map(UserAlert::try_from)
            .collect()
    }

    fn record_history(&self, entry: HistoryEntry) -> Result<(), RepositoryError> {
        let _guard = self.history.lock().expect("history mutex poisoned");
        append_row(&self.path(HISTORY_FILE), &HistoryRow::from(&entry))
    }

    fn history_for(&self, id: &ApplicationId) -> Result<Vec<HistoryEntry>, RepositoryError> {
        let _guard = self.history.lock().expect("history mutex poisoned");
        read_rows::<HistoryRow>(&self.path(HISTORY_FILE))?
            .into_iter()
            .filter(|row| row.application_id == id.0)
            .map(HistoryEntry::try_from)
            .collect()
    }

    fn record_objection(&self, objection: Objection) -> Result<(), RepositoryError> {
        let _guard = self.objections.lock().expect("objections mutex poisoned");
        append_row(&self.path(OBJECTIONS_FILE), &ObjectionRow::from(&objection))
    }

    fn objections_for(&self, id: &ApplicationId) -> Result<Vec<Objection>, RepositoryError> {
        let _guard = self.objections.lock().expect("objections mutex poisoned");
        Ok(read_rows::<ObjectionRow>(&self.path(OBJECTIONS_FILE))?
            .into_iter()
            .filter(|row| row.application_id == id.0)
            .map(Objection::from)
            .collect())
    }

    fn record_document(&self, upload: DocumentUpload) -> Result<(), RepositoryError> {
        let _guard = self.documents.lock().expect("documents mutex poisoned");
        append_row(&self.path(DOCUMENTS_FILE), &DocumentRow::from(&upload))
    }

    fn documents_for(&self, id: &ApplicationId) -> Result<Vec<DocumentUpload>, RepositoryError> {
        let _guard = self.documents.lock().expect("documents mutex poisoned");
        Ok(read_rows::<DocumentRow>(&self.path(DOCUMENTS_FILE))?
            .into_iter()
            .filter(|row| row.application_id == id.0)
            .map(DocumentUpload::from)
            .collect())
    }

    fn record_notification(&self, entry: NotificationLogEntry) -> Result<(), RepositoryError> {
        let _guard = self
            .notifications
            .lock()
            .expect("notifications mutex poisoned");
        append_row(
            &self.path(NOTIFICATIONS_FILE),
            &NotificationRow::from(&entry),
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AlertRow {
    id: String,
    user_email: String,
    application_id: String,
    alert_type: String,
    title: String,
    message: String,
    priority: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl From<&UserAlert> for AlertRow {
    fn from(alert: &UserAlert) -> Self {
        Self {
            id: alert.id.clone(),
            user_email: alert.user_email.clone(),
            application_id: alert.application_id.0.clone(),
            alert_type: alert.kind.label().to_string(),
            title: alert.title.clone(),
            message: alert.message.clone(),
            priority: alert.priority.clone(),
            read: alert.read,
            created_at: alert.created_at,
        }
    }
}

impl TryFrom<AlertRow> for UserAlert {
    type Error = RepositoryError;

    fn try_from(row: AlertRow) -> Result<Self, Self::Error> {
        let kind = UserAlertKind::from_label(&row.alert_type).ok_or_else(|| {
            RepositoryError::Unavailable(format!(
                "alert {} carries unknown type '{}'",
                row.id, row.alert_type
            ))
        })?;
        Ok(Self {
            id: row.id,
            user_email: row.user_email,
            application_id: ApplicationId(row.application_id),
            kind,
            title: row.title,
            message: row.message,
            priority: row.priority,
            read: row.read,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HistoryRow {
    id: String,
    application_id: String,
    user_email: String,
    action: String,
    actor: String,
    reason: String,
    created_at: DateTime<Utc>,
}

impl From<&HistoryEntry> for HistoryRow {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id.clone(),
            application_id: entry.application_id.0.clone(),
            user_email: entry.user_email.clone(),
            action: entry.action.label().to_string(),
            actor: entry.actor.clone(),
            reason: entry.reason.clone(),
            created_at: entry.created_at,
        }
    }
}

impl TryFrom<HistoryRow> for HistoryEntry {
    type Error = RepositoryError;

    fn try_from(row: HistoryRow) -> Result<Self, Self::Error> {
        let action = HistoryAction::from_label(&row.action).ok_or_else(|| {
            RepositoryError::Unavailable(format!(
                "history entry {} carries unknown action '{}'",
                row.id, row.action
            ))
        })?;
        Ok(Self {
            id: row.id,
            application_id: ApplicationId(row.application_id),
            user_email: row.user_email,
            action,
            actor: row.actor,
            reason: row.reason,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ObjectionRow {
    id: String,
    application_id: String,
    user_email: String,
    reason: String,
    requested_documents: String,
    status: String,
    created_by: String,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

impl From<&Objection> for ObjectionRow {
    fn from(objection: &Objection) -> Self {
        Self {
            id: objection.id.clone(),
            application_id: objection.application_id.0.clone(),
            user_email: objection.user_email.clone(),
            reason: objection.reason.clone(),
            requested_documents: objection.requested_documents.clone(),
            status: objection.status.clone(),
            created_by: objection.created_by.clone(),
            created_at: objection.created_at,
            resolved_at: objection.resolved_at,
        }
    }
}

impl From<ObjectionRow> for Objection {
    fn from(row: ObjectionRow) -> Self {
        Self {
            id: row.id,
            application_id: ApplicationId(row.application_id),
            user_email: row.user_email,
            reason: row.reason,
            requested_documents: row.requested_documents,
            status: row.status,
            created_by: row.created_by,
            created_at: row.created_at,
            resolved_at: row.resolved_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct DocumentRow {
    id: String,
    application_id: String,
    user_email: String,
    document_type: String,
    file_name: String,
    uploaded_at: DateTime<Utc>,
}

impl From<&DocumentUpload> for DocumentRow {
    fn from(upload: &DocumentUpload) -> Self {
        Self {
            id: upload.id.clone(),
            application_id: upload.application_id.0.clone(),
            user_email: upload.user_email.clone(),
            document_type: upload.document_type.clone(),
            file_name: upload.file_name.clone(),
            uploaded_at: upload.uploaded_at,
        }
    }
}

impl From<DocumentRow> for DocumentUpload {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            application_id: ApplicationId(row.application_id),
            user_email: row.user_email,
            document_type: row.document_type,
            file_name: row.file_name,
            uploaded_at: row.uploaded_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct NotificationRow {
    id: String,
    email: String,
    subject: String,
    message: String,
    kind: String,
    sent_at: DateTime<Utc>,
}

impl From<&NotificationLogEntry> for NotificationRow {
    fn from(entry: &NotificationLogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            email: entry.email.clone(),
            subject: entry.subject.clone(),
            message: entry.message.clone(),
            kind: entry.kind.clone(),
            sent_at: entry.sent_at,
        }
    }
}
