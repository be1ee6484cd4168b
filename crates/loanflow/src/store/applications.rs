use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::loans::{
    ApplicantProfile, ApplicationId, ApplicationRecord, ApplicationRepository, ApplicationStatus,
    RepositoryError, VerificationStatus,
};

use super::{append_row, read_rows, rewrite_rows};

const APPLICATIONS_FILE: &str = "loan_applications.csv";

/// Application record set backed by one CSV file.
pub struct CsvApplicationStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvApplicationStore {
    pub fn open(data_dir: &Path) -> Result<Self, RepositoryError> {
        fs::create_dir_all(data_dir)
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;
        Ok(Self {
            path: data_dir.join(APPLICATIONS_FILE),
            lock: Mutex::new(()),
        })
    }

    fn rows(&self) -> Result<Vec<ApplicationRow>, RepositoryError> {
        read_rows(&self.path)
    }
}

impl ApplicationRepository for CsvApplicationStore {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let _guard = self.lock.lock().expect("application store mutex poisoned");

        let exists = self
            .rows()?
            .iter()
            .any(|row| row.application_id == record.application_id.0);
        if exists {
            return Err(RepositoryError::Conflict);
        }

        append_row(&self.path, &ApplicationRow::from(&record))?;
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let _guard = self.lock.lock().expect("application store mutex poisoned");

        let mut rows = self.rows()?;
        let mut found = false;
        for row in rows.iter_mut() {
            if row.application_id == record.application_id.0 {
                *row = ApplicationRow::from(&record);
                found = true;
            }
        }

        if !found {
            return Err(RepositoryError::NotFound);
        }

        rewrite_rows(&self.path, &rows)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let _guard = self.lock.lock().expect("application store mutex poisoned");

        self.rows()?
            .into_iter()
            .find(|row| row.application_id == id.0)
            .map(ApplicationRecord::try_from)
            .transpose()
    }

    fn for_user(&self, user_email: &str) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let _guard = self.lock.lock().expect("application store mutex poisoned");

        self.rows()?
            .into_iter()
            .filter(|row| row.user_email == user_email)
            .map(ApplicationRecord::try_from)
            .collect()
    }

    fn all(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let _guard = self.lock.lock().expect("application store mutex poisoned");

        self.rows()?
            .into_iter()
            .map(ApplicationRecord::try_from)
            .collect()
    }
}

/// Flat CSV row mirroring the record columns.
#[derive(Debug, Serialize, Deserialize)]
struct ApplicationRow {
    application_id: String,
    user_email: String,
    full_name: String,
    date_of_birth: String,
    gender: String,
    marital_status: String,
    nationality: String,
    contact_number: String,
    employment_type: String,
    employer_name: String,
    annual_income: f64,
    existing_loans: String,
    loan_type: String,
    loan_amount: f64,
    loan_tenure: String,
    loan_purpose: String,
    preferred_emi: String,
    cibil_score: u16,
    age: Option<u8>,
    status: String,
    eligibility_status: String,
    eligibility_reason: String,
    required_documents: String,
    uploaded_documents: String,
    admin_notes: String,
    verification_status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&ApplicationRecord> for ApplicationRow {
    fn from(record: &ApplicationRecord) -> Self {
        let profile = &record.profile;
        Self {
            application_id: record.application_id.0.clone(),
            user_email: profile.user_email.clone(),
            full_name: profile.full_name.clone(),
            date_of_birth: profile.date_of_birth.clone(),
            gender: profile.gender.clone(),
            marital_status: profile.marital_status.clone(),
            nationality: profile.nationality.clone(),
            contact_number: profile.contact_number.clone(),
            employment_type: profile.employment_type.clone(),
            employer_name: profile.employer_name.clone(),
            annual_income: profile.annual_income,
            existing_loans: profile.existing_loans.clone(),
            loan_type: profile.loan_type.clone(),
            loan_amount: profile.loan_amount,
            loan_tenure: profile.loan_tenure.clone(),
            loan_purpose: profile.loan_purpose.clone(),
            preferred_emi: profile.preferred_emi.clone(),
            cibil_score: profile.cibil_score,
            age: profile.age,
            status: record.status.label().to_string(),
            eligibility_status: record.eligibility_status.clone(),
            eligibility_reason: record.eligibility_reason.clone(),
            required_documents: record.required_documents.clone(),
            uploaded_documents: record.uploaded_documents.clone(),
            admin_notes: record.admin_notes.clone(),
            verification_status: record.verification_status.label().to_string(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl TryFrom<ApplicationRow> for ApplicationRecord {
    type Error = RepositoryError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let status = ApplicationStatus::from_label(&row.status).ok_or_else(|| {
            RepositoryError::Unavailable(format!(
                "record {} carries unknown status '{}'",
                row.application_id, row.status
            ))
        })?;
        let verification_status = VerificationStatus::from_label(&row.verification_status)
            .ok_or_else(|| {
                RepositoryError::Unavailable(format!(
                    "record {} carries unknown verification status '{}'",
                    row.application_id, row.verification_status
                ))
            })?;

        Ok(Self {
            application_id: ApplicationId(row.application_id),
            profile: ApplicantProfile {
                user_email: row.user_email,
                full_name: row.full_name,
                date_of_birth: row.date_of_birth,
                gender: row.gender,
                marital_status: row.marital_status,
                nationality: row.nationality,
                contact_number: row.contact_number,
                employment_type: row.employment_type,
                employer_name: row.employer_name,
                annual_income: row.annual_income,
                existing_loans: row.existing_loans,
                loan_type: row.loan_type,
                loan_amount: row.loan_amount,
                loan_tenure: row.loan_tenure,
                loan_purpose: row.loan_purpose,
                preferred_emi: row.preferred_emi,
                cibil_score: row.cibil_score,
                age: row.age,
            },
            status,
            eligibility_status: row.eligibility_status,
            eligibility_reason: row.eligibility_reason,
            required_documents: row.required_documents,
            uploaded_documents: row.uploaded_documents,
            admin_notes: row.admin_notes,
            verification_status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::loans::evaluation::{EligibilityEngine, Verdict};

    fn profile() -> ApplicantProfile {
        ApplicantProfile {
            user_email: "user@example.com".to_string(),
            full_name: "Asha Verma".to_string(),
            date_of_birth: "1996-03-01".to_string(),
            gender: "Female".to_string(),
            marital_status: "Single".to_string(),
            nationality: "Indian".to_string(),
            contact_number: "9999999999".to_string(),
            employment_type: "Salaried".to_string(),
            employer_name: "Acme Ltd".to_string(),
            annual_income: 1_000_000.0,
            existing_loans: "None".to_string(),
            loan_type: "Personal Loan".to_string(),
            loan_amount: 2_000_000.0,
            loan_tenure: "5".to_string(),
            loan_purpose: "Renovation".to_string(),
            preferred_emi: "30000".to_string(),
            cibil_score: 800,
            age: Some(30),
        }
    }

    fn record(id: &str) -> ApplicationRecord {
        let profile = profile();
        let verdict: Verdict = EligibilityEngine::default().assess(&profile);
        ApplicationRecord::new(
            ApplicationId(id.to_string()),
            profile,
            &verdict,
            Utc::now(),
        )
    }

    #[test]
    fn insert_then_fetch_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CsvApplicationStore::open(dir.path()).expect("store opens");

        let stored = store.insert(record("AB12CD34")).expect("insert works");
        let fetched = store
            .fetch(&ApplicationId("AB12CD34".to_string()))
            .expect("fetch works")
            .expect("record present");

        assert_eq!(fetched, stored);
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CsvApplicationStore::open(dir.path()).expect("store opens");

        store.insert(record("DUP00001")).expect("first insert");
        let second = store.insert(record("DUP00001"));
        assert!(matches!(second, Err(RepositoryError::Conflict)));
    }

    #[test]
    fn update_rewrites_matching_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CsvApplicationStore::open(dir.path()).expect("store opens");

        let mut stored = store.insert(record("UPD00001")).expect("insert");
        store.insert(record("UPD00002")).expect("second insert");

        stored.status = ApplicationStatus::Approved;
        stored.admin_notes = "verified in person".to_string();
        store.update(stored.clone()).expect("update works");

        let fetched = store
            .fetch(&stored.application_id)
            .expect("fetch works")
            .expect("record present");
        assert_eq!(fetched.status, ApplicationStatus::Approved);
        assert_eq!(fetched.admin_notes, "verified in person");

        let other = store
            .fetch(&ApplicationId("UPD00002".to_string()))
            .expect("fetch works")
            .expect("untouched record present");
        assert_eq!(other.status, ApplicationStatus::EligibilityAssessed);
    }

    #[test]
    fn update_of_missing_record_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CsvApplicationStore::open(dir.path()).expect("store opens");
        let result = store.update(record("MISSING1"));
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[test]
    fn for_user_filters_by_email() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CsvApplicationStore::open(dir.path()).expect("store opens");

        store.insert(record("USR00001")).expect("insert");
        let mut other = record("USR00002");
        other.profile.user_email = "someone-else@example.com".to_string();
        store.insert(other).expect("insert");

        let mine = store.for_user("user@example.com").expect("list works");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].application_id.0, "USR00001");
    }
}
