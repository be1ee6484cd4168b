mod parser;
mod remote;

pub use remote::RemoteAssessor;

use async_trait::async_trait;
use thiserror::Error;

use super::domain::ApplicantProfile;
use super::evaluation::{EligibilityEngine, Verdict};

/// Errors from the remote assessment path. The composing fallback swallows
/// all of these; they are never surfaced to an applicant.
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("assessment backend not configured")]
    NotConfigured,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("identity token request failed: {0}")]
    Token(String),

    #[error("assessment service returned status {0}")]
    Status(u16),

    #[error("malformed assessment response: {0}")]
    InvalidResponse(String),
}

/// Capability interface for eligibility assessment.
#[async_trait]
pub trait Assessor: Send + Sync {
    async fn assess(&self, profile: &ApplicantProfile) -> Result<Verdict, AssessmentError>;
}

/// Deterministic assessor backed by the rule engine. Never fails.
pub struct RuleAssessor {
    engine: EligibilityEngine,
}

impl RuleAssessor {
    pub fn new(engine: EligibilityEngine) -> Self {
        Self { engine }
    }
}

impl Default for RuleAssessor {
    fn default() -> Self {
        Self::new(EligibilityEngine::default())
    }
}

#[async_trait]
impl Assessor for RuleAssessor {
    async fn assess(&self, profile: &ApplicantProfile) -> Result<Verdict, AssessmentError> {
        Ok(self.engine.assess(profile))
    }
}

/// Tries the primary assessor once and falls back on any error. No retries.
pub struct FallbackAssessor<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackAssessor<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P, F> Assessor for FallbackAssessor<P, F>
where
    P: Assessor,
    F: Assessor,
{
    async fn assess(&self, profile: &ApplicantProfile) -> Result<Verdict, AssessmentError> {
        match self.primary.assess(profile).await {
            Ok(verdict) => Ok(verdict),
            Err(err) => {
                tracing::warn!(error = %err, "primary assessment failed, using fallback");
                self.fallback.assess(profile).await
            }
        }
    }
}
