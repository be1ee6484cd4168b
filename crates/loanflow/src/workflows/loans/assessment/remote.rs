use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::super::domain::ApplicantProfile;
use super::super::evaluation::Verdict;
use super::parser::parse_assessment_reply;
use super::{AssessmentError, Assessor};
use crate::config::AssessorConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Assessor backed by an external chat-completion service. Each assessment
/// fetches a short-lived access token from the identity endpoint, posts the
/// applicant prompt, and parses the labeled reply.
pub struct RemoteAssessor {
    endpoint: String,
    identity_url: String,
    api_key: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct TokenReply {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

impl RemoteAssessor {
    pub fn from_config(config: &AssessorConfig) -> Result<Self, AssessmentError> {
        let (endpoint, api_key) = match (&config.endpoint, &config.api_key) {
            (Some(endpoint), Some(api_key)) => (endpoint.clone(), api_key.clone()),
            _ => return Err(AssessmentError::NotConfigured),
        };

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            endpoint,
            identity_url: config.identity_url.clone(),
            api_key,
            client,
        })
    }

    async fn fetch_token(&self) -> Result<String, AssessmentError> {
        let response = self
            .client
            .post(&self.identity_url)
            .form(&[("grant_type", GRANT_TYPE), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AssessmentError::Token(format!(
                "identity endpoint returned {}",
                response.status()
            )));
        }

        let reply: TokenReply = response.json().await?;
        reply
            .access_token
            .ok_or_else(|| AssessmentError::Token("reply carried no access_token".to_string()))
    }
}

#[async_trait]
impl Assessor for RemoteAssessor {
    async fn assess(&self, profile: &ApplicantProfile) -> Result<Verdict, AssessmentError> {
        let token = self.fetch_token().await?;
        let prompt = assessment_prompt(profile);

        let payload = json!({
            "messages": [
                {
                    "role": "user",
                    "content": prompt,
                }
            ]
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssessmentError::Status(status.as_u16()));
        }

        let reply: ChatReply = response.json().await?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AssessmentError::InvalidResponse("reply had no choices".to_string()))?;

        tracing::debug!(chars = content.len(), "remote assessment reply received");

        Ok(parse_assessment_reply(&content))
    }
}

fn assessment_prompt(profile: &ApplicantProfile) -> String {
    let age = profile
        .age
        .map(|age| age.to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    format!(
        "As a banking loan officer, assess the loan eligibility for the following applicant \
         and provide detailed analysis:\n\
         \n\
         APPLICANT DETAILS:\n\
         - Full Name: {full_name}\n\
         - Age: {age} years\n\
         - Gender: {gender}\n\
         - Marital Status: {marital_status}\n\
         - Nationality: {nationality}\n\
         - Employment Type: {employment_type}\n\
         - Employer/Business: {employer_name}\n\
         - Annual Income: ₹{annual_income}\n\
         - Existing Loans/EMIs: {existing_loans}\n\
         - CIBIL Score: {cibil_score}\n\
         \n\
         LOAN REQUEST:\n\
         - Loan Type: {loan_type}\n\
         - Loan Amount: ₹{loan_amount}\n\
         - Loan Tenure: {loan_tenure} years\n\
         - Purpose: {loan_purpose}\n\
         - Preferred EMI: ₹{preferred_emi}\n\
         \n\
         Please provide:\n\
         1. ELIGIBILITY STATUS: APPROVED/CONDITIONALLY_APPROVED/REJECTED\n\
         2. DETAILED REASON: Explain the decision factors\n\
         3. REQUIRED DOCUMENTS: List specific documents needed if eligible\n\
         4. RECOMMENDATIONS: Suggest improvements if rejected or conditions if conditional\n\
         \n\
         Format your response as:\n\
         ELIGIBILITY: [status]\n\
         REASON: [detailed explanation]\n\
         DOCUMENTS: [comma-separated list]\n\
         RECOMMENDATIONS: [specific advice]",
        full_name = profile.full_name,
        age = age,
        gender = profile.gender,
        marital_status = profile.marital_status,
        nationality = profile.nationality,
        employment_type = profile.employment_type,
        employer_name = profile.employer_name,
        annual_income = profile.annual_income,
        existing_loans = profile.existing_loans,
        cibil_score = profile.cibil_score,
        loan_type = profile.loan_type,
        loan_amount = profile.loan_amount,
        loan_tenure = profile.loan_tenure,
        loan_purpose = profile.loan_purpose,
        preferred_emi = profile.preferred_emi,
    )
}
