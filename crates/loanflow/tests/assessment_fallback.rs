//! Remote assessment behavior against a stubbed HTTP backend: token grant,
//! labeled-reply parsing, and the single-attempt fallback to the rule engine.

use loanflow::config::AssessorConfig;
use loanflow::workflows::loans::{
    ApplicantProfile, Assessor, FallbackAssessor, RemoteAssessor, RuleAssessor, VerdictStatus,
};
use serde_json::json;

fn profile() -> ApplicantProfile {
    ApplicantProfile {
        user_email: "asha@example.com".to_string(),
        full_name: "Asha Verma".to_string(),
        date_of_birth: "1995-01-01".to_string(),
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
        loan_purpose: "Home renovation".to_string(),
        preferred_emi: "30000".to_string(),
        cibil_score: 800,
        age: Some(30),
    }
}

fn config_for(server: &mockito::Server) -> AssessorConfig {
    AssessorConfig {
        endpoint: Some(format!("{}/v1/chat", server.url())),
        api_key: Some("test-key".to_string()),
        identity_url: format!("{}/identity/token", server.url()),
    }
}

async fn token_mock(server: &mut mockito::Server) -> mockito::Mock {
    server
        .mock("POST", "/identity/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "access_token": "short-lived-token" }).to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn remote_assessor_parses_a_labeled_reply() {
    let mut server = mockito::Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let content = "ELIGIBILITY: CONDITIONALLY_APPROVED\n\
                   REASON: Loan amount is high relative to income\n\
                   DOCUMENTS: PAN Card, Salary Slips\n\
                   RECOMMENDATIONS: Consider a co-applicant";
    let _chat = server
        .mock("POST", "/v1/chat")
        .match_header("authorization", "Bearer short-lived-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [
                    { "message": { "role": "assistant", "content": content } }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let assessor = RemoteAssessor::from_config(&config_for(&server)).expect("assessor builds");
    let verdict = assessor.assess(&profile()).await.expect("assessment works");

    assert_eq!(verdict.status, VerdictStatus::ConditionallyApproved);
    assert_eq!(verdict.reason, "Loan amount is high relative to income");
    assert_eq!(verdict.documents, vec!["PAN Card", "Salary Slips"]);
}

#[tokio::test]
async fn server_error_falls_back_to_the_rule_engine_verdict() {
    let mut server = mockito::Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let _chat = server
        .mock("POST", "/v1/chat")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let remote = RemoteAssessor::from_config(&config_for(&server)).expect("assessor builds");
    let assessor = FallbackAssessor::new(remote, RuleAssessor::default());

    let profile = profile();
    let verdict = assessor.assess(&profile).await.expect("fallback works");
    let expected = RuleAssessor::default()
        .assess(&profile)
        .await
        .expect("rule engine works");

    assert_eq!(verdict, expected);
    assert_eq!(verdict.status, VerdictStatus::Approved);
}

#[tokio::test]
async fn token_failure_also_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _token = server
        .mock("POST", "/identity/token")
        .with_status(403)
        .with_body("forbidden")
        .create_async()
        .await;

    let remote = RemoteAssessor::from_config(&config_for(&server)).expect("assessor builds");
    let assessor = FallbackAssessor::new(remote, RuleAssessor::default());

    let profile = profile();
    let verdict = assessor.assess(&profile).await.expect("fallback works");
    assert_eq!(verdict.status, VerdictStatus::Approved);
    assert_eq!(verdict.reason, "All eligibility criteria met");
}

#[tokio::test]
async fn malformed_reply_body_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let _chat = server
        .mock("POST", "/v1/chat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "choices": [] }).to_string())
        .create_async()
        .await;

    let remote = RemoteAssessor::from_config(&config_for(&server)).expect("assessor builds");
    let assessor = FallbackAssessor::new(remote, RuleAssessor::default());

    let verdict = assessor.assess(&profile()).await.expect("fallback works");
    assert_eq!(verdict.status, VerdictStatus::Approved);
}
