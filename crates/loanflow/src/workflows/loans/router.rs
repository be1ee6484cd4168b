use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationId, LoanApplicationForm};
use super::repository::{ApplicationRepository, AuditJournal, RepositoryError};
use super::service::{DocumentSubmission, LoanApplicationService, LoanServiceError};

/// Router builder exposing the loan application endpoints.
pub fn loan_router<R, J>(service: Arc<LoanApplicationService<R, J>>) -> Router
where
    R: ApplicationRepository + 'static,
    J: AuditJournal + 'static,
{
    Router::new()
        .route(
            "/api/v1/loans/applications",
            post(submit_handler::<R, J>).get(list_handler::<R, J>),
        )
        .route(
            "/api/v1/loans/applications/:application_id",
            get(status_handler::<R, J>),
        )
        .route(
            "/api/v1/loans/applications/:application_id/approve",
            post(approve_handler::<R, J>),
        )
        .route(
            "/api/v1/loans/applications/:application_id/reject",
            post(reject_handler::<R, J>),
        )
        .route(
            "/api/v1/loans/applications/:application_id/objections",
            post(objection_handler::<R, J>),
        )
        .route(
            "/api/v1/loans/applications/:application_id/documents",
            post(documents_handler::<R, J>),
        )
        .route("/api/v1/loans/eligibility", post(eligibility_handler::<R, J>))
        .route("/api/v1/loans/alerts", get(alerts_handler::<R, J>))
        .route("/api/v1/loans/analytics", get(analytics_handler::<R, J>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserQuery {
    user_email: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewRequest {
    #[serde(default)]
    notes: String,
    #[serde(default = "default_actor")]
    actor: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ObjectionRequest {
    reason: String,
    #[serde(default)]
    requested_documents: String,
    #[serde(default = "default_actor")]
    actor: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentsRequest {
    documents: Vec<DocumentSubmission>,
}

fn default_actor() -> String {
    "staff".to_string()
}

fn error_response(err: LoanServiceError) -> Response {
    let status = match &err {
        LoanServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        LoanServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        LoanServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn submit_handler<R, J>(
    State(service): State<Arc<LoanApplicationService<R, J>>>,
    axum::Json(form): axum::Json<LoanApplicationForm>,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: AuditJournal + 'static,
{
    match service.submit(form).await {
        Ok(outcome) => (StatusCode::ACCEPTED, axum::Json(outcome)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<R, J>(
    State(service): State<Arc<LoanApplicationService<R, J>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: AuditJournal + 'static,
{
    let id = ApplicationId(application_id);
    match service.status_view(&id) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R, J>(
    State(service): State<Arc<LoanApplicationService<R, J>>>,
    Query(query): Query<UserQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: AuditJournal + 'static,
{
    match service.applications_for(&query.user_email) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.status_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn approve_handler<R, J>(
    State(service): State<Arc<LoanApplicationService<R, J>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<ReviewRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: AuditJournal + 'static,
{
    let id = ApplicationId(application_id);
    match service.approve(&id, &request.notes, &request.actor).await {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn reject_handler<R, J>(
    State(service): State<Arc<LoanApplicationService<R, J>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<ReviewRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: AuditJournal + 'static,
{
    let id = ApplicationId(application_id);
    match service.reject(&id, &request.notes, &request.actor).await {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn objection_handler<R, J>(
    State(service): State<Arc<LoanApplicationService<R, J>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<ObjectionRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: AuditJournal + 'static,
{
    let id = ApplicationId(application_id);
    match service
        .raise_objection(
            &id,
            &request.reason,
            &request.requested_documents,
            &request.actor,
        )
        .await
    {
        Ok(objection) => (StatusCode::CREATED, axum::Json(objection)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn documents_handler<R, J>(
    State(service): State<Arc<LoanApplicationService<R, J>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<DocumentsRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: AuditJournal + 'static,
{
    let id = ApplicationId(application_id);
    match service.register_documents(&id, request.documents).await {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn eligibility_handler<R, J>(
    State(service): State<Arc<LoanApplicationService<R, J>>>,
    axum::Json(form): axum::Json<LoanApplicationForm>,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: AuditJournal + 'static,
{
    let report = service.check_eligibility(&form);
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn alerts_handler<R, J>(
    State(service): State<Arc<LoanApplicationService<R, J>>>,
    Query(query): Query<UserQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: AuditJournal + 'static,
{
    match service.alerts_for(&query.user_email) {
        Ok(alerts) => (StatusCode::OK, axum::Json(alerts)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn analytics_handler<R, J>(
    State(service): State<Arc<LoanApplicationService<R, J>>>,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: AuditJournal + 'static,
{
    match service.analytics() {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(err) => error_response(err),
    }
}
