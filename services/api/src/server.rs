use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_loan_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

use loanflow::config::AppConfig;
use loanflow::error::AppError;
use loanflow::notify::{EmailNotifier, LogNotifier, Notifier};
use loanflow::store::{CsvApplicationStore, CsvAuditJournal};
use loanflow::telemetry;
use loanflow::workflows::loans::{
    Assessor, EligibilityEngine, FallbackAssessor, LoanApplicationService, RemoteAssessor,
    RuleAssessor, SchemeCatalog, SchemeMatcher,
};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(
        CsvApplicationStore::open(&config.store.data_dir).map_err(store_error)?,
    );
    let journal = Arc::new(CsvAuditJournal::open(&config.store.data_dir).map_err(store_error)?);

    let assessor = build_assessor(&config);
    let notifier = build_notifier(&config);

    let service = Arc::new(LoanApplicationService::new(
        repository,
        journal,
        assessor,
        notifier,
        EligibilityEngine::default(),
        SchemeMatcher::new(SchemeCatalog::standard()),
    ));

    let app = with_loan_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "loan application service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn store_error(err: loanflow::workflows::loans::RepositoryError) -> AppError {
    AppError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        err.to_string(),
    ))
}

/// Remote assessment with a rule fallback when credentials are configured;
/// the rule engine alone otherwise.
fn build_assessor(config: &AppConfig) -> Arc<dyn Assessor> {
    if config.assessor.is_configured() {
        match RemoteAssessor::from_config(&config.assessor) {
            Ok(remote) => {
                info!("remote assessment enabled with rule-based fallback");
                return Arc::new(FallbackAssessor::new(remote, RuleAssessor::default()));
            }
            Err(err) => {
                warn!(error = %err, "remote assessor unavailable, using rule engine only");
            }
        }
    } else {
        warn!("assessor credentials not set, using rule engine only");
    }
    Arc::new(RuleAssessor::default())
}

fn build_notifier(config: &AppConfig) -> Arc<dyn Notifier> {
    if config.smtp.is_configured() {
        match EmailNotifier::from_config(&config.smtp) {
            Ok(notifier) => return Arc::new(notifier),
            Err(err) => {
                warn!(error = %err, "SMTP notifier unavailable, logging notifications only");
            }
        }
    } else {
        warn!("SMTP credentials not set, notifications will be logged only");
    }
    Arc::new(LogNotifier)
}
