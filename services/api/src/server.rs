use crate::cli::ServeArgs;
use crate::infra::{in_memory_ledger, AppState};
use crate::routes::with_ledger_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loan_ledger::config::AppConfig;
use loan_ledger::error::AppError;
use loan_ledger::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

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

    let ledger = Arc::new(in_memory_ledger(config.ledger.interest_rate));

    let app = with_ledger_routes(ledger)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        interest_rate = config.ledger.interest_rate.value(),
        "loan application ledger ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
