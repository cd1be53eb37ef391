use loan_ledger::config::AppConfig;
use loan_ledger::error::AppError;
use loan_ledger::ledger::{ApplicationLedger, BTreeApplicationStore, InterestRate, SystemClock};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Ledger wiring used by the service and the CLI.
pub(crate) type ServiceLedger = ApplicationLedger<BTreeApplicationStore, SystemClock>;

pub(crate) fn in_memory_ledger(rate: InterestRate) -> ServiceLedger {
    ApplicationLedger::new(
        Arc::new(BTreeApplicationStore::default()),
        Arc::new(SystemClock),
        rate,
    )
}

/// `--rate` wins; otherwise the configured `APP_INTEREST_RATE` applies, as it does for `serve`.
pub(crate) fn resolve_rate(explicit: Option<InterestRate>) -> Result<InterestRate, AppError> {
    match explicit {
        Some(rate) => Ok(rate),
        None => Ok(AppConfig::load()?.ledger.interest_rate),
    }
}

pub(crate) fn parse_rate(raw: &str) -> Result<InterestRate, String> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(InterestRate::new)
        .ok_or_else(|| format!("'{raw}' is not a finite, non-negative interest rate"))
}
