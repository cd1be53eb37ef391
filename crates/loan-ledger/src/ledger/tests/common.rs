use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::ledger::clock::Clock;
use crate::ledger::domain::{ApplicationId, ApplicationRequest, LoanApplication};
use crate::ledger::interest::InterestRate;
use crate::ledger::repository::{ApplicationStore, BTreeApplicationStore, StoreError};
use crate::ledger::{ledger_router, ApplicationLedger};

pub(super) fn opened_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 24, 10, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Clock that advances by one minute on every read so create/update stamps differ.
pub(super) struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    pub(super) fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next: Mutex::new(start),
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::starting_at(opened_at())
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut guard = self.next.lock().expect("clock mutex poisoned");
        let current = *guard;
        *guard = current + Duration::minutes(1);
        current
    }
}

pub(super) type TestLedger = ApplicationLedger<BTreeApplicationStore, SteppingClock>;

pub(super) fn build_ledger() -> (TestLedger, Arc<BTreeApplicationStore>) {
    let store = Arc::new(BTreeApplicationStore::default());
    let ledger = ApplicationLedger::new(
        store.clone(),
        Arc::new(SteppingClock::default()),
        InterestRate::default(),
    );
    (ledger, store)
}

pub(super) fn request(principal: u32, duration: u32) -> ApplicationRequest {
    ApplicationRequest::new(principal, duration)
}

pub(super) fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

pub(super) struct UnavailableStore;

impl ApplicationStore for UnavailableStore {
    fn fetch(&self, _id: &ApplicationId) -> Result<Option<LoanApplication>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _record: LoanApplication) -> Result<LoanApplication, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn replace(&self, _record: LoanApplication) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &ApplicationId) -> Result<Option<LoanApplication>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn values(&self) -> Result<Vec<LoanApplication>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

/// Store whose records disappear between lookup and write-back.
#[derive(Default)]
pub(super) struct VanishingStore {
    pub(super) inner: BTreeApplicationStore,
}

impl ApplicationStore for VanishingStore {
    fn fetch(&self, id: &ApplicationId) -> Result<Option<LoanApplication>, StoreError> {
        self.inner.fetch(id)
    }

    fn insert(&self, record: LoanApplication) -> Result<LoanApplication, StoreError> {
        self.inner.insert(record)
    }

    fn replace(&self, record: LoanApplication) -> Result<(), StoreError> {
        self.inner.remove(&record.id)?;
        self.inner.replace(record)
    }

    fn remove(&self, id: &ApplicationId) -> Result<Option<LoanApplication>, StoreError> {
        self.inner.remove(id)
    }

    fn values(&self) -> Result<Vec<LoanApplication>, StoreError> {
        self.inner.values()
    }
}

pub(super) fn router_with_ledger(ledger: TestLedger) -> axum::Router {
    ledger_router(Arc::new(ledger))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
