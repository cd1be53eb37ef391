use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::domain::{ApplicationId, LoanApplication};

/// Ordered key-value storage for applications so the ledger can be exercised in isolation.
pub trait ApplicationStore: Send + Sync {
    fn fetch(&self, id: &ApplicationId) -> Result<Option<LoanApplication>, StoreError>;
    /// Add a record under a key that must not be present yet.
    fn insert(&self, record: LoanApplication) -> Result<LoanApplication, StoreError>;
    /// Overwrite a record under a key that must already be present.
    fn replace(&self, record: LoanApplication) -> Result<(), StoreError>;
    fn remove(&self, id: &ApplicationId) -> Result<Option<LoanApplication>, StoreError>;
    /// All records in key order.
    fn values(&self) -> Result<Vec<LoanApplication>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// In-process store backed by a `BTreeMap`, giving lexicographic iteration by id.
#[derive(Debug, Default)]
pub struct BTreeApplicationStore {
    records: Mutex<BTreeMap<ApplicationId, LoanApplication>>,
}

impl BTreeApplicationStore {
    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<ApplicationId, LoanApplication>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.lock()?.is_empty())
    }
}

impl ApplicationStore for BTreeApplicationStore {
    fn fetch(&self, id: &ApplicationId) -> Result<Option<LoanApplication>, StoreError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn insert(&self, record: LoanApplication) -> Result<LoanApplication, StoreError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn replace(&self, record: LoanApplication) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        match guard.get_mut(&record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn remove(&self, id: &ApplicationId) -> Result<Option<LoanApplication>, StoreError> {
        Ok(self.lock()?.remove(id))
    }

    fn values(&self) -> Result<Vec<LoanApplication>, StoreError> {
        Ok(self.lock()?.values().cloned().collect())
    }
}
