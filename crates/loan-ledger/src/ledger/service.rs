use std::sync::Arc;

use tracing::{debug, info, warn};

use super::clock::Clock;
use super::domain::{ApplicationId, ApplicationRequest, Confirmation, LoanApplication};
use super::interest::{InterestQuote, InterestRate};
use super::repository::{ApplicationStore, StoreError};

/// Ledger composing the store, clock and the rate applied to new applications.
pub struct ApplicationLedger<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
    rate: InterestRate,
}

impl<S, C> ApplicationLedger<S, C>
where
    S: ApplicationStore + 'static,
    C: Clock + 'static,
{
    pub fn new(store: Arc<S>, clock: Arc<C>, rate: InterestRate) -> Self {
        Self { store, clock, rate }
    }

    pub fn rate(&self) -> InterestRate {
        self.rate
    }

    /// Quote interest and total for a request without touching the store.
    pub fn calculate_amount(
        &self,
        request: ApplicationRequest,
    ) -> Result<InterestQuote, LedgerError> {
        InterestQuote::compute(request, self.rate).inspect_err(|_| {
            warn!(
                principal = request.principal,
                duration = request.duration,
                "rejected quote request"
            )
        })
    }

    /// Open a new pending application, returning the stored record.
    pub fn add_application(
        &self,
        request: ApplicationRequest,
    ) -> Result<LoanApplication, LedgerError> {
        let quote = self.calculate_amount(request)?;
        let record = LoanApplication::open(
            ApplicationId::generate(),
            request,
            self.rate,
            quote,
            self.clock.now(),
        );

        let stored = self.store.insert(record)?;
        info!(
            application_id = %stored.id,
            principal = stored.principal,
            duration = stored.duration,
            "application received"
        );
        Ok(stored)
    }

    /// Every application in key order.
    pub fn get_all_applications(&self) -> Result<Vec<LoanApplication>, LedgerError> {
        let records = self.store.values()?;
        debug!(count = records.len(), "listed applications");
        Ok(records)
    }

    pub fn get_application(&self, id: &str) -> Result<LoanApplication, LedgerError> {
        let id = ApplicationId::parse(id)?;
        debug!(application_id = %id, "fetching application");
        self.store
            .fetch(&id)?
            .ok_or_else(|| LedgerError::not_found(&id))
    }

    /// Revise principal and duration. Existence is checked before the payload.
    pub fn update_application(
        &self,
        id: &str,
        request: ApplicationRequest,
    ) -> Result<Confirmation, LedgerError> {
        let id = ApplicationId(id.to_string());
        let current = self
            .store
            .fetch(&id)?
            .ok_or_else(|| LedgerError::not_found(&id))?;

        let quote = InterestQuote::compute(request, current.rate()).inspect_err(|_| {
            warn!(application_id = %id, "rejected application revision")
        })?;
        let revised = current.revised(request, quote, self.clock.now());

        match self.store.replace(revised) {
            Ok(()) => {}
            Err(StoreError::NotFound) => return Err(LedgerError::not_found(&id)),
            Err(other) => return Err(other.into()),
        }

        info!(
            application_id = %id,
            principal = request.principal,
            duration = request.duration,
            "application updated"
        );
        Ok(Confirmation::Updated {
            id,
            principal: request.principal,
            duration: request.duration,
        })
    }

    pub fn delete_application(&self, id: &str) -> Result<Confirmation, LedgerError> {
        let id = ApplicationId::parse(id)?;
        match self.store.remove(&id)? {
            Some(_) => {
                info!(application_id = %id, "application deleted");
                Ok(Confirmation::Deleted { id })
            }
            None => Err(LedgerError::not_found(&id)),
        }
    }
}

/// Error raised by ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidPayload(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl LedgerError {
    pub(crate) fn not_found(id: &ApplicationId) -> Self {
        Self::NotFound(format!("The application with ID {id} is not found"))
    }

    pub(crate) fn invalid_payload() -> Self {
        Self::InvalidPayload("Invalid payload provided.".to_string())
    }

    pub(crate) fn invalid_id() -> Self {
        Self::InvalidPayload("Invalid ID provided.".to_string())
    }
}
