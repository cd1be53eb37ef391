//! Loan application ledger.
//!
//! Applications are keyed by generated ids in an ordered store. Interest and total amount
//! are derived from principal, duration and the record's rate, and recomputed whenever a
//! revision changes those inputs.

pub mod clock;
pub mod domain;
pub mod interest;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, SystemClock};
pub use domain::{
    ApplicationId, ApplicationRequest, ApplicationStatus, Confirmation, LoanApplication,
};
pub use interest::{InterestQuote, InterestRate};
pub use repository::{ApplicationStore, BTreeApplicationStore, StoreError};
pub use router::{ledger_router, ReceiptView};
pub use service::{ApplicationLedger, LedgerError};
