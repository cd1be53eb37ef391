//! Loan application ledger: simple-interest derivation, record lifecycle and the HTTP
//! routes exposing it.

pub mod config;
pub mod error;
pub mod ledger;
pub mod telemetry;
