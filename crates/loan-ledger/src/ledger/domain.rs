use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::interest::{InterestQuote, InterestRate};
use super::service::LedgerError;

/// Opaque key for a stored application. Ordered lexicographically, which is the order the
/// store hands records back in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accept a caller-supplied id, rejecting empty input before any lookup happens.
    pub fn parse(raw: &str) -> Result<Self, LedgerError> {
        if raw.is_empty() {
            return Err(LedgerError::invalid_id());
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Submission payload shared by quoting, intake and revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRequest {
    pub principal: u32,
    /// Loan term in months.
    pub duration: u32,
}

impl ApplicationRequest {
    pub fn new(principal: u32, duration: u32) -> Self {
        Self {
            principal,
            duration,
        }
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.principal == 0 || self.duration == 0 {
            return Err(LedgerError::invalid_payload());
        }
        Ok(())
    }
}

/// Review status. Only `pending` is assigned today; no transitions exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
        }
    }
}

/// Persisted loan application with its derived amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub id: ApplicationId,
    pub principal: u32,
    pub duration: u32,
    pub interest_rate: InterestRate,
    pub interest: f64,
    pub total_amount: f64,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl LoanApplication {
    pub(crate) fn open(
        id: ApplicationId,
        request: ApplicationRequest,
        rate: InterestRate,
        quote: InterestQuote,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            principal: request.principal,
            duration: request.duration,
            interest_rate: rate,
            interest: quote.interest,
            total_amount: quote.total_amount,
            status: ApplicationStatus::Pending,
            created_at,
            updated_at: None,
        }
    }

    /// Rate this record was opened with; revisions keep pricing at it.
    pub fn rate(&self) -> InterestRate {
        self.interest_rate
    }

    /// Merge a revision into this record. Principal and duration come from the request;
    /// identity, rate, status and creation time are kept.
    pub(crate) fn revised(
        &self,
        request: ApplicationRequest,
        quote: InterestQuote,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: self.id.clone(),
            principal: request.principal,
            duration: request.duration,
            interest_rate: self.interest_rate,
            interest: quote.interest,
            total_amount: quote.total_amount,
            status: self.status,
            created_at: self.created_at,
            updated_at: Some(updated_at),
        }
    }
}

/// Human readable outcome of a ledger mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Received {
        id: ApplicationId,
        principal: u32,
        duration: u32,
    },
    Updated {
        id: ApplicationId,
        principal: u32,
        duration: u32,
    },
    Deleted {
        id: ApplicationId,
    },
}

impl Confirmation {
    pub fn received(application: &LoanApplication) -> Self {
        Confirmation::Received {
            id: application.id.clone(),
            principal: application.principal,
            duration: application.duration,
        }
    }

    pub fn id(&self) -> &ApplicationId {
        match self {
            Confirmation::Received { id, .. }
            | Confirmation::Updated { id, .. }
            | Confirmation::Deleted { id } => id,
        }
    }
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confirmation::Received {
                id,
                principal,
                duration,
            } => write!(
                f,
                "Your application with ID {id} for a principal amount of {principal} and duration of {duration} months has been received successfully!"
            ),
            Confirmation::Updated {
                id,
                principal,
                duration,
            } => write!(
                f,
                "You have updated an application with ID {id} to have a principal amount of {principal} and duration of {duration} months"
            ),
            Confirmation::Deleted { id } => {
                write!(f, "You have deleted an application with ID {id}")
            }
        }
    }
}
