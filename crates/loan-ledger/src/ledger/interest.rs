use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::ApplicationRequest;
use super::service::LedgerError;

/// Annual simple-interest rate expressed as a fraction (0.02 == 2%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct InterestRate(f64);

impl InterestRate {
    pub const DEFAULT: f64 = 0.02;

    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for InterestRate {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<f64> for InterestRate {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("interest rate must be finite and >= 0, got {value}"))
    }
}

impl From<InterestRate> for f64 {
    fn from(rate: InterestRate) -> Self {
        rate.0
    }
}

/// Interest and amount owed for a principal held over a number of months.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestQuote {
    pub interest: f64,
    pub total_amount: f64,
}

impl InterestQuote {
    /// `interest = principal * rate * (duration / 12)`, with the month fraction kept as a
    /// real number so six months is half a year.
    pub fn compute(request: ApplicationRequest, rate: InterestRate) -> Result<Self, LedgerError> {
        request.validate()?;

        let principal = f64::from(request.principal);
        let years = f64::from(request.duration) / 12.0;
        let interest = principal * rate.value() * years;

        Ok(Self {
            interest,
            total_amount: principal + interest,
        })
    }
}

impl fmt::Display for InterestQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The interest is '{}' and the total amount to be paid is '{}'",
            self.interest, self.total_amount
        )
    }
}
