use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Currency, FinancialIndex, Money, Rate};

/// A fixed-rate loan request. The rate is chosen from the borrower's age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanScenario {
    pub principal: Money,
    pub birth_date: NaiveDate,
    pub term_months: i32,
    /// Where to deliver the result, if anywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub input_currency: Currency,
    #[serde(default)]
    pub output_currency: Currency,
}

impl LoanScenario {
    pub fn new(principal: Money, birth_date: NaiveDate, term_months: i32) -> Self {
        Self {
            principal,
            birth_date,
            term_months,
            email: None,
            input_currency: Currency::PIVOT,
            output_currency: Currency::PIVOT,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_currencies(mut self, input: Currency, output: Currency) -> Self {
        self.input_currency = input;
        self.output_currency = output;
        self
    }

    /// Address to notify, ignoring blank values.
    pub fn notification_address(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.trim().is_empty())
    }
}

/// A loan whose rate is a fixed part plus a drifting market-index part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableRateScenario {
    pub principal: Money,
    pub term_months: i32,
    /// Fixed monthly component of the rate.
    pub fixed_rate: Rate,
    pub financial_index: FinancialIndex,
}

/// Any request the engine accepts, tagged by kind so batches can mix them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimulationRequest {
    Fixed(LoanScenario),
    VariableRate(VariableRateScenario),
}

impl From<LoanScenario> for SimulationRequest {
    fn from(s: LoanScenario) -> Self {
        SimulationRequest::Fixed(s)
    }
}

impl From<VariableRateScenario> for SimulationRequest {
    fn from(s: VariableRateScenario) -> Self {
        SimulationRequest::VariableRate(s)
    }
}
