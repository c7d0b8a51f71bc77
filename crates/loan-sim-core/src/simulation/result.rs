use serde::{Deserialize, Serialize};

use crate::lending::validation::ValidationErrorKind;
use crate::lending::variable_rate::VariableRateLoanSimulation;
use crate::types::{Currency, Money, Rate};

/// Figures of a fixed-rate simulation, all monetary fields at two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSimulation {
    pub periodic_payment: Money,
    pub final_value: Money,
    pub total_interest: Money,
    pub yearly_rate: Rate,
    pub original_value: Money,
    pub term_months: i32,
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Simulation {
    Fixed(LoanSimulation),
    VariableRate(VariableRateLoanSimulation),
}

/// Why a simulation produced no figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    FutureBirthDate,
    PrincipalTooLow,
    NonPositiveTerm,
    BorrowerTooYoung,
    TermTooLong,
    PrincipalTooHigh,
    /// A calculation or configuration fault, not a problem with the request.
    Internal,
}

impl FailureKind {
    /// Message key used by message bundles.
    pub fn code(self) -> &'static str {
        match self.validation_kind() {
            Some(kind) => kind.code(),
            None => "error.internal",
        }
    }

    pub fn validation_kind(self) -> Option<ValidationErrorKind> {
        match self {
            FailureKind::FutureBirthDate => Some(ValidationErrorKind::FutureBirthDate),
            FailureKind::PrincipalTooLow => Some(ValidationErrorKind::PrincipalTooLow),
            FailureKind::NonPositiveTerm => Some(ValidationErrorKind::NonPositiveTerm),
            FailureKind::BorrowerTooYoung => Some(ValidationErrorKind::BorrowerTooYoung),
            FailureKind::TermTooLong => Some(ValidationErrorKind::TermTooLong),
            FailureKind::PrincipalTooHigh => Some(ValidationErrorKind::PrincipalTooHigh),
            FailureKind::Internal => None,
        }
    }
}

impl From<ValidationErrorKind> for FailureKind {
    fn from(kind: ValidationErrorKind) -> Self {
        match kind {
            ValidationErrorKind::FutureBirthDate => FailureKind::FutureBirthDate,
            ValidationErrorKind::PrincipalTooLow => FailureKind::PrincipalTooLow,
            ValidationErrorKind::NonPositiveTerm => FailureKind::NonPositiveTerm,
            ValidationErrorKind::BorrowerTooYoung => FailureKind::BorrowerTooYoung,
            ValidationErrorKind::TermTooLong => FailureKind::TermTooLong,
            ValidationErrorKind::PrincipalTooHigh => FailureKind::PrincipalTooHigh,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SimulationResult {
    Success { simulation: Simulation },
    Failure { kind: FailureKind, message: String },
}

impl SimulationResult {
    pub fn success(simulation: Simulation) -> Self {
        SimulationResult::Success { simulation }
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        SimulationResult::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SimulationResult::Success { .. })
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            SimulationResult::Failure { kind, .. } => Some(*kind),
            SimulationResult::Success { .. } => None,
        }
    }

    pub fn fixed(&self) -> Option<&LoanSimulation> {
        match self {
            SimulationResult::Success {
                simulation: Simulation::Fixed(s),
            } => Some(s),
            _ => None,
        }
    }

    pub fn variable_rate(&self) -> Option<&VariableRateLoanSimulation> {
        match self {
            SimulationResult::Success {
                simulation: Simulation::VariableRate(s),
            } => Some(s),
            _ => None,
        }
    }
}

impl From<ValidationErrorKind> for SimulationResult {
    fn from(kind: ValidationErrorKind) -> Self {
        SimulationResult::failure(kind.into(), kind.to_string())
    }
}
