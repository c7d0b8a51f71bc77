use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lending::age::age_on;
use crate::lending::scenario::{LoanScenario, VariableRateScenario};
use crate::types::Money;
use crate::{LoanSimError, LoanSimResult};

/// Why a scenario was refused. Carries no user-facing text; see
/// [`crate::messages`] for localized rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    #[error("birth date is in the future")]
    FutureBirthDate,
    #[error("principal is below the minimum")]
    PrincipalTooLow,
    #[error("term must be positive")]
    NonPositiveTerm,
    #[error("borrower is below the minimum age")]
    BorrowerTooYoung,
    #[error("term exceeds the maximum")]
    TermTooLong,
    #[error("principal exceeds the maximum")]
    PrincipalTooHigh,
}

impl ValidationErrorKind {
    /// Stable message key used by message bundles.
    pub fn code(self) -> &'static str {
        match self {
            ValidationErrorKind::FutureBirthDate => "error.birthdate.future",
            ValidationErrorKind::PrincipalTooLow => "error.min.loan.value",
            ValidationErrorKind::NonPositiveTerm => "error.min.months.number",
            ValidationErrorKind::BorrowerTooYoung => "too.young.to.receive.loan",
            ValidationErrorKind::TermTooLong => "loan.duration.too.long",
            ValidationErrorKind::PrincipalTooHigh => "loan.value.too.high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    pub min_age: u32,
    pub min_principal: Money,
    pub max_principal: Money,
    pub max_term_months: i32,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            min_age: 18,
            min_principal: Decimal::ONE,
            max_principal: dec!(99_999_999),
            max_term_months: 1500,
        }
    }
}

impl ValidationLimits {
    pub fn validate(&self) -> LoanSimResult<()> {
        if self.min_principal <= Decimal::ZERO {
            return Err(LoanSimError::Configuration(
                "limits.min_principal must be positive".into(),
            ));
        }
        if self.max_principal < self.min_principal {
            return Err(LoanSimError::Configuration(
                "limits.max_principal must not be below limits.min_principal".into(),
            ));
        }
        if self.max_term_months <= 0 {
            return Err(LoanSimError::Configuration(
                "limits.max_term_months must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Check a fixed-rate scenario against `limits` as of `today`.
///
/// Checks run in a fixed order and stop at the first failure: birth date,
/// minimum principal, positive term, minimum age, maximum term, maximum
/// principal.
pub fn validate_scenario(
    scenario: &LoanScenario,
    limits: &ValidationLimits,
    today: NaiveDate,
) -> Result<(), ValidationErrorKind> {
    if scenario.birth_date > today {
        return Err(ValidationErrorKind::FutureBirthDate);
    }
    if scenario.principal < limits.min_principal {
        return Err(ValidationErrorKind::PrincipalTooLow);
    }
    if scenario.term_months <= 0 {
        return Err(ValidationErrorKind::NonPositiveTerm);
    }
    if age_on(scenario.birth_date, today) < limits.min_age {
        return Err(ValidationErrorKind::BorrowerTooYoung);
    }
    if scenario.term_months > limits.max_term_months {
        return Err(ValidationErrorKind::TermTooLong);
    }
    if scenario.principal > limits.max_principal {
        return Err(ValidationErrorKind::PrincipalTooHigh);
    }
    Ok(())
}

/// Same amount and term checks, in the same order, for a variable-rate loan.
pub fn validate_variable_scenario(
    scenario: &VariableRateScenario,
    limits: &ValidationLimits,
) -> Result<(), ValidationErrorKind> {
    if scenario.principal < limits.min_principal {
        return Err(ValidationErrorKind::PrincipalTooLow);
    }
    if scenario.term_months <= 0 {
        return Err(ValidationErrorKind::NonPositiveTerm);
    }
    if scenario.term_months > limits.max_term_months {
        return Err(ValidationErrorKind::TermTooLong);
    }
    if scenario.principal > limits.max_principal {
        return Err(ValidationErrorKind::PrincipalTooHigh);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FinancialIndex;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    fn scenario(principal: Money, birth: (i32, u32, u32), term: i32) -> LoanScenario {
        let birth_date = NaiveDate::from_ymd_opt(birth.0, birth.1, birth.2).unwrap();
        LoanScenario::new(principal, birth_date, term)
    }

    fn check(s: &LoanScenario) -> Result<(), ValidationErrorKind> {
        validate_scenario(s, &ValidationLimits::default(), today())
    }

    #[test]
    fn test_valid_parameter() {
        assert_eq!(check(&scenario(dec!(1000), (2000, 3, 3), 12)), Ok(()));
    }

    #[test]
    fn test_zero_and_negative_principal() {
        let expected = Err(ValidationErrorKind::PrincipalTooLow);
        assert_eq!(check(&scenario(Decimal::ZERO, (2000, 3, 3), 12)), expected);
        assert_eq!(check(&scenario(dec!(-1), (2000, 3, 3), 12)), expected);
        assert_eq!(check(&scenario(dec!(0.99), (2000, 3, 3), 12)), expected);
    }

    #[test]
    fn test_future_birth_date() {
        assert_eq!(
            check(&scenario(dec!(1000), (2025, 3, 4), 12)),
            Err(ValidationErrorKind::FutureBirthDate)
        );
    }

    #[test]
    fn test_born_today_is_not_future() {
        assert_eq!(
            check(&scenario(dec!(1000), (2025, 3, 3), 12)),
            Err(ValidationErrorKind::BorrowerTooYoung)
        );
    }

    #[test]
    fn test_non_positive_term() {
        assert_eq!(
            check(&scenario(dec!(1000), (2000, 3, 3), 0)),
            Err(ValidationErrorKind::NonPositiveTerm)
        );
        assert_eq!(
            check(&scenario(dec!(1000), (2000, 3, 3), -1)),
            Err(ValidationErrorKind::NonPositiveTerm)
        );
    }

    #[test]
    fn test_minimum_age_boundary() {
        assert_eq!(
            check(&scenario(dec!(1000), (2007, 3, 4), 12)),
            Err(ValidationErrorKind::BorrowerTooYoung)
        );
        assert_eq!(check(&scenario(dec!(1000), (2007, 3, 3), 12)), Ok(()));
    }

    #[test]
    fn test_term_and_principal_caps() {
        assert_eq!(check(&scenario(dec!(1000), (2000, 3, 3), 1500)), Ok(()));
        assert_eq!(
            check(&scenario(dec!(1000), (2000, 3, 3), 1501)),
            Err(ValidationErrorKind::TermTooLong)
        );
        assert_eq!(check(&scenario(dec!(99_999_999), (2000, 3, 3), 12)), Ok(()));
        assert_eq!(
            check(&scenario(dec!(100_000_000), (2000, 3, 3), 12)),
            Err(ValidationErrorKind::PrincipalTooHigh)
        );
    }

    #[test]
    fn test_first_failure_wins() {
        // Future birth date, zero principal and zero term all at once.
        assert_eq!(
            check(&scenario(Decimal::ZERO, (2026, 1, 1), 0)),
            Err(ValidationErrorKind::FutureBirthDate)
        );
        // Low principal beats a bad term.
        assert_eq!(
            check(&scenario(dec!(-1), (2000, 1, 1), 0)),
            Err(ValidationErrorKind::PrincipalTooLow)
        );
        // Too young beats too long.
        assert_eq!(
            check(&scenario(dec!(1000), (2015, 1, 1), 5000)),
            Err(ValidationErrorKind::BorrowerTooYoung)
        );
        // Too long beats too high.
        assert_eq!(
            check(&scenario(dec!(500_000_000), (2000, 1, 1), 5000)),
            Err(ValidationErrorKind::TermTooLong)
        );
    }

    #[test]
    fn test_variable_scenario_checks() {
        let limits = ValidationLimits::default();
        let mut s = VariableRateScenario {
            principal: dec!(200000),
            term_months: 120,
            fixed_rate: dec!(0.003333),
            financial_index: FinancialIndex::IPCA,
        };
        assert_eq!(validate_variable_scenario(&s, &limits), Ok(()));
        s.term_months = 0;
        assert_eq!(
            validate_variable_scenario(&s, &limits),
            Err(ValidationErrorKind::NonPositiveTerm)
        );
    }

    #[test]
    fn test_codes_are_distinct() {
        let kinds = [
            ValidationErrorKind::FutureBirthDate,
            ValidationErrorKind::PrincipalTooLow,
            ValidationErrorKind::NonPositiveTerm,
            ValidationErrorKind::BorrowerTooYoung,
            ValidationErrorKind::TermTooLong,
            ValidationErrorKind::PrincipalTooHigh,
        ];
        let codes: std::collections::HashSet<_> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_inconsistent_limits_rejected() {
        let limits = ValidationLimits {
            max_principal: dec!(0.5),
            ..ValidationLimits::default()
        };
        assert!(limits.validate().is_err());
    }
}
