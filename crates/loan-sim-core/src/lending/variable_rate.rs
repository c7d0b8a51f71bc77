use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::lending::amortization::monthly_payment;
use crate::types::{round_calc, Money, Rate};
use crate::{LoanSimError, LoanSimResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableRateConfig {
    /// Added to the accumulated drift every month; the drift is then added to
    /// the variable part of the rate.
    pub drift_step: Rate,
}

impl Default for VariableRateConfig {
    fn default() -> Self {
        Self {
            drift_step: dec!(0.00000003),
        }
    }
}

impl VariableRateConfig {
    pub fn validate(&self) -> LoanSimResult<()> {
        if self.drift_step < Decimal::ZERO {
            return Err(LoanSimError::Configuration(
                "variable_rate.drift_step must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// One month of a variable-rate schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentStep {
    /// 1-based month number.
    pub index: u32,
    pub payment: Money,
    pub fix_rate_part: Rate,
    pub variable_rate_part: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableRateLoanSimulation {
    pub final_value: Money,
    pub total_interest: Money,
    pub original_value: Money,
    pub term_months: i32,
    pub evolution: Vec<PaymentStep>,
}

/// Month-by-month simulation of a loan whose rate is `fixed_rate` plus a
/// variable part starting at `index_variation` and drifting upward.
///
/// Each month's payment is the annuity on the current outstanding balance over
/// the full original term.
pub fn simulate_variable_rate_loan(
    principal: Money,
    term_months: i32,
    fixed_rate: Rate,
    index_variation: Rate,
    config: &VariableRateConfig,
) -> LoanSimResult<VariableRateLoanSimulation> {
    simulate_with(
        principal,
        term_months,
        fixed_rate,
        index_variation,
        config,
        monthly_payment,
    )
}

/// Stepping loop with the payment function injected.
pub(crate) fn simulate_with<F>(
    principal: Money,
    term_months: i32,
    fixed_rate: Rate,
    index_variation: Rate,
    config: &VariableRateConfig,
    payment_fn: F,
) -> LoanSimResult<VariableRateLoanSimulation>
where
    F: Fn(Money, Rate, i32) -> LoanSimResult<Money>,
{
    if term_months <= 0 {
        return Err(LoanSimError::invalid("term_months", "term must be positive"));
    }

    let amortization_step = round_calc(principal / Decimal::from(term_months));
    let mut amortized = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;
    let mut variable_rate = index_variation;
    let mut drift = Decimal::ZERO;
    let mut evolution = Vec::with_capacity(term_months as usize);

    for index in 1..=term_months as u32 {
        let outstanding = (principal - amortized)
            .checked_add(total_paid)
            .ok_or_else(|| LoanSimError::overflow("variable-rate outstanding balance"))?;
        let payment = payment_fn(outstanding, fixed_rate + variable_rate, term_months)?;

        amortized += amortization_step;
        total_paid = total_paid
            .checked_add(payment)
            .ok_or_else(|| LoanSimError::overflow("variable-rate total paid"))?;

        evolution.push(PaymentStep {
            index,
            payment,
            fix_rate_part: fixed_rate,
            variable_rate_part: variable_rate,
        });

        drift += config.drift_step;
        variable_rate += drift;
    }

    Ok(VariableRateLoanSimulation {
        final_value: total_paid,
        total_interest: total_paid - principal,
        original_value: principal,
        term_months,
        evolution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FinancialIndex;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reference_schedule() {
        let sim = simulate_variable_rate_loan(
            dec!(200000),
            120,
            dec!(0.003333),
            FinancialIndex::IPCA.average_monthly_variation(),
            &VariableRateConfig::default(),
        )
        .unwrap();

        assert_eq!(sim.evolution.len(), 120);
        assert_eq!(sim.evolution[0].payment, dec!(2397.02));
        assert_eq!(sim.evolution[1].payment, dec!(2405.78));
        assert_eq!(sim.final_value, dec!(396119.83));
        assert_eq!(sim.total_interest, dec!(196119.83));
        assert_eq!(sim.original_value, dec!(200000));
        let indices: Vec<u32> = sim.evolution.iter().map(|s| s.index).collect();
        assert_eq!(indices, (1..=120).collect::<Vec<_>>());
    }

    #[test]
    fn test_longest_term_completes() {
        for (fixed_rate, index) in [
            (dec!(0.01), FinancialIndex::CDI),
            (dec!(0.02), FinancialIndex::TR),
        ] {
            let sim = simulate_variable_rate_loan(
                dec!(10000),
                1500,
                fixed_rate,
                index.average_monthly_variation(),
                &VariableRateConfig::default(),
            )
            .unwrap();
            assert_eq!(sim.evolution.len(), 1500);
            assert_eq!(sim.evolution[1499].index, 1500);
            assert_eq!(sim.total_interest, sim.final_value - dec!(10000));
        }
    }

    #[test]
    fn test_drift_accumulates() {
        let sim = simulate_variable_rate_loan(
            dec!(1000),
            4,
            dec!(0.01),
            dec!(0.001),
            &VariableRateConfig {
                drift_step: dec!(0.0001),
            },
        )
        .unwrap();
        let parts: Vec<Rate> = sim.evolution.iter().map(|s| s.variable_rate_part).collect();
        // drift 0.0001, 0.0002, 0.0003 added in turn
        assert_eq!(
            parts,
            vec![dec!(0.001), dec!(0.0011), dec!(0.0013), dec!(0.0016)]
        );
        assert!(sim.evolution.iter().all(|s| s.fix_rate_part == dec!(0.01)));
    }

    #[test]
    fn test_stepping_with_constant_payment() {
        let sim = simulate_with(
            dec!(200000),
            120,
            dec!(0.003333),
            dec!(0.0031),
            &VariableRateConfig::default(),
            |_, _, _| Ok(dec!(2400)),
        )
        .unwrap();
        assert_eq!(sim.final_value, dec!(288000));
        assert_eq!(sim.total_interest, dec!(88000));
    }

    #[test]
    fn test_payment_sees_growing_balance_and_full_term() {
        let seen = std::cell::RefCell::new(Vec::new());
        simulate_with(
            dec!(300),
            3,
            dec!(0.01),
            Decimal::ZERO,
            &VariableRateConfig {
                drift_step: Decimal::ZERO,
            },
            |balance, _, term| {
                seen.borrow_mut().push((balance, term));
                Ok(dec!(110))
            },
        )
        .unwrap();
        assert_eq!(
            seen.into_inner(),
            vec![(dec!(300), 3), (dec!(310), 3), (dec!(320), 3)]
        );
    }

    #[test]
    fn test_calculator_error_propagates() {
        let err = simulate_variable_rate_loan(
            dec!(-5),
            12,
            dec!(0.01),
            dec!(0.001),
            &VariableRateConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LoanSimError::InvalidInput { .. }));
    }

    #[test]
    fn test_negative_drift_rejected() {
        let config = VariableRateConfig {
            drift_step: dec!(-0.1),
        };
        assert!(config.validate().is_err());
    }
}
