use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::{round_calc, round_money, Money, Rate, CALC_SCALE};
use crate::{LoanSimError, LoanSimResult};

/// Level payment of a fixed-rate annuity and the totals it implies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnuityTotals {
    pub periodic_payment: Money,
    /// periodic_payment × term
    pub final_value: Money,
    /// final_value − principal
    pub total_interest: Money,
}

impl AnnuityTotals {
    /// Derive totals from an already-rounded payment. Both inputs carry two
    /// decimals, so the products and differences are exact.
    pub fn from_payment(
        periodic_payment: Money,
        principal: Money,
        term_months: i32,
    ) -> LoanSimResult<Self> {
        let final_value = periodic_payment
            .checked_mul(Decimal::from(term_months))
            .ok_or_else(|| LoanSimError::overflow("final value"))?;
        Ok(Self {
            periodic_payment,
            final_value,
            total_interest: final_value - principal,
        })
    }
}

/// Level monthly payment, `A = P·r / (1 − 1/(1+r)^n)`, rounded to cents.
///
/// `(1+r)^n` is held to 16 significant digits and its reciprocal to 16 decimal
/// places before the final division, so intermediate error never reaches the
/// second decimal of the payment.
pub fn monthly_payment(principal: Money, monthly_rate: Rate, term_months: i32) -> LoanSimResult<Money> {
    if principal <= Decimal::ZERO {
        return Err(LoanSimError::invalid("principal", "principal must be positive"));
    }
    if monthly_rate < Decimal::ZERO {
        return Err(LoanSimError::invalid(
            "monthly_rate",
            "monthly rate must not be negative",
        ));
    }
    if term_months <= 0 {
        return Err(LoanSimError::invalid("term_months", "term must be positive"));
    }

    let n = Decimal::from(term_months);
    if monthly_rate.is_zero() {
        return Ok(round_money(principal / n));
    }

    let numerator = principal
        .checked_mul(monthly_rate)
        .ok_or_else(|| LoanSimError::overflow("payment numerator"))?;

    // Past Decimal's range 1/(1+r)^n is far below 1e-16, so the discount
    // rounds to zero and the payment is the interest on the principal.
    let discount = match (Decimal::ONE + monthly_rate).checked_powu(term_months as u64) {
        Some(growth) => {
            let growth = growth
                .round_sf_with_strategy(CALC_SCALE, RoundingStrategy::MidpointAwayFromZero)
                .ok_or_else(|| LoanSimError::overflow("compound growth factor"))?;
            round_calc(
                Decimal::ONE
                    .checked_div(growth)
                    .ok_or_else(|| LoanSimError::overflow("discount factor"))?,
            )
        }
        None => Decimal::ZERO,
    };
    let denominator = Decimal::ONE - discount;

    // Rate too small to move (1+r)^n at 16 digits: the annuity degenerates
    // to straight-line repayment.
    if denominator.is_zero() {
        return Ok(round_money(principal / n));
    }

    numerator
        .checked_div(denominator)
        .map(round_money)
        .ok_or_else(|| LoanSimError::overflow("monthly payment"))
}

/// Payment plus totals for a principal borrowed and repaid in one currency.
pub fn amortize(principal: Money, monthly_rate: Rate, term_months: i32) -> LoanSimResult<AnnuityTotals> {
    let payment = monthly_payment(principal, monthly_rate, term_months)?;
    AnnuityTotals::from_payment(payment, principal, term_months)
}
