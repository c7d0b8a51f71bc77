use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LoanSimError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Decimal places carried by every monetary figure in a result.
pub const MONETARY_SCALE: u32 = 2;

/// Decimal places (or significant digits, for powers) carried by intermediate
/// rate arithmetic.
pub const CALC_SCALE: u32 = 16;

/// Round a monetary amount to cents, ties away from zero.
pub fn round_money(amount: Money) -> Money {
    amount.round_dp_with_strategy(MONETARY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Round an intermediate rate figure to `CALC_SCALE` decimal places, half-up.
pub fn round_calc(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CALC_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Currency code. BRL is the pivot every conversion is routed through.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Currency {
    #[default]
    BRL,
    USD,
    EUR,
    JPY,
    CNY,
}

impl Currency {
    pub const PIVOT: Currency = Currency::BRL;

    pub const ALL: [Currency; 5] = [
        Currency::BRL,
        Currency::USD,
        Currency::EUR,
        Currency::JPY,
        Currency::CNY,
    ];

    /// Reference conversion rate to the pivot currency.
    pub fn default_pivot_rate(self) -> Rate {
        match self {
            Currency::BRL => Decimal::ONE,
            Currency::USD => dec!(5.5),
            Currency::EUR => dec!(6.0),
            Currency::JPY => dec!(0.05),
            Currency::CNY => dec!(0.85),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::JPY => "JPY",
            Currency::CNY => "CNY",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = LoanSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LoanSimError::InvalidInput {
                field: "currency".into(),
                reason: format!("Unknown currency code '{s}'"),
            })
    }
}

/// Market index whose average monthly variation seeds the variable part of a
/// floating rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinancialIndex {
    CDI,
    TR,
    IPCA,
}

impl FinancialIndex {
    /// Average monthly variation as a decimal (0.0031 = 0.31%).
    pub fn average_monthly_variation(self) -> Rate {
        match self {
            FinancialIndex::CDI => dec!(0.004),
            FinancialIndex::TR => dec!(0.0001),
            FinancialIndex::IPCA => dec!(0.0031),
        }
    }
}

impl FromStr for FinancialIndex {
    type Err = LoanSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CDI" => Ok(FinancialIndex::CDI),
            "TR" => Ok(FinancialIndex::TR),
            "IPCA" => Ok(FinancialIndex::IPCA),
            other => Err(LoanSimError::InvalidInput {
                field: "financial_index".into(),
                reason: format!("Unknown financial index '{other}'"),
            }),
        }
    }
}
