use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::clock::Clock;
use crate::lending::age::current_age;
use crate::types::{round_calc, Rate};
use crate::{LoanSimError, LoanSimResult};

pub const MONTHS_IN_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Bracket table
// ---------------------------------------------------------------------------

/// One row of the age → yearly-rate table. `max_age: None` is the unbounded
/// final bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeRateBracket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    pub yearly_rate: Rate,
}

impl AgeRateBracket {
    pub fn up_to(max_age: u32, yearly_rate: Rate) -> Self {
        Self {
            max_age: Some(max_age),
            yearly_rate,
        }
    }

    pub fn unbounded(yearly_rate: Rate) -> Self {
        Self {
            max_age: None,
            yearly_rate,
        }
    }

    pub fn covers(&self, age: u32) -> bool {
        self.max_age.map_or(true, |max| age <= max)
    }
}

/// Ordered bracket table, consulted in ascending `max_age` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BracketTable(Vec<AgeRateBracket>);

impl Default for BracketTable {
    fn default() -> Self {
        Self(vec![
            AgeRateBracket::up_to(25, dec!(0.05)),
            AgeRateBracket::up_to(40, dec!(0.03)),
            AgeRateBracket::up_to(60, dec!(0.02)),
            AgeRateBracket::unbounded(dec!(0.04)),
        ])
    }
}

impl BracketTable {
    /// Build a table, rejecting one that would leave any age uncovered.
    pub fn new(brackets: Vec<AgeRateBracket>) -> LoanSimResult<Self> {
        let table = Self(brackets);
        table.validate()?;
        Ok(table)
    }

    pub fn brackets(&self) -> &[AgeRateBracket] {
        &self.0
    }

    /// The table must be non-empty and strictly ascending, and it must end
    /// with an unbounded bracket, so every age matches exactly one row.
    pub fn validate(&self) -> LoanSimResult<()> {
        let Some((last, bounded)) = self.0.split_last() else {
            return Err(LoanSimError::Configuration(
                "bracket table must not be empty".into(),
            ));
        };

        if last.max_age.is_some() {
            return Err(LoanSimError::Configuration(
                "final bracket must be unbounded (omit max_age)".into(),
            ));
        }

        let mut previous: Option<u32> = None;
        for (i, bracket) in bounded.iter().enumerate() {
            let Some(max_age) = bracket.max_age else {
                return Err(LoanSimError::Configuration(format!(
                    "bracket {i} is unbounded but is not the final bracket"
                )));
            };
            if previous.is_some_and(|p| max_age <= p) {
                return Err(LoanSimError::Configuration(format!(
                    "bracket {i} (max_age {max_age}) is not in ascending order"
                )));
            }
            previous = Some(max_age);
        }

        if let Some(i) = self.0.iter().position(|b| b.yearly_rate < Decimal::ZERO) {
            return Err(LoanSimError::Configuration(format!(
                "bracket {i} has a negative yearly rate"
            )));
        }

        Ok(())
    }

    /// First bracket whose `max_age` is at least `age`.
    pub fn bracket_for_age(&self, age: u32) -> LoanSimResult<&AgeRateBracket> {
        self.0.iter().find(|b| b.covers(age)).ok_or_else(|| {
            error!(age, "no rate bracket covers age; bracket table is malformed");
            LoanSimError::Configuration(format!("no rate bracket covers age {age}"))
        })
    }
}

// ---------------------------------------------------------------------------
// Interest rate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestRate {
    pub yearly_rate: Rate,
    /// yearly / 12 at 16 decimal places, half-up.
    pub monthly_rate: Rate,
}

impl InterestRate {
    pub fn from_yearly(yearly_rate: Rate) -> Self {
        Self {
            yearly_rate,
            monthly_rate: round_calc(yearly_rate / MONTHS_IN_YEAR),
        }
    }
}

pub fn rate_for_age(table: &BracketTable, age: u32) -> LoanSimResult<InterestRate> {
    let bracket = table.bracket_for_age(age)?;
    Ok(InterestRate::from_yearly(bracket.yearly_rate))
}

pub fn rate_for_birth_date(
    table: &BracketTable,
    birth_date: NaiveDate,
    clock: &dyn Clock,
) -> LoanSimResult<InterestRate> {
    rate_for_age(table, current_age(birth_date, clock))
}
