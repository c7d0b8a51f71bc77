//! Static-rate currency conversion routed through the pivot currency.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Currency, Money, Rate};
use crate::{LoanSimError, LoanSimResult};

/// Conversion rate of each currency to the pivot (BRL = 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyTable(BTreeMap<Currency, Rate>);

impl Default for CurrencyTable {
    fn default() -> Self {
        Self(
            Currency::ALL
                .into_iter()
                .map(|c| (c, c.default_pivot_rate()))
                .collect(),
        )
    }
}

impl CurrencyTable {
    pub fn new(rates: BTreeMap<Currency, Rate>) -> LoanSimResult<Self> {
        let table = Self(rates);
        table.validate()?;
        Ok(table)
    }

    pub fn rate(&self, currency: Currency) -> Option<Rate> {
        self.0.get(&currency).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Currency, Rate)> + '_ {
        self.0.iter().map(|(c, r)| (*c, *r))
    }

    pub fn validate(&self) -> LoanSimResult<()> {
        for currency in Currency::ALL {
            match self.rate(currency) {
                None => {
                    return Err(LoanSimError::Configuration(format!(
                        "currency table is missing {currency}"
                    )))
                }
                Some(rate) if rate <= Decimal::ZERO => {
                    return Err(LoanSimError::Configuration(format!(
                        "currency rate for {currency} must be positive"
                    )))
                }
                Some(_) => {}
            }
        }
        if self.rate(Currency::PIVOT) != Some(Decimal::ONE) {
            return Err(LoanSimError::Configuration(format!(
                "pivot currency {} must have rate 1",
                Currency::PIVOT
            )));
        }
        Ok(())
    }
}

/// Convert `amount` from one currency to another at full precision.
///
/// Returns the amount untouched when either side is absent or both sides are
/// the same currency.
pub fn convert(
    table: &CurrencyTable,
    amount: Money,
    from: Option<Currency>,
    to: Option<Currency>,
) -> Money {
    let (Some(from), Some(to)) = (from, to) else {
        return amount;
    };
    if from == to {
        return amount;
    }
    match (table.rate(from), table.rate(to)) {
        (Some(src), Some(dst)) if !dst.is_zero() => amount * src / dst,
        _ => amount,
    }
}

/// A fixed input/output currency pair applied to every figure of one result.
#[derive(Debug, Clone, Copy)]
pub struct MonetaryConverter<'a> {
    table: &'a CurrencyTable,
    input: Currency,
    output: Currency,
}

impl<'a> MonetaryConverter<'a> {
    pub fn new(table: &'a CurrencyTable, input: Currency, output: Currency) -> Self {
        Self {
            table,
            input,
            output,
        }
    }

    pub fn output(&self) -> Currency {
        self.output
    }

    pub fn is_identity(&self) -> bool {
        self.input == self.output
    }

    pub fn convert(&self, amount: Money) -> Money {
        if self.is_identity() {
            return amount;
        }
        convert(self.table, amount, Some(self.input), Some(self.output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::round_money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_same_currency_is_noop() {
        let table = CurrencyTable::default();
        for c in Currency::ALL {
            assert_eq!(convert(&table, dec!(123.456789), Some(c), Some(c)), dec!(123.456789));
        }
    }

    #[test]
    fn test_absent_side_is_noop() {
        let table = CurrencyTable::default();
        assert_eq!(convert(&table, dec!(10), None, Some(Currency::USD)), dec!(10));
        assert_eq!(convert(&table, dec!(10), Some(Currency::USD), None), dec!(10));
    }

    #[test]
    fn test_cross_rate() {
        let table = CurrencyTable::default();
        assert_eq!(
            convert(&table, dec!(100), Some(Currency::USD), Some(Currency::BRL)),
            dec!(550)
        );
        assert_eq!(
            convert(&table, dec!(120), Some(Currency::EUR), Some(Currency::USD)),
            dec!(720) / dec!(5.5)
        );
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let table = CurrencyTable::default();
        for amount in [dec!(0.01), dec!(188.71), dec!(1000), dec!(12345.67), dec!(99999999)] {
            let usd = round_money(convert(&table, amount, Some(Currency::BRL), Some(Currency::USD)));
            let back = round_money(convert(&table, usd, Some(Currency::USD), Some(Currency::BRL)));
            assert!((back - amount).abs() <= dec!(0.03), "{amount} came back as {back}");
        }
    }

    #[test]
    fn test_missing_currency_rejected() {
        let mut rates: BTreeMap<Currency, Rate> = CurrencyTable::default().iter().collect();
        rates.remove(&Currency::JPY);
        let err = CurrencyTable::new(rates).unwrap_err();
        assert!(err.to_string().contains("JPY"));
    }

    #[test]
    fn test_pivot_must_be_one() {
        let mut rates: BTreeMap<Currency, Rate> = CurrencyTable::default().iter().collect();
        rates.insert(Currency::BRL, dec!(2));
        assert!(CurrencyTable::new(rates).is_err());
    }

    #[test]
    fn test_converter_binds_pair() {
        let table = CurrencyTable::default();
        let converter = MonetaryConverter::new(&table, Currency::BRL, Currency::USD);
        assert!(!converter.is_identity());
        assert_eq!(converter.convert(dec!(11)), dec!(2));
        assert_eq!(converter.output(), Currency::USD);
    }

    #[test]
    fn test_identity_converter_keeps_scale() {
        let table = CurrencyTable::default();
        let converter = MonetaryConverter::new(&table, Currency::EUR, Currency::EUR);
        assert!(converter.is_identity());
        assert_eq!(converter.convert(dec!(188.705)).to_string(), "188.705");
    }
}
