use chrono::NaiveDate;

use crate::clock::Clock;

/// Whole years elapsed between `birth_date` and `reference`, counted on the
/// calendar: the year only completes on the anniversary itself. A birth date
/// after the reference date yields 0.
pub fn age_on(birth_date: NaiveDate, reference: NaiveDate) -> u32 {
    reference.years_since(birth_date).unwrap_or(0)
}

/// Age as of the clock's current date.
pub fn current_age(birth_date: NaiveDate, clock: &dyn Clock) -> u32 {
    age_on(birth_date, clock.today())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_exact_anniversary_counts() {
        assert_eq!(age_on(date(2024, 3, 9), date(2025, 3, 9)), 1);
    }

    #[test]
    fn test_day_before_anniversary_keeps_prior_year() {
        assert_eq!(age_on(date(1985, 3, 10), date(2025, 3, 9)), 39);
        assert_eq!(age_on(date(2024, 4, 11), date(2025, 3, 9)), 0);
    }

    #[test]
    fn test_forty_years() {
        let clock = FixedClock::new(date(2025, 3, 9));
        assert_eq!(current_age(date(1985, 1, 19), &clock), 40);
    }

    #[test]
    fn test_leap_day_birthday() {
        assert_eq!(age_on(date(2000, 2, 29), date(2001, 2, 28)), 0);
        assert_eq!(age_on(date(2000, 2, 29), date(2001, 3, 1)), 1);
    }

    #[test]
    fn test_future_birth_date_is_zero() {
        assert_eq!(age_on(date(2030, 1, 1), date(2025, 3, 9)), 0);
    }
}
