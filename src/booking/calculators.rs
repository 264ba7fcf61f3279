//! Core pricing calculation functions.
//!
//! Pure functions for rental pricing math - no storage access.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// Fixed tax rate applied to every rental (23%)
pub const TAX_RATE: Decimal = dec!(0.23);

/// Date format accepted from the date pickers
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Round to specified decimal places, halves away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use rentingcar_web::booking::round_money;
///
/// assert_eq!(round_money(dec!(2.345), 2), dec!(2.35));
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Why a quote could not be produced
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    #[error("Please select start and end dates")]
    MissingDate,

    #[error("Date '{0}' is not a valid calendar date")]
    UnparseableDate(String),

    #[error("Daily rate must be a positive amount")]
    NonPositiveRate,

    #[error("End date must not be before start date")]
    EndBeforeStart,

    #[error("Amount to pay is too large")]
    AmountTooLarge,
}

/// Candidate rental period, both ends inclusive.
///
/// Not guaranteed ordered; `day_count` is non-positive when `end` precedes `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl RentalInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse the raw date-picker values. Blank counts as missing.
    pub fn from_fields(start: Option<&str>, end: Option<&str>) -> Result<Self, QuoteError> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Ok(Self { start, end })
    }

    /// Whole days between the two dates, plus one for the inclusive end
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

fn parse_date(raw: Option<&str>) -> Result<NaiveDate, QuoteError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or(QuoteError::MissingDate)?;
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| QuoteError::UnparseableDate(raw.to_string()))
}

/// Breakdown of a rental payment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentTotal {
    pub day_count: i64,
    pub daily_rate: Decimal,
    pub subtotal: Decimal,
    pub tax: Decimal,
    /// `subtotal + tax`, rounded to cents
    pub total: Decimal,
}

/// Compute the amount to pay for renting at `daily_rate` over `interval`.
///
/// `total = round(days * rate * 1.23, 2)`. Only the final amount is rounded;
/// `subtotal` and `tax` are exact.
pub fn compute_total(interval: &RentalInterval, daily_rate: Decimal) -> Result<PaymentTotal, QuoteError> {
    if daily_rate <= Decimal::ZERO {
        return Err(QuoteError::NonPositiveRate);
    }

    let day_count = interval.day_count();
    if day_count <= 0 {
        return Err(QuoteError::EndBeforeStart);
    }

    let subtotal = Decimal::from(day_count)
        .checked_mul(daily_rate)
        .ok_or(QuoteError::AmountTooLarge)?;
    let tax = subtotal.checked_mul(TAX_RATE).ok_or(QuoteError::AmountTooLarge)?;
    let total = subtotal.checked_add(tax).ok_or(QuoteError::AmountTooLarge)?;

    Ok(PaymentTotal {
        day_count,
        daily_rate,
        subtotal,
        tax,
        total: round_money(total, 2),
    })
}

/// Quote straight from form values: raw dates and an optional rate.
pub fn quote(
    start: Option<&str>,
    end: Option<&str>,
    daily_rate: Option<Decimal>,
) -> Result<PaymentTotal, QuoteError> {
    let interval = RentalInterval::from_fields(start, end)?;
    compute_total(&interval, daily_rate.ok_or(QuoteError::NonPositiveRate)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn interval(start: &str, end: &str) -> RentalInterval {
        RentalInterval::new(date(start), date(end))
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(3));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(2.345), 2), dec!(2.35));
        assert_eq!(round_money(dec!(2.344), 2), dec!(2.34));
        assert_eq!(round_money(dec!(0.005), 2), dec!(0.01));
    }

    #[test]
    fn test_round_money_negative() {
        assert_eq!(round_money(dec!(-2.5), 0), dec!(-3));
        assert_eq!(round_money(dec!(-1.234), 2), dec!(-1.23));
    }

    // ==================== day_count tests ====================

    #[test]
    fn test_day_count_inclusive() {
        assert_eq!(interval("2025-10-01", "2025-10-07").day_count(), 7);
        assert_eq!(interval("2025-10-01", "2025-10-01").day_count(), 1);
        assert_eq!(interval("2025-10-02", "2025-10-01").day_count(), 0);
        assert_eq!(interval("2025-10-05", "2025-10-01").day_count(), -3);
    }

    #[test]
    fn test_day_count_across_month_and_leap_day() {
        assert_eq!(interval("2024-02-28", "2024-03-01").day_count(), 3);
        assert_eq!(interval("2025-12-31", "2026-01-01").day_count(), 2);
    }

    // ==================== compute_total tests ====================

    #[test]
    fn test_compute_total_week() {
        let total = compute_total(&interval("2025-10-01", "2025-10-07"), dec!(40000)).unwrap();
        assert_eq!(total.day_count, 7);
        assert_eq!(total.subtotal, dec!(280000));
        assert_eq!(total.tax, dec!(64400));
        assert_eq!(total.total, dec!(344400.00));
    }

    #[test]
    fn test_compute_total_single_day() {
        let total = compute_total(&interval("2025-10-01", "2025-10-01"), dec!(37)).unwrap();
        assert_eq!(total.day_count, 1);
        assert_eq!(total.total, dec!(45.51));
    }

    #[test]
    fn test_compute_total_rounds_to_cents() {
        // 3 * 19.99 = 59.97, * 1.23 = 73.7631
        let total = compute_total(&interval("2025-01-01", "2025-01-03"), dec!(19.99)).unwrap();
        assert_eq!(total.total, dec!(73.76));
        assert_eq!(total.total.scale(), 2);

        // 1 * 0.05 * 1.23 = 0.0615 -> 0.06
        let total = compute_total(&interval("2025-01-01", "2025-01-01"), dec!(0.05)).unwrap();
        assert_eq!(total.total, dec!(0.06));
    }

    #[test]
    fn test_compute_total_no_float_artifacts() {
        // 1.005 * 1.23 = 1.23615 exactly in decimal
        let total = compute_total(&interval("2025-01-01", "2025-01-01"), dec!(1.005)).unwrap();
        assert_eq!(total.total, dec!(1.24));
    }

    #[test]
    fn test_compute_total_end_before_start() {
        let err = compute_total(&interval("2025-10-07", "2025-10-01"), dec!(40)).unwrap_err();
        assert_eq!(err, QuoteError::EndBeforeStart);
    }

    #[test]
    fn test_compute_total_non_positive_rate() {
        let range = interval("2025-10-01", "2025-10-02");
        assert_eq!(compute_total(&range, dec!(0)).unwrap_err(), QuoteError::NonPositiveRate);
        assert_eq!(compute_total(&range, dec!(-5)).unwrap_err(), QuoteError::NonPositiveRate);
    }

    #[test]
    fn test_compute_total_is_pure() {
        let range = interval("2025-03-10", "2025-03-14");
        let first = compute_total(&range, dec!(33.33)).unwrap();
        let second = compute_total(&range, dec!(33.33)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_compute_total_matches_formula_over_range() {
        let start = date("2025-01-01");
        for offset in 0..40i64 {
            let end = start + chrono::Duration::days(offset);
            for rate in [dec!(10), dec!(12.5), dec!(49.99)] {
                let total = compute_total(&RentalInterval::new(start, end), rate).unwrap();
                let days = Decimal::from(offset + 1);
                assert_eq!(total.total, round_money(days * rate * dec!(1.23), 2));
            }
        }
    }

    #[test]
    fn test_compute_total_overflow_is_an_error() {
        let range = interval("2025-10-01", "2025-10-02");
        assert_eq!(compute_total(&range, Decimal::MAX).unwrap_err(), QuoteError::AmountTooLarge);

        // subtotal fits, adding tax does not
        let single = interval("2025-10-01", "2025-10-01");
        assert_eq!(compute_total(&single, Decimal::MAX).unwrap_err(), QuoteError::AmountTooLarge);
    }

    // ==================== quote tests ====================

    #[test]
    fn test_quote_from_form_values() {
        let total = quote(Some("2025-10-01"), Some("2025-10-03"), Some(dec!(20))).unwrap();
        assert_eq!(total.total, dec!(73.80));
    }

    #[test]
    fn test_quote_missing_values() {
        assert_eq!(quote(None, Some("2025-10-03"), Some(dec!(20))).unwrap_err(), QuoteError::MissingDate);
        assert_eq!(quote(Some("  "), Some("2025-10-03"), Some(dec!(20))).unwrap_err(), QuoteError::MissingDate);
        assert_eq!(
            quote(Some("2025-10-01"), Some("2025-10-03"), None).unwrap_err(),
            QuoteError::NonPositiveRate
        );
    }

    #[test]
    fn test_quote_huge_rate() {
        let err = quote(Some("2025-10-01"), Some("2025-10-02"), Some(Decimal::MAX)).unwrap_err();
        assert_eq!(err, QuoteError::AmountTooLarge);
    }

    #[test]
    fn test_quote_unparseable_date() {
        let err = quote(Some("2025-02-30"), Some("2025-03-03"), Some(dec!(20))).unwrap_err();
        assert_eq!(err, QuoteError::UnparseableDate("2025-02-30".to_string()));

        let err = quote(Some("yesterday"), Some("2025-03-03"), Some(dec!(20))).unwrap_err();
        assert!(matches!(err, QuoteError::UnparseableDate(_)));
    }
}
