use std::borrow::Cow;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use validator::ValidationError;

/// Calendar years a shift or view anchor may fall in.
pub const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1970..=9999;

/// Validation failure with a readable message attached.
pub fn failure(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn non_negative_rate(rate: &Decimal) -> Result<(), ValidationError> {
    if rate.is_sign_negative() && !rate.is_zero() {
        return Err(failure("hourly_rate", "Hourly rate cannot be negative"));
    }
    Ok(())
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(failure("blank", "Value cannot be blank"));
    }
    Ok(())
}

pub fn supported_date(date: &NaiveDate) -> Result<(), ValidationError> {
    if !SUPPORTED_YEARS.contains(&date.year()) {
        return Err(failure("date_range", "Date must fall between 1970 and 9999"));
    }
    Ok(())
}

pub fn supported_datetime(value: &NaiveDateTime) -> Result<(), ValidationError> {
    supported_date(&value.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_must_not_be_negative() {
        assert!(non_negative_rate(&Decimal::new(4550, 2)).is_ok());
        assert!(non_negative_rate(&Decimal::ZERO).is_ok());
        assert!(non_negative_rate(&Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn whitespace_is_blank() {
        assert!(not_blank("  ").is_err());
        assert!(not_blank("Barista").is_ok());
    }

    #[test]
    fn far_future_dates_are_unsupported() {
        let ok = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert!(supported_date(&ok).is_ok());
        assert!(supported_date(&NaiveDate::MAX).is_err());
        assert!(supported_datetime(&NaiveDate::MIN.and_hms_opt(9, 0, 0).unwrap()).is_err());
    }
}
