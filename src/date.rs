//! Travel date parsing
//!
//! Dates arrive as free text in `MM-DD-YYYY` form. Only calendar validity
//! matters; the month is the only part used downstream.

use crate::{Result, WhenToGoError};
use chrono::{Datelike, Month, NaiveDate};
use std::fmt;

/// Message shown for any malformed date
pub const INVALID_DATE_MESSAGE: &str = "Please enter a valid date in MM-DD-YYYY format";

/// A validated calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateToken {
    date: NaiveDate,
}

/// Calendar month, 1-12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthToken(u32);

impl DateToken {
    /// Parse `MM-DD-YYYY`; anything else, or an impossible date, is a validation error.
    pub fn parse(raw: &str) -> Result<Self> {
        let fields: Vec<&str> = raw.trim().split('-').collect();
        let [month, day, year] = fields.as_slice() else {
            return Err(WhenToGoError::validation(INVALID_DATE_MESSAGE));
        };

        let month = parse_field(month)?;
        let day = parse_field(day)?;
        let year = parse_field(year)?;
        if !(1..=9999).contains(&year) {
            return Err(WhenToGoError::validation(INVALID_DATE_MESSAGE));
        }

        let year =
            i32::try_from(year).map_err(|_| WhenToGoError::validation(INVALID_DATE_MESSAGE))?;
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| Self { date })
            .ok_or_else(|| WhenToGoError::validation(INVALID_DATE_MESSAGE))
    }

    #[must_use]
    pub fn month(&self) -> MonthToken {
        MonthToken(self.date.month())
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

fn parse_field(field: &str) -> Result<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WhenToGoError::validation(INVALID_DATE_MESSAGE));
    }
    field
        .parse::<u32>()
        .map_err(|_| WhenToGoError::validation(INVALID_DATE_MESSAGE))
}

impl MonthToken {
    /// Build from a month number; `None` outside 1-12
    #[must_use]
    pub fn new(month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self(month))
    }

    #[must_use]
    pub fn number(&self) -> u32 {
        self.0
    }

    /// Two-digit form used in feed file names, e.g. `"07"`
    #[must_use]
    pub fn two_digit(&self) -> String {
        format!("{:02}", self.0)
    }

    /// English month name, e.g. `"July"`
    #[must_use]
    pub fn name(&self) -> &'static str {
        u8::try_from(self.0)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map_or("Unknown", |m| m.name())
    }
}

impl fmt::Display for DateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%m-%d-%Y"))
    }
}

impl fmt::Display for MonthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.two_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("07-04-2024", "07")]
    #[case("12-31-1999", "12")]
    #[case("02-29-2024", "02")]
    #[case("7-4-2024", "07")]
    #[case("  01-15-2023 ", "01")]
    fn test_valid_dates_yield_two_digit_month(#[case] raw: &str, #[case] month: &str) {
        let token = DateToken::parse(raw).unwrap();
        assert_eq!(token.month().two_digit(), month);
    }

    #[rstest]
    #[case("")]
    #[case("07/04/2024")]
    #[case("07-04")]
    #[case("07-04-2024-01")]
    #[case("13-01-2024")]
    #[case("02-30-2024")]
    #[case("02-29-2023")]
    #[case("00-10-2024")]
    #[case("ab-01-2024")]
    #[case("01--2024")]
    #[case("-1-01-2024")]
    #[case("01-01-0000")]
    fn test_invalid_dates_are_rejected(#[case] raw: &str) {
        let err = DateToken::parse(raw).unwrap_err();
        assert!(matches!(err, WhenToGoError::Validation { .. }));
        assert_eq!(err.user_message(), INVALID_DATE_MESSAGE);
    }

    #[test]
    fn test_month_name() {
        let token = DateToken::parse("09-01-2022").unwrap();
        assert_eq!(token.month().name(), "September");
        assert_eq!(token.day(), 1);
        assert_eq!(token.year(), 2022);
    }

    #[test]
    fn test_display_is_canonical() {
        let token = DateToken::parse("7-4-2024").unwrap();
        assert_eq!(token.to_string(), "07-04-2024");
    }

    #[test]
    fn test_month_token_bounds() {
        assert!(MonthToken::new(0).is_none());
        assert!(MonthToken::new(13).is_none());
        assert_eq!(MonthToken::new(3).unwrap().name(), "March");
    }
}
