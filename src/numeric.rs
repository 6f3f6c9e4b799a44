//! Locale-aware decimal parsing for report `time` values.
//!
//! Surefire writes elapsed times with the number formatting of the JVM that
//! produced the report, so `1,234.5` and `1,5` both show up in the wild.
//! [`parse_decimal`] accepts grouped digits for the configured
//! [`NumberLocale`] and rejects anything else.

use crate::error::{Error, Result};

/// Decimal and grouping separators used when reading numeric text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberLocale {
    /// Character separating the integer part from the fraction
    pub decimal_separator: char,
    /// Character separating groups of three integer digits
    pub grouping_separator: char,
}

impl NumberLocale {
    /// English formatting: `1,234.5`.
    pub const ENGLISH: NumberLocale = NumberLocale {
        decimal_separator: '.',
        grouping_separator: ',',
    };

    /// German formatting: `1.234,5`.
    pub const GERMAN: NumberLocale = NumberLocale {
        decimal_separator: ',',
        grouping_separator: '.',
    };

    /// Creates a locale from explicit separators.
    ///
    /// The two separators are expected to differ.
    pub fn new(decimal_separator: char, grouping_separator: char) -> Self {
        Self {
            decimal_separator,
            grouping_separator,
        }
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::ENGLISH
    }
}

/// Parses `text` as a decimal number written in `locale`.
///
/// Surrounding whitespace and a leading `-` are accepted. Grouping
/// separators must introduce groups of exactly three digits. When the text
/// has no decimal separator but a single grouping separator that does not
/// start a three-digit group, that separator is taken as the decimal mark,
/// so `1,5` reads as `1.5` under [`NumberLocale::ENGLISH`].
pub fn parse_decimal(text: &str, locale: NumberLocale) -> Result<f64> {
    let invalid = || Error::InvalidNumber(text.to_string());

    let trimmed = text.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let (int_part, fraction) = split_fraction(body, locale).ok_or_else(invalid)?;
    let digits = integer_digits(int_part, locale.grouping_separator).ok_or_else(invalid)?;
    if !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if digits.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }

    let mut canonical = String::with_capacity(digits.len() + fraction.len() + 3);
    if negative {
        canonical.push('-');
    }
    canonical.push_str(if digits.is_empty() { "0" } else { &digits });
    if !fraction.is_empty() {
        canonical.push('.');
        canonical.push_str(fraction);
    }

    canonical.parse::<f64>().map_err(|_| invalid())
}

/// Splits a number body into integer text and fraction digits.
fn split_fraction(body: &str, locale: NumberLocale) -> Option<(&str, &str)> {
    if let Some((int_part, fraction)) = body.split_once(locale.decimal_separator) {
        if fraction.contains(locale.decimal_separator) {
            return None;
        }
        return Some((int_part, fraction));
    }

    // Decimal-comma fallback: exactly one separator, not followed by a group.
    let mut groups = body.split(locale.grouping_separator);
    if let (Some(whole), Some(fraction), None) = (groups.next(), groups.next(), groups.next()) {
        if !whole.is_empty() && fraction.len() != 3 {
            return Some((whole, fraction));
        }
    }

    Some((body, ""))
}

/// Strips grouping separators, checking every group after the first holds
/// exactly three digits.
fn integer_digits(int_part: &str, grouping_separator: char) -> Option<String> {
    let mut groups = int_part.split(grouping_separator);
    let first = groups.next().unwrap_or_default();
    if !first.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut digits = first.to_string();
    for group in groups {
        if first.is_empty() || !group.chars().all(|c| c.is_ascii_digit()) || group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}
