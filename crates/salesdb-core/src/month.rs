//! Month-of-year tokens accepted by the statistics and listing endpoints.
//!
//! Callers pass either an English month name (`"March"`, `"mar"`) or a number
//! (`"3"`, `"03"`). Resolution is a plain lookup; there is no reference year
//! and no locale-dependent date parsing.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonthError {
    #[error("invalid month \"{0}\": expected a month name or a number from 1 to 12")]
    Invalid(String),
}

/// A calendar month, `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(u8);

impl Month {
    /// Builds a month from its number, `1` for January.
    ///
    /// # Errors
    ///
    /// Returns [`MonthError::Invalid`] when `number` is outside `1..=12`.
    pub fn from_number(number: u32) -> Result<Self, MonthError> {
        u8::try_from(number)
            .ok()
            .filter(|n| (1..=12).contains(n))
            .map(Self)
            .ok_or_else(|| MonthError::Invalid(number.to_string()))
    }

    #[must_use]
    pub fn number(self) -> u32 {
        u32::from(self.0)
    }

    /// Full lowercase English name, e.g. `"march"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        MONTH_NAMES[usize::from(self.0 - 1)]
    }
}

impl FromStr for Month {
    type Err = MonthError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(MonthError::Invalid(raw.to_string()));
        }

        if token.bytes().all(|b| b.is_ascii_digit()) {
            return token
                .parse::<u32>()
                .ok()
                .and_then(|n| Self::from_number(n).ok())
                .ok_or_else(|| MonthError::Invalid(raw.to_string()));
        }

        let lower = token.to_ascii_lowercase();
        MONTH_NAMES
            .iter()
            .position(|name| *name == lower || (lower.len() == 3 && name.starts_with(&lower)))
            .and_then(|idx| u8::try_from(idx + 1).ok())
            .map(Self)
            .ok_or_else(|| MonthError::Invalid(raw.to_string()))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
