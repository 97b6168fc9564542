//! Year-month period codes.
//!
//! Attendance and salary figures are requested per calendar month, identified
//! by a six-digit `YYYYMM` code such as `201504`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A validated calendar month.
///
/// Serializes as its numeric `YYYYMM` code and rejects malformed codes on
/// deserialization, so a `YearMonth` held anywhere in the engine is always valid.
///
/// # Example
///
/// ```
/// use salary_engine::models::YearMonth;
///
/// let period = YearMonth::from_code(201504).unwrap();
/// assert_eq!(period.year(), 2015);
/// assert_eq!(period.month(), 4);
/// assert_eq!(period.code(), 201504);
/// assert!(YearMonth::from_code(201513).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct YearMonth {
    year: u16,
    month: u8,
}

impl YearMonth {
    /// The earliest representable period.
    pub(crate) const MIN: YearMonth = YearMonth { year: 1000, month: 1 };

    /// The latest representable period.
    pub(crate) const MAX: YearMonth = YearMonth {
        year: 9999,
        month: 12,
    };

    /// Creates a period from a year and a month (1–12).
    pub fn new(year: u16, month: u8) -> EngineResult<Self> {
        if !(1000..=9999).contains(&year) {
            return Err(EngineError::InvalidPeriod {
                code: format!("{:04}{:02}", year, month),
                message: "year must have four digits".to_string(),
            });
        }
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod {
                code: format!("{:04}{:02}", year, month),
                message: "month must be between 1 and 12".to_string(),
            });
        }
        Ok(Self { year, month })
    }

    /// Parses a six-digit `YYYYMM` code.
    pub fn from_code(code: u32) -> EngineResult<Self> {
        if !(100_000..=999_999).contains(&code) {
            return Err(EngineError::InvalidPeriod {
                code: code.to_string(),
                message: "expected a six-digit YYYYMM code".to_string(),
            });
        }
        // Both casts are in range after the digit check above.
        Self::new((code / 100) as u16, (code % 100) as u8)
    }

    /// Returns the four-digit year.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Returns the month, 1–12.
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Returns the `YYYYMM` code.
    pub fn code(&self) -> u32 {
        u32::from(self.year) * 100 + u32::from(self.month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 6 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EngineError::InvalidPeriod {
                code: s.to_string(),
                message: "expected a six-digit YYYYMM code".to_string(),
            });
        }
        let code = trimmed.parse::<u32>().map_err(|e| EngineError::InvalidPeriod {
            code: s.to_string(),
            message: e.to_string(),
        })?;
        Self::from_code(code)
    }
}

impl TryFrom<u32> for YearMonth {
    type Error = EngineError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<YearMonth> for u32 {
    fn from(period: YearMonth) -> Self {
        period.code()
    }
}
