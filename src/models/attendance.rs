//! Monthly attendance records.
//!
//! This module defines the [`AttendanceRecord`] logged per employee per month
//! and the [`AttendanceLedger`] used to hand records to employee views.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::YearMonth;

/// One employee's categorized overtime hours for one month.
///
/// # Example
///
/// ```
/// use salary_engine::models::{AttendanceRecord, YearMonth};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let record = AttendanceRecord::new(
///     1,
///     YearMonth::from_code(201504).unwrap(),
///     Decimal::from_str("30.5").unwrap(),
///     Decimal::from_str("12.25").unwrap(),
///     Decimal::from(16),
///     Decimal::from_str("5.5").unwrap(),
/// )
/// .unwrap();
/// assert_eq!(record.total_hours(), Decimal::from_str("64.25").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee number.
    pub employee_id: u32,
    /// The month these hours were worked.
    pub period: YearMonth,
    /// Overtime hours on working days.
    pub standard_overtime: Decimal,
    /// Late-night overtime hours on working days.
    pub late_night_overtime: Decimal,
    /// Hours worked on holidays.
    pub holiday_work: Decimal,
    /// Late-night hours worked on holidays.
    pub holiday_late_night_work: Decimal,
}

impl AttendanceRecord {
    /// Creates a record, rejecting negative hour quantities.
    pub fn new(
        employee_id: u32,
        period: YearMonth,
        standard_overtime: Decimal,
        late_night_overtime: Decimal,
        holiday_work: Decimal,
        holiday_late_night_work: Decimal,
    ) -> EngineResult<Self> {
        let record = Self {
            employee_id,
            period,
            standard_overtime,
            late_night_overtime,
            holiday_work,
            holiday_late_night_work,
        };
        record.validate()?;
        Ok(record)
    }

    /// Checks that every hour quantity is non-negative.
    ///
    /// Records deserialized from a collaborator bypass [`AttendanceRecord::new`],
    /// so [`AttendanceLedger::insert`] and the overtime calculation validate again.
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("standard_overtime", self.standard_overtime),
            ("late_night_overtime", self.late_night_overtime),
            ("holiday_work", self.holiday_work),
            ("holiday_late_night_work", self.holiday_late_night_work),
        ];
        for (name, hours) in fields {
            if hours < Decimal::ZERO {
                return Err(EngineError::InvalidAttendance {
                    employee_id: self.employee_id,
                    message: format!("{} must not be negative (got {})", name, hours),
                });
            }
        }
        Ok(())
    }

    /// Sum of all four categories.
    pub fn total_hours(&self) -> Decimal {
        self.standard_overtime
            + self.late_night_overtime
            + self.holiday_work
            + self.holiday_late_night_work
    }
}

/// Attendance records indexed by employee and period.
///
/// A later insert for the same employee and period replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceLedger {
    records: BTreeMap<(u32, YearMonth), AttendanceRecord>,
}

impl AttendanceLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from records, validating each.
    pub fn from_records<I>(records: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = AttendanceRecord>,
    {
        let mut ledger = Self::new();
        for record in records {
            ledger.insert(record)?;
        }
        Ok(ledger)
    }

    /// Adds a record after validating it.
    pub fn insert(&mut self, record: AttendanceRecord) -> EngineResult<()> {
        record.validate()?;
        self.records
            .insert((record.employee_id, record.period), record);
        Ok(())
    }

    /// Looks up one employee's record for a period.
    pub fn get(&self, employee_id: u32, period: YearMonth) -> Option<&AttendanceRecord> {
        self.records.get(&(employee_id, period))
    }

    /// All records for one employee, oldest period first.
    pub fn records_for(&self, employee_id: u32) -> Vec<AttendanceRecord> {
        self.records
            .range((employee_id, YearMonth::MIN)..=(employee_id, YearMonth::MAX))
            .map(|(_, record)| record.clone())
            .collect()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
