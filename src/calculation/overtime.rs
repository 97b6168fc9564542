//! Overtime allowance calculation functionality.
//!
//! This module computes the monthly overtime allowance from an attendance
//! record and an hourly base rate.
//!
//! ## Rate Structure
//!
//! | Category | Multiplier |
//! |---|---|
//! | standard overtime | 1.0 |
//! | late-night overtime | 1.1 |
//! | holiday work | 1.2 |
//! | holiday late-night work | 1.3 |
//!
//! Each category is truncated to a whole amount on its own before the four
//! are summed, so fractions never accumulate across categories.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AuditStep, OvertimeCategory, OvertimeLine, YearMonth};

/// The result of overtime calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeAllowanceResult {
    /// The total overtime allowance.
    pub amount: i64,
    /// One line per category; empty when the employee is exempt.
    pub lines: Vec<OvertimeLine>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the overtime allowance for one month of attendance.
///
/// Exempt employees receive 0 regardless of the hours logged. Otherwise each
/// category is `hours × (hourly_base_rate × multiplier)`, truncated toward
/// zero, and the four integer amounts are summed.
///
/// # Arguments
///
/// * `attendance` - The month's attendance record
/// * `hourly_base_rate` - The employee's hourly overtime base rate
/// * `is_exempt` - Whether the employee's capability rank is overtime-exempt
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns `InvalidAttendance` if any hour quantity is negative, and
/// `CalculationError` if a category amount does not fit in an `i64`.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_overtime_allowance;
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
///
/// let result = calculate_overtime_allowance(&record, 1_875, false, 1).unwrap();
/// // 57187 + 25265 + 36000 + 13406
/// assert_eq!(result.amount, 131_858);
///
/// let exempt = calculate_overtime_allowance(&record, 1_875, true, 1).unwrap();
/// assert_eq!(exempt.amount, 0);
/// ```
pub fn calculate_overtime_allowance(
    attendance: &AttendanceRecord,
    hourly_base_rate: i64,
    is_exempt: bool,
    step_number: u32,
) -> EngineResult<OvertimeAllowanceResult> {
    attendance.validate()?;

    if is_exempt {
        return Ok(exempt_overtime_allowance(
            attendance.employee_id,
            attendance.period,
            step_number,
        ));
    }

    let base_rate = Decimal::from(hourly_base_rate);
    let mut lines = Vec::with_capacity(OvertimeCategory::ALL.len());
    let mut amount: i64 = 0;

    for category in OvertimeCategory::ALL {
        let hours = hours_for(attendance, category);
        let rate = base_rate
            .checked_mul(category.multiplier())
            .ok_or_else(|| EngineError::overflow("overtime rate"))?;
        let value = hours
            .checked_mul(rate)
            .ok_or_else(|| EngineError::overflow("overtime amount"))?;
        let line_amount = truncate_amount(value, category)?;

        amount = amount
            .checked_add(line_amount)
            .ok_or_else(|| EngineError::overflow("overtime allowance"))?;
        lines.push(OvertimeLine {
            category,
            hours,
            rate,
            amount: line_amount,
        });
    }

    let reasoning = lines
        .iter()
        .map(|line| {
            format!(
                "{}: {} h × {} = {}",
                line.category,
                line.hours.normalize(),
                line.rate.normalize(),
                line.amount
            )
        })
        .collect::<Vec<_>>()
        .join("; ");

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_allowance".to_string(),
        rule_name: "Overtime Allowance".to_string(),
        input: serde_json::json!({
            "employee_id": attendance.employee_id,
            "period": attendance.period.code(),
            "exempt": false,
            "hourly_base_rate": hourly_base_rate,
            "standard_overtime": attendance.standard_overtime.normalize().to_string(),
            "late_night_overtime": attendance.late_night_overtime.normalize().to_string(),
            "holiday_work": attendance.holiday_work.normalize().to_string(),
            "holiday_late_night_work": attendance.holiday_late_night_work.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount
        }),
        reasoning: format!("{} (total {})", reasoning, amount),
    };

    Ok(OvertimeAllowanceResult {
        amount,
        lines,
        audit_step,
    })
}

/// The overtime result for an exempt employee: always 0.
///
/// Exempt employees need no attendance record, so this takes the employee
/// number and period directly.
pub fn exempt_overtime_allowance(
    employee_id: u32,
    period: YearMonth,
    step_number: u32,
) -> OvertimeAllowanceResult {
    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_allowance".to_string(),
        rule_name: "Overtime Allowance".to_string(),
        input: serde_json::json!({
            "employee_id": employee_id,
            "period": period.code(),
            "exempt": true
        }),
        output: serde_json::json!({
            "amount": 0
        }),
        reasoning: "Capability rank is overtime-exempt - no overtime paid".to_string(),
    };

    OvertimeAllowanceResult {
        amount: 0,
        lines: Vec::new(),
        audit_step,
    }
}

fn hours_for(attendance: &AttendanceRecord, category: OvertimeCategory) -> Decimal {
    match category {
        OvertimeCategory::Standard => attendance.standard_overtime,
        OvertimeCategory::LateNight => attendance.late_night_overtime,
        OvertimeCategory::Holiday => attendance.holiday_work,
        OvertimeCategory::HolidayLateNight => attendance.holiday_late_night_work,
    }
}

fn truncate_amount(value: Decimal, category: OvertimeCategory) -> EngineResult<i64> {
    value.trunc().to_i64().ok_or_else(|| EngineError::CalculationError {
        message: format!("{} amount {} does not fit in an integer", category, value),
    })
}
