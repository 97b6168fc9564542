//! Compensation statement models.
//!
//! This module contains the [`CompensationStatement`] type and the structures
//! that capture one employee's full monthly breakdown: allowance lines,
//! overtime lines, totals, and the audit trace explaining each figure.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::YearMonth;

/// The overtime category a line of hours was logged under.
///
/// # Example
///
/// ```
/// use salary_engine::models::OvertimeCategory;
///
/// assert_eq!(OvertimeCategory::LateNight.multiplier().to_string(), "1.1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeCategory {
    /// Overtime on a working day.
    Standard,
    /// Late-night overtime on a working day.
    LateNight,
    /// Work on a holiday.
    Holiday,
    /// Late-night work on a holiday.
    HolidayLateNight,
}

impl OvertimeCategory {
    /// All categories in the order they are computed and reported.
    pub const ALL: [OvertimeCategory; 4] = [
        OvertimeCategory::Standard,
        OvertimeCategory::LateNight,
        OvertimeCategory::Holiday,
        OvertimeCategory::HolidayLateNight,
    ];

    /// The multiplier applied to the hourly base rate.
    pub fn multiplier(&self) -> Decimal {
        match self {
            OvertimeCategory::Standard => Decimal::ONE,
            OvertimeCategory::LateNight => Decimal::new(11, 1),
            OvertimeCategory::Holiday => Decimal::new(12, 1),
            OvertimeCategory::HolidayLateNight => Decimal::new(13, 1),
        }
    }
}

impl std::fmt::Display for OvertimeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OvertimeCategory::Standard => write!(f, "standard overtime"),
            OvertimeCategory::LateNight => write!(f, "late-night overtime"),
            OvertimeCategory::Holiday => write!(f, "holiday work"),
            OvertimeCategory::HolidayLateNight => write!(f, "holiday late-night work"),
        }
    }
}

/// One overtime category's contribution to the overtime allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeLine {
    /// The category of hours.
    pub category: OvertimeCategory,
    /// Hours logged in this category.
    pub hours: Decimal,
    /// The hourly rate after the category multiplier.
    pub rate: Decimal,
    /// The amount, truncated toward zero.
    pub amount: i64,
}

/// The kind of a monthly allowance line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceKind {
    /// Commute allowance from the profile.
    Commute,
    /// Rent allowance from the profile.
    Rent,
    /// Fixed allowance of the capability rank.
    Capability,
    /// Anniversary bonus for whole-year tenure milestones.
    Tenure,
}

/// One component of the monthly allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceLine {
    /// What the allowance is for.
    pub kind: AllowanceKind,
    /// The amount paid this month.
    pub amount: i64,
    /// Whether this line counts toward the annual salary plan.
    pub in_annual_plan: bool,
}

/// Aggregated figures for one employee and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryTotals {
    /// Role amount plus capability amount.
    pub base_salary: i64,
    /// Sum of all allowance lines.
    pub monthly_allowance: i64,
    /// Base salary plus monthly allowance.
    pub standard_salary: i64,
    /// Sum of all overtime lines.
    pub overtime_allowance: i64,
    /// Standard salary plus overtime allowance.
    pub total_salary: i64,
    /// The four statutory deductions.
    pub deductions: i64,
    /// Total salary minus deductions.
    pub take_home: i64,
    /// Projected yearly figure from base salary and capability allowance.
    pub annual_salary_plan: i64,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete monthly compensation breakdown for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationStatement {
    /// Unique identifier for this statement.
    pub statement_id: Uuid,
    /// The version of the engine that produced the statement.
    pub engine_version: String,
    /// The employee number.
    pub employee_id: u32,
    /// The period the statement covers.
    pub period: YearMonth,
    /// The date tenure was measured against.
    pub reference_date: NaiveDate,
    /// Tenure in months at the reference date.
    pub tenure_months: u32,
    /// Allowance lines making up the monthly allowance.
    pub allowances: Vec<AllowanceLine>,
    /// Overtime lines; empty for exempt ranks.
    pub overtime_lines: Vec<OvertimeLine>,
    /// Aggregated figures.
    pub totals: SalaryTotals,
    /// Ordered calculation steps.
    pub audit_trace: Vec<AuditStep>,
}
