//! Core data models for the Salary Calculation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod employee;
mod grade;
mod period;
mod statement;

pub use attendance::{AttendanceLedger, AttendanceRecord};
pub use employee::{CompensationProfile, EmployeeView, EmployeeViewBuilder, Organization};
pub use grade::{CapabilityGrade, CapabilityRank, PL_ALLOWANCE, PM_ALLOWANCE, RoleGrade};
pub use period::YearMonth;
pub use statement::{
    AllowanceKind, AllowanceLine, AuditStep, CompensationStatement, OvertimeCategory,
    OvertimeLine, SalaryTotals,
};
