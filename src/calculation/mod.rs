//! Calculation logic for the Salary Calculation Engine.
//!
//! This module contains the tenure and anniversary bonus rules, the overtime
//! allowance calculation, the per-employee [`CompensationCalculator`] and the
//! collection-level [`EmployeeAggregate`].

mod aggregate;
mod compensation;
mod overtime;
mod tenure;

pub use aggregate::EmployeeAggregate;
pub use compensation::{CompensationCalculator, ENGINE_VERSION};
pub use overtime::{
    OvertimeAllowanceResult, calculate_overtime_allowance, exempt_overtime_allowance,
};
pub use tenure::{TENURE_BONUS_MILESTONES, tenure_bonus, tenure_months, tenure_years};
