//! Salary Calculation Engine
//!
//! This crate computes monthly and annual compensation for employees from a
//! salary table of role and capability grades, per-employee allowances and
//! deductions, and monthly overtime attendance. It also provides ranking and
//! statistics over collections of employees.
//!
//! # Example
//!
//! ```
//! use salary_engine::calculation::CompensationCalculator;
//! use salary_engine::clock::FixedClock;
//! use salary_engine::models::{CapabilityGrade, EmployeeView, RoleGrade};
//! use chrono::NaiveDate;
//!
//! let calculator = CompensationCalculator::new(FixedClock::new(
//!     NaiveDate::from_ymd_opt(2015, 4, 15).unwrap(),
//! ));
//! let employee = EmployeeView::builder(3, NaiveDate::from_ymd_opt(2005, 4, 20).unwrap())
//!     .role(RoleGrade { rank: "M2".to_string(), amount: 350_000 })
//!     .capability(CapabilityGrade::new("PM", 120_000))
//!     .build();
//!
//! assert_eq!(calculator.tenure_bonus(&employee), 10_000);
//! assert_eq!(calculator.annual_salary_plan(&employee).unwrap(), 6_000_000);
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
