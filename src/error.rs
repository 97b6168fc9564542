//! Error types for the Salary Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all precondition failures that can occur while computing compensation.

use thiserror::Error;

use crate::models::YearMonth;

/// The main error type for the Salary Calculation Engine.
///
/// All operations in the engine return this error type. Every variant is a
/// deterministic precondition failure: retrying the same call with the same
/// inputs fails the same way.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::EmptyCollection {
///     operation: "average_take_home".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Cannot compute 'average_take_home' over an empty employee collection"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A role or capability grade was absent when a salary figure was requested.
    #[error("Employee {employee_id} has no {grade} grade")]
    MissingGrade {
        /// The employee whose computation failed.
        employee_id: u32,
        /// Which grade was missing ("role" or "capability").
        grade: String,
    },

    /// No attendance record exists for a non-exempt employee in the requested period.
    #[error("No attendance record for employee {employee_id} in {period}")]
    MissingAttendance {
        /// The employee whose overtime was requested.
        employee_id: u32,
        /// The requested period.
        period: YearMonth,
    },

    /// An aggregate that needs at least one member was requested on an empty collection.
    #[error("Cannot compute '{operation}' over an empty employee collection")]
    EmptyCollection {
        /// The aggregate operation that was requested.
        operation: String,
    },

    /// A year-month code was malformed.
    #[error("Invalid period '{code}': {message}")]
    InvalidPeriod {
        /// The code as supplied.
        code: String,
        /// A description of what made the code invalid.
        message: String,
    },

    /// An attendance record carried inconsistent data.
    #[error("Invalid attendance for employee {employee_id}: {message}")]
    InvalidAttendance {
        /// The employee the record belongs to.
        employee_id: u32,
        /// A description of what made the record invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A grade rank was not present in the salary table.
    #[error("{grade} grade not found: {rank}")]
    GradeNotFound {
        /// Which table was searched ("role" or "capability").
        grade: String,
        /// The rank code that was not found.
        rank: String,
    },

    /// An organization code was not present in the salary table.
    #[error("Organization not found: {code}")]
    OrganizationNotFound {
        /// The organization code that was not found.
        code: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    pub(crate) fn missing_grade(employee_id: u32, grade: &str) -> Self {
        Self::MissingGrade {
            employee_id,
            grade: grade.to_string(),
        }
    }

    pub(crate) fn overflow(what: &str) -> Self {
        Self::CalculationError {
            message: format!("{} overflowed", what),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
