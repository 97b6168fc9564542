//! Role and capability grades.
//!
//! Grades are the salary table's fixed monthly amounts. The capability rank
//! additionally determines a fixed allowance and whether overtime is paid.

use serde::{Deserialize, Serialize};

/// Allowance paid to capability rank PL.
pub const PL_ALLOWANCE: i64 = 10_000;

/// Allowance paid to capability rank PM.
pub const PM_ALLOWANCE: i64 = 30_000;

/// The closed set of capability ranks the engine distinguishes.
///
/// Any source code other than `PL` or `PM` classifies as [`CapabilityRank::Other`].
///
/// # Example
///
/// ```
/// use salary_engine::models::CapabilityRank;
///
/// assert_eq!(CapabilityRank::from_code("PM"), CapabilityRank::Pm);
/// assert_eq!(CapabilityRank::from_code("SE"), CapabilityRank::Other);
/// assert_eq!(CapabilityRank::Pl.allowance(), 10_000);
/// assert!(CapabilityRank::Pl.is_overtime_exempt());
/// assert!(!CapabilityRank::Other.is_overtime_exempt());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapabilityRank {
    /// Project leader.
    Pl,
    /// Project manager.
    Pm,
    /// Every other capability rank.
    Other,
}

impl CapabilityRank {
    /// Classifies a capability rank code, falling back to `Other`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "PL" => CapabilityRank::Pl,
            "PM" => CapabilityRank::Pm,
            _ => CapabilityRank::Other,
        }
    }

    /// The fixed monthly allowance for this rank.
    pub fn allowance(&self) -> i64 {
        match self {
            CapabilityRank::Pl => PL_ALLOWANCE,
            CapabilityRank::Pm => PM_ALLOWANCE,
            CapabilityRank::Other => 0,
        }
    }

    /// Exempt ranks are salaried and never receive overtime pay.
    pub fn is_overtime_exempt(&self) -> bool {
        matches!(self, CapabilityRank::Pl | CapabilityRank::Pm)
    }
}

impl std::fmt::Display for CapabilityRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapabilityRank::Pl => write!(f, "PL"),
            CapabilityRank::Pm => write!(f, "PM"),
            CapabilityRank::Other => write!(f, "OTHER"),
        }
    }
}

/// An organizational responsibility tier with its fixed base amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrade {
    /// The two-character rank code (e.g., "A3").
    pub rank: String,
    /// The fixed monthly base amount.
    pub amount: i64,
}

/// A skill tier with its fixed base amount.
///
/// Only the source code is stored. The [`CapabilityRank`], and with it the
/// fixed allowance and overtime exemption, is always classified from `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityGrade {
    /// The source rank code (e.g., "SE", "PL").
    pub code: String,
    /// The fixed monthly base amount.
    pub amount: i64,
}

impl CapabilityGrade {
    /// Creates a capability grade.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_engine::models::{CapabilityGrade, CapabilityRank};
    ///
    /// let grade = CapabilityGrade::new("PL", 110_000);
    /// assert_eq!(grade.rank(), CapabilityRank::Pl);
    /// assert_eq!(grade.fixed_allowance(), 10_000);
    /// ```
    pub fn new(code: impl Into<String>, amount: i64) -> Self {
        Self {
            code: code.into(),
            amount,
        }
    }

    /// The rank classification of `code`.
    pub fn rank(&self) -> CapabilityRank {
        CapabilityRank::from_code(&self.code)
    }

    /// The fixed allowance, derived solely from the rank.
    pub fn fixed_allowance(&self) -> i64 {
        self.rank().allowance()
    }

    /// Whether holders of this grade are excluded from overtime pay.
    pub fn is_overtime_exempt(&self) -> bool {
        self.rank().is_overtime_exempt()
    }
}
