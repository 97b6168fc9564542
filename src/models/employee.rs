//! Employee view and related types.
//!
//! An [`EmployeeView`] is the fully-assembled snapshot the calculator reads:
//! identity, organization, grades, fixed monthly figures and attendance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{AttendanceRecord, CapabilityGrade, RoleGrade, YearMonth};

/// An organizational unit. Display-only; never used in computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// The organization code (e.g., "DEV1").
    pub code: String,
    /// The human-readable name.
    pub name: String,
}

/// Per-employee fixed monthly figures.
///
/// Deductions are supplied by payroll collaborators; the engine only subtracts them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationProfile {
    /// Monthly commute allowance.
    pub commute_amount: i64,
    /// Monthly rent allowance.
    pub rent_amount: i64,
    /// Hourly base rate that overtime multipliers apply to.
    pub hourly_overtime_rate: i64,
    /// Health insurance deduction.
    pub health_insurance_amount: i64,
    /// Employee pension deduction.
    pub pension_amount: i64,
    /// Income tax deduction.
    pub income_tax_amount: i64,
    /// Inhabitant tax deduction.
    pub inhabitant_tax_amount: i64,
}

impl CompensationProfile {
    /// Sum of the four statutory deductions.
    pub fn total_deductions(&self) -> EngineResult<i64> {
        [
            self.pension_amount,
            self.income_tax_amount,
            self.inhabitant_tax_amount,
        ]
        .into_iter()
        .try_fold(self.health_insurance_amount, i64::checked_add)
        .ok_or_else(|| EngineError::overflow("deductions"))
    }
}

/// Everything the calculator needs about one employee.
///
/// Build with [`EmployeeView::builder`]. Grades are optional so that an
/// incompletely assembled view fails loudly when a salary figure is requested
/// instead of computing with zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeView {
    /// The numeric employee number.
    pub id: u32,
    /// Full name.
    pub name: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Date employment began.
    pub join_date: NaiveDate,
    /// The organization the employee belongs to.
    pub organization: Option<Organization>,
    /// The role grade, if assembled.
    pub role: Option<RoleGrade>,
    /// The capability grade, if assembled.
    pub capability: Option<CapabilityGrade>,
    /// Fixed monthly figures.
    pub profile: CompensationProfile,
    /// Attendance records for the periods the caller may request.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

impl EmployeeView {
    /// Starts building a view for the given employee number.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_engine::models::{CapabilityGrade, EmployeeView, RoleGrade};
    /// use chrono::NaiveDate;
    ///
    /// let employee = EmployeeView::builder(1, NaiveDate::from_ymd_opt(2010, 10, 1).unwrap())
    ///     .name("Mikan Ehime")
    ///     .role(RoleGrade { rank: "A3".to_string(), amount: 250_000 })
    ///     .capability(CapabilityGrade::new("SE", 100_000))
    ///     .build();
    ///
    /// assert_eq!(employee.id, 1);
    /// assert!(employee.role_grade().is_ok());
    /// ```
    pub fn builder(id: u32, join_date: NaiveDate) -> EmployeeViewBuilder {
        EmployeeViewBuilder::new(id, join_date)
    }

    /// Whether `other` is the same employee, compared by employee number only.
    pub fn same_employee(&self, other: &EmployeeView) -> bool {
        self.id == other.id
    }

    /// The role grade, or `MissingGrade` if it was never assembled.
    pub fn role_grade(&self) -> EngineResult<&RoleGrade> {
        self.role
            .as_ref()
            .ok_or_else(|| EngineError::missing_grade(self.id, "role"))
    }

    /// The capability grade, or `MissingGrade` if it was never assembled.
    pub fn capability_grade(&self) -> EngineResult<&CapabilityGrade> {
        self.capability
            .as_ref()
            .ok_or_else(|| EngineError::missing_grade(self.id, "capability"))
    }

    /// This employee's attendance record for `period`, or `MissingAttendance`.
    ///
    /// Records carrying another employee number are never matched.
    pub fn attendance_for(&self, period: YearMonth) -> EngineResult<&AttendanceRecord> {
        self.attendance
            .iter()
            .find(|record| record.employee_id == self.id && record.period == period)
            .ok_or(EngineError::MissingAttendance {
                employee_id: self.id,
                period,
            })
    }

    /// The organization code, if the employee belongs to one.
    pub fn organization_code(&self) -> Option<&str> {
        self.organization.as_ref().map(|org| org.code.as_str())
    }
}

/// Builder for [`EmployeeView`].
#[derive(Debug, Clone)]
pub struct EmployeeViewBuilder {
    view: EmployeeView,
}

impl EmployeeViewBuilder {
    fn new(id: u32, join_date: NaiveDate) -> Self {
        Self {
            view: EmployeeView {
                id,
                name: String::new(),
                birth_date: NaiveDate::MIN,
                join_date,
                organization: None,
                role: None,
                capability: None,
                profile: CompensationProfile::default(),
                attendance: Vec::new(),
            },
        }
    }

    /// Sets the full name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.view.name = name.into();
        self
    }

    /// Sets the date of birth.
    pub fn birth_date(mut self, date: NaiveDate) -> Self {
        self.view.birth_date = date;
        self
    }

    /// Sets the organization.
    pub fn organization(mut self, organization: Organization) -> Self {
        self.view.organization = Some(organization);
        self
    }

    /// Sets the role grade.
    pub fn role(mut self, role: RoleGrade) -> Self {
        self.view.role = Some(role);
        self
    }

    /// Sets the capability grade.
    pub fn capability(mut self, capability: CapabilityGrade) -> Self {
        self.view.capability = Some(capability);
        self
    }

    /// Sets the fixed monthly figures.
    pub fn profile(mut self, profile: CompensationProfile) -> Self {
        self.view.profile = profile;
        self
    }

    /// Adds attendance records.
    pub fn attendance(mut self, records: impl IntoIterator<Item = AttendanceRecord>) -> Self {
        self.view.attendance.extend(records);
        self
    }

    /// Finishes the view.
    pub fn build(self) -> EmployeeView {
        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn joined() -> NaiveDate {
        NaiveDate::from_ymd_opt(2008, 7, 1).unwrap()
    }

    fn create_test_employee() -> EmployeeView {
        EmployeeView::builder(2, joined())
            .name("Taro Osaka")
            .birth_date(NaiveDate::from_ymd_opt(1980, 5, 20).unwrap())
            .organization(Organization {
                code: "DEV1".to_string(),
                name: "Development Group 1".to_string(),
            })
            .role(RoleGrade {
                rank: "C4".to_string(),
                amount: 300_000,
            })
            .capability(CapabilityGrade::new("PL", 110_000))
            .profile(CompensationProfile {
                commute_amount: 21_500,
                rent_amount: 50_000,
                hourly_overtime_rate: 2_200,
                health_insurance_amount: 8_900,
                pension_amount: 15_200,
                income_tax_amount: 4_800,
                inhabitant_tax_amount: 3_900,
            })
            .build()
    }

    #[test]
    fn test_builder_populates_fields() {
        let employee = create_test_employee();
        assert_eq!(employee.id, 2);
        assert_eq!(employee.name, "Taro Osaka");
        assert_eq!(employee.organization_code(), Some("DEV1"));
        assert_eq!(employee.role_grade().unwrap().rank, "C4");
        assert_eq!(employee.capability_grade().unwrap().code, "PL");
    }

    #[test]
    fn test_builder_requires_join_date() {
        let join = NaiveDate::from_ymd_opt(2014, 4, 1).unwrap();
        let employee = EmployeeView::builder(4, join).build();
        assert_eq!(employee.join_date, join);
    }

    #[test]
    fn test_missing_role_grade_is_error() {
        let employee = EmployeeView::builder(9, joined())
            .capability(CapabilityGrade::new("SE", 100_000))
            .build();
        match employee.role_grade() {
            Err(EngineError::MissingGrade { employee_id, grade }) => {
                assert_eq!(employee_id, 9);
                assert_eq!(grade, "role");
            }
            other => panic!("Expected MissingGrade, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_capability_grade_is_error() {
        let employee = EmployeeView::builder(9, joined()).build();
        assert!(matches!(
            employee.capability_grade(),
            Err(EngineError::MissingGrade { .. })
        ));
    }

    #[test]
    fn test_attendance_lookup_by_period() {
        let april = YearMonth::from_code(201504).unwrap();
        let may = YearMonth::from_code(201505).unwrap();
        let record = AttendanceRecord::new(
            2,
            april,
            Decimal::from(10),
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        )
        .unwrap();
        let employee = EmployeeView::builder(2, joined())
            .attendance(vec![record])
            .build();

        assert!(employee.attendance_for(april).is_ok());
        match employee.attendance_for(may) {
            Err(EngineError::MissingAttendance {
                employee_id,
                period,
            }) => {
                assert_eq!(employee_id, 2);
                assert_eq!(period, may);
            }
            other => panic!("Expected MissingAttendance, got {:?}", other),
        }
    }

    #[test]
    fn test_attendance_lookup_ignores_other_employees_records() {
        let april = YearMonth::from_code(201504).unwrap();
        let foreign = AttendanceRecord::new(
            99,
            april,
            Decimal::from(10),
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        )
        .unwrap();
        let employee = EmployeeView::builder(1, joined())
            .attendance(vec![foreign])
            .build();

        match employee.attendance_for(april) {
            Err(EngineError::MissingAttendance { employee_id, .. }) => {
                assert_eq!(employee_id, 1);
            }
            other => panic!("Expected MissingAttendance, got {:?}", other),
        }
    }

    #[test]
    fn test_identity_compares_employee_number_only() {
        let employee = create_test_employee();
        let mut renamed = employee.clone();
        renamed.name = "Someone Else".to_string();
        renamed.profile.rent_amount = 0;

        assert!(employee.same_employee(&renamed));
        assert_ne!(employee, renamed);

        let other = EmployeeView::builder(3, joined()).build();
        assert!(!employee.same_employee(&other));
    }

    #[test]
    fn test_total_deductions() {
        let employee = create_test_employee();
        assert_eq!(employee.profile.total_deductions().unwrap(), 32_800);
    }

    #[test]
    fn test_total_deductions_overflow() {
        let profile = CompensationProfile {
            health_insurance_amount: i64::MAX,
            pension_amount: 1,
            ..CompensationProfile::default()
        };
        assert!(matches!(
            profile.total_deductions(),
            Err(EngineError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_serialize_round_trip() {
        let employee = create_test_employee();
        let json = serde_json::to_string(&employee).unwrap();
        let deserialized: EmployeeView = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }
}
