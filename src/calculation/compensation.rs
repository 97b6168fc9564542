//! Per-employee compensation calculation.
//!
//! The [`CompensationCalculator`] turns an [`EmployeeView`] into salary
//! figures. It holds nothing but the clock that supplies the reference date
//! for tenure, so every figure is a pure function of the view and that date.
//!
//! ## Figures
//!
//! - base salary = role amount + capability amount
//! - monthly allowance = commute + rent + capability allowance + tenure bonus
//! - standard salary = base salary + monthly allowance
//! - total salary = standard salary + overtime allowance
//! - take-home = total salary - (health insurance + pension + income tax + inhabitant tax)
//! - annual salary plan = (base salary + capability allowance) × 12
//!
//! The annual salary plan leaves out commute, rent and the tenure bonus.

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::clock::{BusinessClock, SystemClock};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllowanceKind, AllowanceLine, AuditStep, CompensationStatement, EmployeeView, SalaryTotals,
    YearMonth,
};

use super::overtime::{
    OvertimeAllowanceResult, calculate_overtime_allowance, exempt_overtime_allowance,
};
use super::tenure::{tenure_bonus, tenure_months, tenure_years};

/// The engine version recorded on statements.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Months in the annual salary plan.
const MONTHS_PER_YEAR: i64 = 12;

/// Computes salary figures for individual employees.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::CompensationCalculator;
/// use salary_engine::clock::FixedClock;
/// use salary_engine::models::{CapabilityGrade, CompensationProfile, EmployeeView, RoleGrade};
/// use chrono::NaiveDate;
///
/// let calculator = CompensationCalculator::new(FixedClock::new(
///     NaiveDate::from_ymd_opt(2015, 4, 15).unwrap(),
/// ));
///
/// let employee = EmployeeView::builder(2, NaiveDate::from_ymd_opt(2008, 7, 1).unwrap())
///     .role(RoleGrade { rank: "C4".to_string(), amount: 300_000 })
///     .capability(CapabilityGrade::new("PL", 110_000))
///     .profile(CompensationProfile {
///         commute_amount: 21_500,
///         rent_amount: 50_000,
///         ..CompensationProfile::default()
///     })
///     .build();
///
/// assert_eq!(calculator.base_salary(&employee).unwrap(), 410_000);
/// assert_eq!(calculator.standard_salary(&employee).unwrap(), 491_500);
/// assert_eq!(calculator.annual_salary_plan(&employee).unwrap(), 5_040_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompensationCalculator<C = SystemClock> {
    clock: C,
}

impl<C: BusinessClock> CompensationCalculator<C> {
    /// Creates a calculator that measures tenure against `clock`.
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// The date tenure is measured against.
    pub fn reference_date(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Which month of employment the employee is in.
    pub fn tenure_months(&self, employee: &EmployeeView) -> u32 {
        tenure_months(employee.join_date, self.reference_date())
    }

    /// Whole years of tenure.
    pub fn tenure_years(&self, employee: &EmployeeView) -> u32 {
        tenure_years(self.tenure_months(employee))
    }

    /// The anniversary bonus paid this month, if any.
    pub fn tenure_bonus(&self, employee: &EmployeeView) -> i64 {
        tenure_bonus(self.tenure_months(employee))
    }

    /// Role amount plus capability amount.
    pub fn base_salary(&self, employee: &EmployeeView) -> EngineResult<i64> {
        let role = employee.role_grade()?;
        let capability = employee.capability_grade()?;
        role.amount
            .checked_add(capability.amount)
            .ok_or_else(|| EngineError::overflow("base salary"))
    }

    /// Commute, rent, capability allowance and tenure bonus.
    pub fn monthly_allowance(&self, employee: &EmployeeView) -> EngineResult<i64> {
        let lines = allowance_lines(employee, self.tenure_months(employee))?;
        sum(lines.iter().map(|line| line.amount), "monthly allowance")
    }

    /// Base salary plus monthly allowance.
    pub fn standard_salary(&self, employee: &EmployeeView) -> EngineResult<i64> {
        let base = self.base_salary(employee)?;
        let allowance = self.monthly_allowance(employee)?;
        base.checked_add(allowance)
            .ok_or_else(|| EngineError::overflow("standard salary"))
    }

    /// The overtime allowance for `period`.
    ///
    /// Exempt ranks return 0 without consulting attendance. Everyone else needs
    /// an attendance record for the period.
    pub fn overtime_allowance(
        &self,
        employee: &EmployeeView,
        period: YearMonth,
    ) -> EngineResult<i64> {
        Ok(self.overtime(employee, period, 1)?.amount)
    }

    /// Standard salary plus the overtime allowance for `period`.
    pub fn total_salary(&self, employee: &EmployeeView, period: YearMonth) -> EngineResult<i64> {
        let standard = self.standard_salary(employee)?;
        let overtime = self.overtime_allowance(employee, period)?;
        let total = standard
            .checked_add(overtime)
            .ok_or_else(|| EngineError::overflow("total salary"))?;

        debug!(
            employee_id = employee.id,
            period = %period,
            standard_salary = standard,
            overtime_allowance = overtime,
            total_salary = total,
            "Computed total salary"
        );
        Ok(total)
    }

    /// Total salary for `period` minus the four statutory deductions.
    pub fn take_home(&self, employee: &EmployeeView, period: YearMonth) -> EngineResult<i64> {
        let total = self.total_salary(employee, period)?;
        let deductions = employee.profile.total_deductions()?;
        total
            .checked_sub(deductions)
            .ok_or_else(|| EngineError::overflow("take-home"))
    }

    /// (Base salary + capability allowance) × 12.
    pub fn annual_salary_plan(&self, employee: &EmployeeView) -> EngineResult<i64> {
        let base = self.base_salary(employee)?;
        let capability_allowance = employee.capability_grade()?.fixed_allowance();
        base.checked_add(capability_allowance)
            .and_then(|monthly| monthly.checked_mul(MONTHS_PER_YEAR))
            .ok_or_else(|| EngineError::overflow("annual salary plan"))
    }

    /// Whether the annual salary plan is at least `amount`.
    pub fn meets_annual_salary_threshold(
        &self,
        employee: &EmployeeView,
        amount: i64,
    ) -> EngineResult<bool> {
        Ok(self.annual_salary_plan(employee)? >= amount)
    }

    /// Produces the full breakdown for one employee and period.
    ///
    /// Figures match the individual methods; the statement adds the allowance
    /// and overtime lines and an audit trace of each step.
    pub fn statement(
        &self,
        employee: &EmployeeView,
        period: YearMonth,
    ) -> EngineResult<CompensationStatement> {
        let reference_date = self.reference_date();
        let months = tenure_months(employee.join_date, reference_date);
        let mut audit_trace = Vec::new();

        let role = employee.role_grade()?;
        let capability = employee.capability_grade()?;
        let base_salary = self.base_salary(employee)?;
        audit_trace.push(AuditStep {
            step_number: 1,
            rule_id: "base_salary".to_string(),
            rule_name: "Base Salary".to_string(),
            input: serde_json::json!({
                "role_rank": role.rank,
                "role_amount": role.amount,
                "capability_code": capability.code,
                "capability_amount": capability.amount
            }),
            output: serde_json::json!({ "base_salary": base_salary }),
            reasoning: format!(
                "Role {} ({}) + capability {} ({}) = {}",
                role.rank, role.amount, capability.code, capability.amount, base_salary
            ),
        });

        audit_trace.push(AuditStep {
            step_number: 2,
            rule_id: "tenure".to_string(),
            rule_name: "Tenure".to_string(),
            input: serde_json::json!({
                "join_date": employee.join_date.to_string(),
                "reference_date": reference_date.to_string()
            }),
            output: serde_json::json!({
                "tenure_months": months,
                "tenure_years": tenure_years(months),
                "bonus": tenure_bonus(months)
            }),
            reasoning: tenure_reasoning(months),
        });

        let allowances = allowance_lines(employee, months)?;
        let monthly_allowance = sum(allowances.iter().map(|l| l.amount), "monthly allowance")?;
        audit_trace.push(AuditStep {
            step_number: 3,
            rule_id: "monthly_allowance".to_string(),
            rule_name: "Monthly Allowance".to_string(),
            input: serde_json::to_value(&allowances).map_err(|e| {
                EngineError::CalculationError {
                    message: format!("allowance lines could not be recorded: {}", e),
                }
            })?,
            output: serde_json::json!({ "monthly_allowance": monthly_allowance }),
            reasoning: format!(
                "Commute, rent, capability and tenure allowances total {}",
                monthly_allowance
            ),
        });

        let overtime = self.overtime(employee, period, 4)?;
        audit_trace.push(overtime.audit_step);

        let standard_salary = base_salary
            .checked_add(monthly_allowance)
            .ok_or_else(|| EngineError::overflow("standard salary"))?;
        let total_salary = standard_salary
            .checked_add(overtime.amount)
            .ok_or_else(|| EngineError::overflow("total salary"))?;
        let deductions = employee.profile.total_deductions()?;
        let take_home = total_salary
            .checked_sub(deductions)
            .ok_or_else(|| EngineError::overflow("take-home"))?;
        audit_trace.push(AuditStep {
            step_number: 5,
            rule_id: "take_home".to_string(),
            rule_name: "Take-Home".to_string(),
            input: serde_json::json!({
                "total_salary": total_salary,
                "health_insurance": employee.profile.health_insurance_amount,
                "pension": employee.profile.pension_amount,
                "income_tax": employee.profile.income_tax_amount,
                "inhabitant_tax": employee.profile.inhabitant_tax_amount
            }),
            output: serde_json::json!({ "take_home": take_home }),
            reasoning: format!(
                "Total salary {} - deductions {} = {}",
                total_salary, deductions, take_home
            ),
        });

        let annual_salary_plan = self.annual_salary_plan(employee)?;
        audit_trace.push(AuditStep {
            step_number: 6,
            rule_id: "annual_salary_plan".to_string(),
            rule_name: "Annual Salary Plan".to_string(),
            input: serde_json::json!({
                "base_salary": base_salary,
                "capability_allowance": capability.fixed_allowance()
            }),
            output: serde_json::json!({ "annual_salary_plan": annual_salary_plan }),
            reasoning: format!(
                "({} + {}) × 12 = {}; commute, rent and tenure bonus excluded",
                base_salary,
                capability.fixed_allowance(),
                annual_salary_plan
            ),
        });

        debug!(
            employee_id = employee.id,
            period = %period,
            total_salary,
            take_home,
            "Built compensation statement"
        );

        Ok(CompensationStatement {
            statement_id: Uuid::new_v4(),
            engine_version: ENGINE_VERSION.to_string(),
            employee_id: employee.id,
            period,
            reference_date,
            tenure_months: months,
            allowances,
            overtime_lines: overtime.lines,
            totals: SalaryTotals {
                base_salary,
                monthly_allowance,
                standard_salary,
                overtime_allowance: overtime.amount,
                total_salary,
                deductions,
                take_home,
                annual_salary_plan,
            },
            audit_trace,
        })
    }

    fn overtime(
        &self,
        employee: &EmployeeView,
        period: YearMonth,
        step_number: u32,
    ) -> EngineResult<OvertimeAllowanceResult> {
        let capability = employee.capability_grade()?;
        let rate = employee.profile.hourly_overtime_rate;

        if capability.is_overtime_exempt() {
            return Ok(exempt_overtime_allowance(employee.id, period, step_number));
        }

        let record = employee.attendance_for(period)?;
        calculate_overtime_allowance(record, rate, false, step_number)
    }
}

fn allowance_lines(employee: &EmployeeView, months: u32) -> EngineResult<Vec<AllowanceLine>> {
    let capability = employee.capability_grade()?;
    Ok(vec![
        AllowanceLine {
            kind: AllowanceKind::Commute,
            amount: employee.profile.commute_amount,
            in_annual_plan: false,
        },
        AllowanceLine {
            kind: AllowanceKind::Rent,
            amount: employee.profile.rent_amount,
            in_annual_plan: false,
        },
        AllowanceLine {
            kind: AllowanceKind::Capability,
            amount: capability.fixed_allowance(),
            in_annual_plan: true,
        },
        AllowanceLine {
            kind: AllowanceKind::Tenure,
            amount: tenure_bonus(months),
            in_annual_plan: false,
        },
    ])
}

fn tenure_reasoning(months: u32) -> String {
    let bonus = tenure_bonus(months);
    if bonus > 0 {
        format!(
            "Month {} of employment is the {}-year anniversary: bonus {}",
            months,
            tenure_years(months),
            bonus
        )
    } else {
        format!("Month {} of employment: no anniversary bonus", months)
    }
}

fn sum(mut amounts: impl Iterator<Item = i64>, what: &str) -> EngineResult<i64> {
    amounts
        .try_fold(0i64, i64::checked_add)
        .ok_or_else(|| EngineError::overflow(what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::{
        AttendanceRecord, CapabilityGrade, CompensationProfile, OvertimeCategory, RoleGrade,
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn april() -> YearMonth {
        YearMonth::from_code(201504).unwrap()
    }

    fn calculator() -> CompensationCalculator<FixedClock> {
        CompensationCalculator::new(FixedClock::new(date(2015, 4, 15)))
    }

    fn profile() -> CompensationProfile {
        CompensationProfile {
            commute_amount: 12_340,
            rent_amount: 45_000,
            hourly_overtime_rate: 1_875,
            health_insurance_amount: 9_800,
            pension_amount: 16_500,
            income_tax_amount: 5_200,
            inhabitant_tax_amount: 4_100,
        }
    }

    fn attendance(employee_id: u32) -> AttendanceRecord {
        AttendanceRecord::new(
            employee_id,
            april(),
            dec("30.5"),
            dec("12.25"),
            dec("16"),
            dec("5.5"),
        )
        .unwrap()
    }

    fn create_test_employee(capability_code: &str, capability_amount: i64) -> EmployeeView {
        EmployeeView::builder(1, date(2010, 10, 1))
            .name("Mikan Ehime")
            .role(RoleGrade {
                rank: "A3".to_string(),
                amount: 250_000,
            })
            .capability(CapabilityGrade::new(capability_code, capability_amount))
            .profile(profile())
            .attendance(vec![attendance(1)])
            .build()
    }

    /// CC-001: base salary sums role and capability amounts
    #[test]
    fn test_cc_001_base_salary() {
        let employee = create_test_employee("SE", 100_000);
        assert_eq!(calculator().base_salary(&employee).unwrap(), 350_000);
    }

    /// CC-002: monthly allowance excludes the capability allowance for OTHER ranks
    #[test]
    fn test_cc_002_monthly_allowance_other_rank() {
        let employee = create_test_employee("SE", 100_000);
        // 55 months of tenure: no bonus
        assert_eq!(calculator().tenure_months(&employee), 55);
        assert_eq!(calculator().monthly_allowance(&employee).unwrap(), 57_340);
    }

    /// CC-003: PM rank adds its fixed allowance
    #[test]
    fn test_cc_003_monthly_allowance_pm_rank() {
        let employee = create_test_employee("PM", 120_000);
        assert_eq!(
            calculator().monthly_allowance(&employee).unwrap(),
            57_340 + 30_000
        );
    }

    /// CC-004: tenure bonus lands in the anniversary month only
    #[test]
    fn test_cc_004_tenure_bonus_in_anniversary_month() {
        let mut employee = create_test_employee("SE", 100_000);
        employee.join_date = date(2005, 4, 20);

        let calc = calculator();
        assert_eq!(calc.tenure_months(&employee), 120);
        assert_eq!(calc.tenure_years(&employee), 10);
        assert_eq!(calc.tenure_bonus(&employee), 10_000);
        assert_eq!(calc.monthly_allowance(&employee).unwrap(), 67_340);

        // A week later the 121st month has started.
        let later = CompensationCalculator::new(FixedClock::new(date(2015, 4, 22)));
        assert_eq!(later.tenure_months(&employee), 121);
        assert_eq!(later.tenure_bonus(&employee), 0);
    }

    /// CC-005: total salary includes overtime
    #[test]
    fn test_cc_005_total_salary() {
        let employee = create_test_employee("SE", 100_000);
        let calc = calculator();
        assert_eq!(calc.overtime_allowance(&employee, april()).unwrap(), 131_858);
        assert_eq!(calc.standard_salary(&employee).unwrap(), 407_340);
        assert_eq!(calc.total_salary(&employee, april()).unwrap(), 539_198);
    }

    /// CC-006: take-home subtracts only the four deductions
    #[test]
    fn test_cc_006_take_home() {
        let employee = create_test_employee("SE", 100_000);
        assert_eq!(calculator().take_home(&employee, april()).unwrap(), 503_598);
    }

    /// CC-007: annual salary plan ignores commute, rent and tenure bonus
    #[test]
    fn test_cc_007_annual_salary_plan_asymmetry() {
        let calc = calculator();
        let employee = create_test_employee("PL", 110_000);
        let plan = calc.annual_salary_plan(&employee).unwrap();
        assert_eq!(plan, (250_000 + 110_000 + 10_000) * 12);

        let mut changed = employee.clone();
        changed.profile.commute_amount = 99_999;
        changed.profile.rent_amount = 0;
        changed.join_date = date(2012, 4, 20); // 36 months: bonus month
        assert_eq!(calc.tenure_bonus(&changed), 3_000);
        assert_eq!(calc.annual_salary_plan(&changed).unwrap(), plan);
        assert_ne!(
            calc.standard_salary(&changed).unwrap() * 12,
            plan,
            "annual plan is not standard salary × 12"
        );
    }

    /// CC-008: threshold is inclusive
    #[test]
    fn test_cc_008_threshold_inclusive() {
        let employee = create_test_employee("SE", 100_000);
        let calc = calculator();
        assert!(calc.meets_annual_salary_threshold(&employee, 4_200_000).unwrap());
        assert!(calc.meets_annual_salary_threshold(&employee, 4_000_000).unwrap());
        assert!(!calc.meets_annual_salary_threshold(&employee, 4_200_001).unwrap());
    }

    /// CC-009: exempt ranks never receive overtime, even without attendance
    #[test]
    fn test_cc_009_exempt_without_attendance() {
        let mut employee = create_test_employee("PM", 120_000);
        employee.attendance.clear();
        let calc = calculator();
        assert_eq!(calc.overtime_allowance(&employee, april()).unwrap(), 0);
        assert_eq!(
            calc.total_salary(&employee, april()).unwrap(),
            calc.standard_salary(&employee).unwrap()
        );
    }

    /// CC-010: exempt ranks ignore logged hours
    #[test]
    fn test_cc_010_exempt_with_attendance() {
        let employee = create_test_employee("PL", 110_000);
        assert_eq!(
            calculator().overtime_allowance(&employee, april()).unwrap(),
            0
        );
    }

    /// CC-011: missing attendance is an error for non-exempt ranks
    #[test]
    fn test_cc_011_missing_attendance() {
        let employee = create_test_employee("SE", 100_000);
        let may = YearMonth::from_code(201505).unwrap();
        match calculator().total_salary(&employee, may) {
            Err(EngineError::MissingAttendance {
                employee_id,
                period,
            }) => {
                assert_eq!(employee_id, 1);
                assert_eq!(period, may);
            }
            other => panic!("Expected MissingAttendance, got {:?}", other),
        }
    }

    /// CC-012: missing grades fail every salary figure
    #[test]
    fn test_cc_012_missing_grades() {
        let calc = calculator();
        let mut no_role = create_test_employee("SE", 100_000);
        no_role.role = None;
        assert!(matches!(
            calc.base_salary(&no_role),
            Err(EngineError::MissingGrade { .. })
        ));
        assert!(matches!(
            calc.annual_salary_plan(&no_role),
            Err(EngineError::MissingGrade { .. })
        ));
        assert!(matches!(
            calc.take_home(&no_role, april()),
            Err(EngineError::MissingGrade { .. })
        ));

        let mut no_capability = create_test_employee("SE", 100_000);
        no_capability.capability = None;
        assert!(matches!(
            calc.monthly_allowance(&no_capability),
            Err(EngineError::MissingGrade { .. })
        ));
        assert!(matches!(
            calc.overtime_allowance(&no_capability, april()),
            Err(EngineError::MissingGrade { .. })
        ));
    }

    #[test]
    fn test_statement_matches_individual_figures() {
        let mut employee = create_test_employee("SE", 100_000);
        employee.join_date = date(2005, 4, 20);
        let calc = calculator();

        let statement = calc.statement(&employee, april()).unwrap();

        assert_eq!(statement.employee_id, 1);
        assert_eq!(statement.period, april());
        assert_eq!(statement.reference_date, date(2015, 4, 15));
        assert_eq!(statement.tenure_months, 120);
        assert_eq!(statement.engine_version, ENGINE_VERSION);
        assert_eq!(
            statement.totals.total_salary,
            calc.total_salary(&employee, april()).unwrap()
        );
        assert_eq!(
            statement.totals.take_home,
            calc.take_home(&employee, april()).unwrap()
        );
        assert_eq!(
            statement.totals.annual_salary_plan,
            calc.annual_salary_plan(&employee).unwrap()
        );
        assert_eq!(statement.totals.deductions, 35_600);
        assert_eq!(statement.overtime_lines.len(), 4);
        assert_eq!(
            statement.overtime_lines[3].category,
            OvertimeCategory::HolidayLateNight
        );

        let tenure_line = statement
            .allowances
            .iter()
            .find(|line| line.kind == AllowanceKind::Tenure)
            .unwrap();
        assert_eq!(tenure_line.amount, 10_000);
        assert!(!tenure_line.in_annual_plan);
    }

    #[test]
    fn test_statement_audit_trace_is_sequential() {
        let employee = create_test_employee("SE", 100_000);
        let statement = calculator().statement(&employee, april()).unwrap();

        let numbers: Vec<u32> = statement
            .audit_trace
            .iter()
            .map(|step| step.step_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(statement.audit_trace[3].rule_id, "overtime_allowance");
        assert!(statement.audit_trace[5].reasoning.contains("excluded"));
    }

    #[test]
    fn test_statement_records_allowance_lines() {
        let employee = create_test_employee("PM", 120_000);
        let statement = calculator().statement(&employee, april()).unwrap();

        let step = &statement.audit_trace[2];
        assert_eq!(step.rule_id, "monthly_allowance");
        let lines = step.input.as_array().unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["kind"], "commute");
        assert_eq!(lines[2]["amount"], 30_000);
        assert_eq!(lines[2]["in_annual_plan"], true);
    }

    #[test]
    fn test_statement_for_exempt_has_no_overtime_lines() {
        let mut employee = create_test_employee("PL", 110_000);
        employee.attendance.clear();
        let statement = calculator().statement(&employee, april()).unwrap();

        assert!(statement.overtime_lines.is_empty());
        assert_eq!(statement.totals.overtime_allowance, 0);
    }

    #[test]
    fn test_statement_ids_are_unique() {
        let employee = create_test_employee("SE", 100_000);
        let calc = calculator();
        let first = calc.statement(&employee, april()).unwrap();
        let second = calc.statement(&employee, april()).unwrap();
        assert_ne!(first.statement_id, second.statement_id);
        assert_eq!(first.totals, second.totals);
    }
}
