//! Collection-level statistics and rankings.
//!
//! An [`EmployeeAggregate`] owns an ordered set of employee views. Salary
//! figures are computed on demand through a borrowed
//! [`CompensationCalculator`], so the aggregate never caches money amounts.

use std::cmp::Ordering;

use tracing::debug;

use crate::clock::BusinessClock;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeView, YearMonth};

use super::compensation::CompensationCalculator;

/// An ordered collection of employees.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::EmployeeAggregate;
/// use salary_engine::models::EmployeeView;
/// use chrono::NaiveDate;
///
/// let joined = NaiveDate::from_ymd_opt(2012, 4, 1).unwrap();
/// let aggregate = EmployeeAggregate::new(vec![
///     EmployeeView::builder(3, joined).build(),
///     EmployeeView::builder(1, joined).build(),
/// ])
/// .order_by_employee_number(true);
///
/// let ids: Vec<u32> = aggregate.iter().map(|e| e.id).collect();
/// assert_eq!(ids, vec![1, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeAggregate {
    employees: Vec<EmployeeView>,
}

impl EmployeeAggregate {
    /// Wraps employees in the order given.
    pub fn new(employees: Vec<EmployeeView>) -> Self {
        Self { employees }
    }

    /// The employees in their current order.
    pub fn employees(&self) -> &[EmployeeView] {
        &self.employees
    }

    /// Iterates the employees in their current order.
    pub fn iter(&self) -> std::slice::Iter<'_, EmployeeView> {
        self.employees.iter()
    }

    /// Number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Consumes the aggregate, returning the employees.
    pub fn into_inner(self) -> Vec<EmployeeView> {
        self.employees
    }

    /// Finds an employee by number.
    pub fn find(&self, employee_id: u32) -> Option<&EmployeeView> {
        self.employees.iter().find(|e| e.id == employee_id)
    }

    /// Stable sort by employee number.
    pub fn order_by_employee_number(mut self, ascending: bool) -> Self {
        if ascending {
            self.employees.sort_by(|a, b| a.id.cmp(&b.id));
        } else {
            self.employees.sort_by(|a, b| b.id.cmp(&a.id));
        }
        self
    }

    /// Stable sort by annual salary plan. Ties keep their prior relative order
    /// in both directions.
    ///
    /// Fails with `MissingGrade` if any member cannot produce a plan.
    pub fn order_by_annual_salary_plan<C: BusinessClock>(
        self,
        calculator: &CompensationCalculator<C>,
        ascending: bool,
    ) -> EngineResult<Self> {
        let mut keyed = self
            .employees
            .into_iter()
            .map(|employee| Ok((calculator.annual_salary_plan(&employee)?, employee)))
            .collect::<EngineResult<Vec<_>>>()?;

        if ascending {
            keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
        } else {
            keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
        }

        Ok(Self::new(
            keyed.into_iter().map(|(_, employee)| employee).collect(),
        ))
    }

    /// Sum of every member's total salary for `period`. Empty sums to 0.
    pub fn sum_total_salary<C: BusinessClock>(
        &self,
        calculator: &CompensationCalculator<C>,
        period: YearMonth,
    ) -> EngineResult<i64> {
        let mut sum: i64 = 0;
        for employee in &self.employees {
            sum = sum
                .checked_add(calculator.total_salary(employee, period)?)
                .ok_or_else(|| EngineError::overflow("total salary sum"))?;
        }
        debug!(period = %period, members = self.len(), sum, "Summed total salary");
        Ok(sum)
    }

    /// Mean take-home for `period`, truncated toward zero.
    ///
    /// Fails with `EmptyCollection` when there are no members.
    pub fn average_take_home<C: BusinessClock>(
        &self,
        calculator: &CompensationCalculator<C>,
        period: YearMonth,
    ) -> EngineResult<i64> {
        if self.is_empty() {
            return Err(EngineError::EmptyCollection {
                operation: "average_take_home".to_string(),
            });
        }

        let mut sum: i128 = 0;
        for employee in &self.employees {
            sum += i128::from(calculator.take_home(employee, period)?);
        }
        // Integer division truncates toward zero; the mean of i64 values fits in i64.
        let average = (sum / self.len() as i128) as i64;
        debug!(period = %period, members = self.len(), average, "Averaged take-home");
        Ok(average)
    }

    /// How many members have an annual salary plan of at least `threshold`.
    pub fn count_above_annual_salary<C: BusinessClock>(
        &self,
        calculator: &CompensationCalculator<C>,
        threshold: i64,
    ) -> EngineResult<usize> {
        let mut count = 0;
        for employee in &self.employees {
            if calculator.meets_annual_salary_threshold(employee, threshold)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// The member with the longest (`select_max`) or shortest tenure.
    ///
    /// Members are compared pairwise in collection order and the earlier one
    /// is kept on a tie, so the first member encountered wins.
    ///
    /// Fails with `EmptyCollection` when there are no members.
    pub fn select_by_tenure_extremum<C: BusinessClock>(
        &self,
        calculator: &CompensationCalculator<C>,
        select_max: bool,
    ) -> EngineResult<&EmployeeView> {
        let reference_date = calculator.reference_date();
        let keep_left = |a: u32, b: u32| match a.cmp(&b) {
            Ordering::Equal => true,
            Ordering::Greater => select_max,
            Ordering::Less => !select_max,
        };

        self.employees
            .iter()
            .map(|e| (super::tenure_months(e.join_date, reference_date), e))
            .reduce(|left, right| if keep_left(left.0, right.0) { left } else { right })
            .map(|(_, employee)| employee)
            .ok_or_else(|| EngineError::EmptyCollection {
                operation: "select_by_tenure_extremum".to_string(),
            })
    }

    /// Number of members belonging to `organization_code`.
    pub fn count_by_organization(&self, organization_code: &str) -> usize {
        self.employees
            .iter()
            .filter(|e| e.organization_code() == Some(organization_code))
            .count()
    }

    /// Members holding role rank `rank`, in collection order.
    pub fn filter_by_role(&self, rank: &str) -> Self {
        self.filter(|e| e.role.as_ref().is_some_and(|role| role.rank == rank))
    }

    /// Members holding capability code `code`, in collection order.
    pub fn filter_by_capability(&self, code: &str) -> Self {
        self.filter(|e| {
            e.capability
                .as_ref()
                .is_some_and(|capability| capability.code == code)
        })
    }

    fn filter(&self, predicate: impl Fn(&EmployeeView) -> bool) -> Self {
        Self::new(
            self.employees
                .iter()
                .filter(|e| predicate(e))
                .cloned()
                .collect(),
        )
    }
}

impl FromIterator<EmployeeView> for EmployeeAggregate {
    fn from_iter<I: IntoIterator<Item = EmployeeView>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EmployeeAggregate {
    type Item = &'a EmployeeView;
    type IntoIter = std::slice::Iter<'a, EmployeeView>;

    fn into_iter(self) -> Self::IntoIter {
        self.employees.iter()
    }
}
