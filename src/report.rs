use crate::domain::{InputError, MonthlyData, to_usd};
use crate::{expense, investment};
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// All-time balance figures. Investment amounts count toward net worth while
/// being subtracted from what is liquid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TotalAvailable {
    pub total: Decimal,
    pub available_for_use: Decimal,
    pub blocked_in_investments: Decimal,
}

pub fn total_available(data: &MonthlyData) -> TotalAvailable {
    let total_salaries: Decimal = data.salaries.values().map(|s| s.amount).sum();
    let total_extra_incomes: Decimal = data.extra_incomes.iter().map(|i| i.amount).sum();
    let total_expenses: Decimal = data.expenses.iter().map(|e| e.amount).sum();
    let total_investments: Decimal = data.investments.iter().map(|i| i.amount).sum();

    TotalAvailable {
        total: total_investments + total_salaries + total_extra_incomes - total_expenses,
        available_for_use: total_salaries + total_extra_incomes - total_expenses
            - total_investments,
        blocked_in_investments: total_investments,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthBalance {
    pub available: Decimal,
    /// `available` clamped at zero; a negative month is displayed as no
    /// savings, not carried as debt.
    pub savings: Decimal,
}

/// Salary minus this month's expenses minus investments opened this month.
/// Zero when no salary is set for the month.
pub fn current_month_available(
    data: &MonthlyData,
    month_key: &str,
) -> Result<MonthBalance, InputError> {
    let Some(salary) = data.salary(month_key) else {
        return Ok(MonthBalance {
            available: Decimal::ZERO,
            savings: Decimal::ZERO,
        });
    };

    let month_expenses = expense::total(expense::filter_by_month(&data.expenses, month_key)?);
    let month_investments =
        investment::total(investment::filter_by_month(&data.investments, month_key)?);

    let available = salary.amount - month_expenses - month_investments;
    Ok(MonthBalance {
        available,
        savings: available.max(Decimal::ZERO),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthExpenses {
    /// YYYY-MM key of the month.
    pub month: String,
    pub total: Decimal,
}

/// Expense totals for each of the twelve months of `year`, zero for months
/// with no records.
pub fn monthly_expenses(data: &MonthlyData, year: &str) -> Result<Vec<MonthExpenses>, InputError> {
    (1..=12)
        .map(|m| {
            let key = format!("{year}-{m:02}");
            let total = expense::total(expense::filter_by_month(&data.expenses, &key)?);
            Ok(MonthExpenses { month: key, total })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthSalary {
    /// YYYY-MM key of the month.
    pub month: String,
    pub ars: Decimal,
    pub usd: Decimal,
}

/// Salary for each of the twelve months of `year`, in ARS and converted to
/// USD at each month's own rate. Unset months yield zero.
pub fn monthly_salaries(data: &MonthlyData, year: &str) -> Vec<MonthSalary> {
    (1..=12)
        .map(|m| {
            let key = format!("{year}-{m:02}");
            let (ars, usd) = match data.salary(&key) {
                Some(s) => (s.amount, to_usd(s.amount, s.usd_rate)),
                None => (Decimal::ZERO, Decimal::ZERO),
            };
            MonthSalary {
                month: key,
                ars,
                usd,
            }
        })
        .collect()
}

/// Every year with data, plus the current and previous calendar years,
/// deduplicated and sorted descending.
pub fn available_years(data: &MonthlyData) -> Vec<String> {
    available_years_from(data, Utc::now().year())
}

pub fn available_years_from(data: &MonthlyData, current_year: i32) -> Vec<String> {
    let mut years = BTreeSet::new();
    years.insert(current_year.to_string());
    years.insert((current_year - 1).to_string());

    for month_key in data.salaries.keys() {
        if let Some((year, _)) = month_key.split_once('-') {
            years.insert(year.to_string());
        }
    }
    for e in &data.expenses {
        years.insert(e.date.year().to_string());
    }
    for i in &data.extra_incomes {
        years.insert(i.date.year().to_string());
    }

    years.into_iter().rev().collect()
}
